#![allow(dead_code, clippy::unwrap_used)]
// Scripted fake host for workflow tests: an in-memory filesystem plus
// canned behavior for every command the core issues. Each invocation is
// logged so tests can assert on exactly what ran.

use std::collections::HashMap;
use std::sync::Mutex;

use nginsight_host::{CommandOutput, CommandSpec, HostError, HostExecutor};

pub struct FakeHost {
    state: Mutex<FakeState>,
}

pub struct FakeState {
    pub files: HashMap<String, Vec<u8>>,
    pub log: Vec<Vec<String>>,
    pub validate_ok: bool,
    pub candidate_ok: bool,
    pub reload_ok: bool,
    pub fail_cp: bool,
    pub fail_tee: bool,
    pub fail_mv: bool,
    pub script_path: String,
    pub script_output: String,
    pub script_stderr: String,
    pub script_status: i32,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                files: HashMap::new(),
                log: Vec::new(),
                validate_ok: true,
                candidate_ok: true,
                reload_ok: true,
                fail_cp: false,
                fail_tee: false,
                fail_mv: false,
                script_path: String::new(),
                script_output: String::new(),
                script_stderr: String::new(),
                script_status: 0,
            }),
        }
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(path.to_owned(), content.as_bytes().to_vec());
        self
    }

    pub fn set(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    /// Paths in the fake filesystem starting with `prefix`, sorted.
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        let mut hits: Vec<String> = self
            .state
            .lock()
            .unwrap()
            .files
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        hits.sort();
        hits
    }

    /// How many logged invocations start with the given words.
    pub fn count_commands(&self, prefix: &[&str]) -> usize {
        self.state
            .lock()
            .unwrap()
            .log
            .iter()
            .filter(|argv| {
                argv.len() >= prefix.len()
                    && argv.iter().zip(prefix.iter()).all(|(a, p)| a == p)
            })
            .count()
    }
}

impl HostExecutor for FakeHost {
    async fn execute(&self, spec: CommandSpec) -> Result<CommandOutput, HostError> {
        let mut st = self.state.lock().unwrap();
        st.log.push(spec.argv.clone());

        fn out(status: i32, stdout: &str, stderr: &str) -> CommandOutput {
            CommandOutput {
                stdout: stdout.to_owned(),
                stderr: stderr.to_owned(),
                status,
            }
        }

        let argv: Vec<&str> = spec.argv.iter().map(String::as_str).collect();
        let result = match argv.as_slice() {
            ["test", "-f", path] => {
                if st.files.contains_key(*path) {
                    out(0, "", "")
                } else {
                    out(1, "", "")
                }
            }

            ["cat", path] => match st.files.get(*path) {
                Some(content) => out(0, &String::from_utf8_lossy(content), ""),
                None => out(1, "", "cat: No such file or directory"),
            },

            ["tee", path] => {
                if st.fail_tee {
                    out(1, "", "tee: Permission denied")
                } else {
                    let bytes = spec.stdin.clone().unwrap_or_default();
                    st.files.insert((*path).to_owned(), bytes.clone());
                    out(0, &String::from_utf8_lossy(&bytes), "")
                }
            }

            ["cp", "-p", src, dst] => {
                if st.fail_cp {
                    out(1, "", "cp: Permission denied")
                } else {
                    match st.files.get(*src).cloned() {
                        Some(content) => {
                            st.files.insert((*dst).to_owned(), content);
                            out(0, "", "")
                        }
                        None => out(1, "", "cp: cannot stat source"),
                    }
                }
            }

            ["mv", src, dst] => {
                if st.fail_mv {
                    out(1, "", "mv: Permission denied")
                } else {
                    match st.files.remove(*src) {
                        Some(content) => {
                            st.files.insert((*dst).to_owned(), content);
                            out(0, "", "")
                        }
                        None => out(1, "", "mv: cannot stat source"),
                    }
                }
            }

            ["rm", "-f", path] => {
                st.files.remove(*path);
                out(0, "", "")
            }

            ["chmod", "+x", path] => {
                if st.files.contains_key(*path) {
                    out(0, "", "")
                } else {
                    out(1, "", "chmod: No such file or directory")
                }
            }

            ["find", dir, "-maxdepth", "1", "-type", "f", "-name", pattern] => {
                let prefix = format!("{}/{}", dir, pattern.trim_end_matches('*'));
                let mut hits: Vec<&String> =
                    st.files.keys().filter(|k| k.starts_with(&prefix)).collect();
                hits.sort();
                let listing = hits
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                out(0, &listing, "")
            }

            ["find", root, "-type", "f", "-name", "*.conf", "-o", "-name", "nginx.conf"] => {
                let prefix = format!("{root}/");
                let mut hits: Vec<&String> = st
                    .files
                    .keys()
                    .filter(|k| k.starts_with(&prefix) && k.ends_with(".conf"))
                    .collect();
                hits.sort();
                let listing = hits
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join("\n");
                out(0, &listing, "")
            }

            ["nginx", "-t"] => {
                if st.validate_ok {
                    out(
                        0,
                        "",
                        "nginx: the configuration file /etc/nginx/nginx.conf syntax is ok\n\
                         nginx: configuration file /etc/nginx/nginx.conf test is successful",
                    )
                } else {
                    out(
                        1,
                        "",
                        "nginx: [emerg] unexpected end of file, expecting \"}\" in /etc/nginx/nginx.conf:42",
                    )
                }
            }

            ["nginx", "-t", "-c", path] => {
                if st.candidate_ok {
                    out(0, "", &format!("nginx: configuration file {path} test is successful"))
                } else {
                    out(1, "", &format!("nginx: [emerg] unknown directive in {path}:1"))
                }
            }

            ["systemctl", "reload", _unit] => {
                if st.reload_ok {
                    out(0, "", "")
                } else {
                    out(1, "", "Job for nginx.service failed. See 'systemctl status nginx.service'.")
                }
            }

            ["systemctl", "restart", _unit] => out(0, "", ""),

            ["systemctl", "is-active", _unit] => out(0, "active\n", ""),

            [program] if *program == st.script_path => out(
                st.script_status,
                &st.script_output.clone(),
                &st.script_stderr.clone(),
            ),

            other => out(127, "", &format!("fake host: unhandled command {other:?}")),
        };

        Ok(result)
    }
}
