//! Command handlers, one module per top-level command.

pub mod conf;
pub mod config_cmd;
pub mod service;
pub mod sites;
pub mod stats;
pub mod util;
