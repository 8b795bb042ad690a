// nginsight-core: domain layer between the host channel and consumers (CLI).

pub mod apply;
pub mod config;
pub mod error;
pub mod model;
pub mod scan;
pub mod service;
pub mod session;
pub mod ssl;

// ── Primary re-exports ──────────────────────────────────────────────
pub use apply::{ApplyReport, CheckReport};
pub use config::SessionConfig;
pub use error::CoreError;
pub use service::ServiceStatus;
pub use session::Session;
pub use ssl::{ExpiryClass, ExpiryStatus};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ContentType, DockerInfo, ProxyInfo, SiteDataDocument, SiteReport, SiteState, SslInfo,
    StaticInfo, StatusInfo, SummaryStatistics,
};
