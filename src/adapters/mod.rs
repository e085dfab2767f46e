// Adapters - External system implementations

pub mod headless_engine;
pub mod http_analysis;
pub mod preview_store;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use headless_engine::HeadlessMediaEngine;
pub use http_analysis::{HttpAnalysisAdapter, ServiceContract};
pub use preview_store::LocalPreviewStore;
pub use toml_config::{ClientConfig, TomlConfigAdapter};
pub use tracing_log::{LogFormat, TracingLogAdapter};
