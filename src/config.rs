/// Application-level constants
pub const APP_NAME: &str = "Acuita";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "acuita=info"
}
