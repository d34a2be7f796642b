use crate::services::api::ApiVersion;

/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Endpoint variant to fetch; v2 is the current dataset
    pub const API_VERSION: ApiVersion = ApiVersion::V2;

    /// Debounce window for chart re-render on window resize (milliseconds)
    pub const CHART_RESIZE_DEBOUNCE_MS: u32 = 150;
}
