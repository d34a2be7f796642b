use crate::models::{
    cases::{CaseRecord, Cases, CoronaReport},
    error::AppError,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

// CONSTANTS
const BASE_URL: &str = "https://w3qa5ydb4l.execute-api.eu-west-1.amazonaws.com/prod";

/// Published variants of the Finnish corona open-data endpoint.
///
/// The v1 dataset carries a `recovered` collection and an
/// `infectionSourceCountry` field on each record; both were dropped from v2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// Original dataset with recovered cases and infection sources.
    V1,
    /// Current dataset, confirmed cases and deaths only.
    #[default]
    V2,
}

impl ApiVersion {
    /// Returns the short code used in URLs and configuration.
    pub fn code(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }

    /// Returns the endpoint path for this variant.
    pub fn path(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "finnishCoronaData",
            ApiVersion::V2 => "finnishCoronaData/v2",
        }
    }

    /// Returns a human-readable description of the variant.
    pub fn description(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "original dataset",
            ApiVersion::V2 => "current dataset",
        }
    }

    /// Whether this variant serves a `recovered` collection.
    pub fn supports_recovered(&self) -> bool {
        matches!(self, ApiVersion::V1)
    }

    /// Whether records of this variant carry an infection source country.
    pub fn supports_infection_source(&self) -> bool {
        matches!(self, ApiVersion::V1)
    }

    /// All published variants.
    pub fn all() -> &'static [ApiVersion] {
        &[ApiVersion::V1, ApiVersion::V2]
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            "v2" | "2" => Ok(ApiVersion::V2),
            _ => Err(AppError::ConfigError(format!("Invalid API version: {s}"))),
        }
    }
}

// API CONFIGURATION
/// Configuration for the corona open-data client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    version: ApiVersion,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Returns the endpoint variant configured for this client.
    pub fn version(&self) -> ApiVersion {
        self.version
    }

    /// Constructs the full URL of the configured endpoint variant.
    pub fn report_url(&self) -> String {
        format!("{}/{}", self.base_url, self.version.path())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    version: Option<ApiVersion>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the endpoint variant.
    pub fn version(mut self, version: ApiVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.unwrap_or_else(|| BASE_URL.to_string()),
            version: self.version.unwrap_or_default(),
        }
    }
}

// API RESPONSE TYPES
/// Raw response body. Collections the variant does not serve read as empty
/// rather than failing the parse.
#[derive(Deserialize, Debug)]
struct ApiReport {
    #[serde(default)]
    confirmed: Vec<ApiCaseRecord>,
    #[serde(default)]
    deaths: Vec<ApiCaseRecord>,
    #[serde(default)]
    recovered: Vec<ApiCaseRecord>,
}

/// One record as served, before validation.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiCaseRecord {
    #[serde(default)]
    id: Option<String>,
    date: String,
    #[serde(default)]
    health_care_district: Option<String>,
    #[serde(default)]
    infection_source_country: Option<String>,
}

impl TryFrom<ApiCaseRecord> for CaseRecord {
    type Error = AppError;

    fn try_from(raw: ApiCaseRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            date: parse_case_timestamp(&raw.date)?,
            health_care_district: raw.health_care_district,
            infection_source_country: raw.infection_source_country,
        })
    }
}

/// Parses the timestamps the dataset has served over time: RFC 3339 with or
/// without fractional seconds, second-less forms, and bare dates.
fn parse_case_timestamp(s: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(stripped) = s.strip_suffix('Z') {
        if let Ok(naive) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M:%S") {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(stripped, "%Y-%m-%dT%H:%M") {
            return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    // Some early records carry a bare date
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            AppError::DataError(format!("Invalid record date '{s}'"))
        })?;
        return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    Err(AppError::DataError(format!(
        "Failed to parse record timestamp '{s}'"
    )))
}

/// Parses a response body into a validated [`CoronaReport`].
///
/// Public so the transform can be exercised against fixture bodies without a
/// network in reach.
pub fn parse_report(body: &str) -> Result<CoronaReport, AppError> {
    let report: ApiReport = serde_json::from_str(body)
        .map_err(|e| AppError::ApiError(format!("Failed to parse response: {e}")))?;

    Ok(CoronaReport {
        confirmed: validate_records(report.confirmed)?,
        deaths: validate_records(report.deaths)?,
        recovered: validate_records(report.recovered)?,
    })
}

fn validate_records(records: Vec<ApiCaseRecord>) -> Result<Cases, AppError> {
    records
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<CaseRecord>, AppError>>()
        .map(Cases::new)
}

// CORONA CLIENT
/// HTTP client for the Finnish corona open-data endpoint.
pub struct CoronaClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl CoronaClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetches and validates the full report of the configured variant.
    pub async fn fetch_report(&self) -> Result<CoronaReport, AppError> {
        let url = self.config.report_url();

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to read response body: {e}")))?;

        parse_report(&body)
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::ApiError(format!("Request error: {error}"))
        } else {
            AppError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            404 => AppError::NotFound(format!("Resource not found: {body}")),
            400..=499 => AppError::ApiError(format!("Client error {status}: {body}")),
            500..=599 => AppError::ApiError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

impl Default for CoronaClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default client")
    }
}

// CONVENIENCE FUNCTIONS
/// Fetches the report using default configuration.
pub async fn fetch_report() -> Result<CoronaReport, AppError> {
    CoronaClient::new()?.fetch_report().await
}

/// Fetches the report of a specific endpoint variant.
pub async fn fetch_report_for_version(version: ApiVersion) -> Result<CoronaReport, AppError> {
    let config = ApiConfig::builder().version(version).build();
    CoronaClient::with_config(config)?.fetch_report().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        assert_eq!("V1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert!("v3".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_all_versions() {
        let versions = ApiVersion::all();
        assert_eq!(versions.len(), 2);
        assert_eq!(ApiVersion::V2.to_string(), "v2 (current dataset)");
    }

    #[test]
    fn test_version_capabilities() {
        assert!(ApiVersion::V1.supports_recovered());
        assert!(ApiVersion::V1.supports_infection_source());
        assert!(!ApiVersion::V2.supports_recovered());
        assert!(!ApiVersion::V2.supports_infection_source());
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = ApiConfig::builder().build();
        assert_eq!(config.version(), ApiVersion::V2);
        assert!(config.report_url().ends_with("/finnishCoronaData/v2"));
    }

    #[test]
    fn test_report_url_v1() {
        let config = ApiConfig::builder().version(ApiVersion::V1).build();
        assert!(config.report_url().ends_with("/finnishCoronaData"));
        assert!(!config.report_url().contains("v2"));
    }

    #[test]
    fn test_custom_base_url() {
        let config = ApiConfig::builder()
            .base_url("http://localhost:8080")
            .build();
        assert_eq!(
            config.report_url(),
            "http://localhost:8080/finnishCoronaData/v2"
        );
    }

    #[test]
    fn test_parse_report() {
        let json = r#"{
            "confirmed": [
                {"id": "1", "date": "2020-03-01T00:00:00Z", "healthCareDistrict": "HUS"},
                {"id": "2", "date": "2020-03-02T00:00:00Z", "healthCareDistrict": "HUS"},
                {"id": "3", "date": "2020-03-03T00:00:00Z", "healthCareDistrict": "PHHYKY"}
            ],
            "deaths": []
        }"#;

        let report = parse_report(json).unwrap();
        assert_eq!(report.confirmed.total(), 3);
        assert_eq!(report.deaths.total(), 0);
        assert_eq!(report.recovered.total(), 0);

        let counts = report.confirmed.by_district();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].health_care_district, "HUS");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].health_care_district, "PHHYKY");
        assert_eq!(counts[1].count, 1);
    }

    #[test]
    fn test_parse_report_missing_deaths_key() {
        let json = r#"{"confirmed": []}"#;

        let report = parse_report(json).unwrap();
        assert_eq!(report.confirmed.total(), 0);
        assert_eq!(report.deaths.total(), 0);
    }

    #[test]
    fn test_parse_report_v1_fields() {
        let json = r#"{
            "confirmed": [{
                "id": "42",
                "date": "2020-03-15T12:30:00.000Z",
                "healthCareDistrict": "HUS",
                "infectionSourceCountry": "ITA"
            }],
            "deaths": [],
            "recovered": [{"id": "7", "date": "2020-03-10T00:00:00Z", "healthCareDistrict": "HUS"}]
        }"#;

        let report = parse_report(json).unwrap();
        assert_eq!(report.recovered.total(), 1);

        let record = &report.confirmed.records()[0];
        assert_eq!(record.id.as_deref(), Some("42"));
        assert_eq!(record.infection_source_country.as_deref(), Some("ITA"));
    }

    #[test]
    fn test_parse_report_null_district() {
        let json = r#"{
            "confirmed": [{"id": "1", "date": "2020-03-01T00:00:00Z", "healthCareDistrict": null}],
            "deaths": []
        }"#;

        let report = parse_report(json).unwrap();
        let record = &report.confirmed.records()[0];
        assert_eq!(record.health_care_district, None);
        assert_eq!(record.district(), "Unknown");
    }

    #[test]
    fn test_parse_report_invalid_date() {
        let json = r#"{
            "confirmed": [{"id": "1", "date": "not a date", "healthCareDistrict": "HUS"}],
            "deaths": []
        }"#;

        assert!(matches!(
            parse_report(json),
            Err(AppError::DataError(_))
        ));
    }

    #[test]
    fn test_timestamp_formats() {
        assert!(parse_case_timestamp("2020-03-01T15:20:32.000Z").is_ok());
        assert!(parse_case_timestamp("2020-03-01T15:20:32Z").is_ok());
        assert!(parse_case_timestamp("2020-03-01T15:20Z").is_ok());
        assert!(parse_case_timestamp("2020-02-26").is_ok());
        assert!(parse_case_timestamp("26/02/2020").is_err());
    }
}
