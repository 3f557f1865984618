use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BboxError {
    #[error("Error decoding JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid GeoJSON: Missing 'features'.")]
    MissingFeatures,
    #[error("Error processing GeoJSON features: {0}")]
    Feature(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog endpoint not found: {0}")]
    NotFound(String),
    #[error("catalog returned {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unable to decode catalog response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid pagination link: {0}")]
    Link(String),
}

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token service returned {status} for {account}/{container}")]
    Status {
        status: StatusCode,
        account: String,
        container: String,
    },
    #[error("invalid token endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Unknown product type: {0}")]
    ProductType(String),
    #[error("Invalid {field} date: {value}")]
    Date { field: &'static str, value: String },
    #[error("Max cloud cover must be between 1 and 100, got {0}")]
    CloudCover(String),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("unable to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}
