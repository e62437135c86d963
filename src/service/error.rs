use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse XML response from {url}")]
    Xml {
        url: String,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Missing required field '{field}' in a '{table}' row")]
    MissingField { table: String, field: String },

    #[error("Invalid value '{value}' for field '{field}' in a '{table}' row")]
    InvalidField {
        table: String,
        field: String,
        value: String,
    },
}
