use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("Failed to read geometry file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse GeoJSON")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported geometry: only Polygon and MultiPolygon areas can select stations")]
    Unsupported,

    #[error("Invalid polygon ring: {0}")]
    InvalidRing(String),

    #[error("Geometry contains no polygon")]
    Empty,
}
