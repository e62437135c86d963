use crate::export::error::ExportError;
use crate::geometry::error::GeometryError;
use crate::reshape::error::ReshapeError;
use crate::service::error::FetchError;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HidrowebError {
    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("No stations found for the given filter")]
    NoStationsFound,

    #[error("Output directory '{0}' does not exist")]
    OutputDirMissing(PathBuf),

    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to build data frame")]
    Frame(#[from] PolarsError),
}
