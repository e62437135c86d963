pub(crate) mod csv_exporter;
pub(crate) mod error;
