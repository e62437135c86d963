mod calendar;
mod error;
mod export;
mod frame;
mod geometry;
mod hidroweb;
mod reshape;
mod service;
mod types;

pub use error::HidrowebError;
pub use hidroweb::*;

pub use calendar::{is_leap_year, month_length, slot_column, slot_day, DAY_SLOTS};
pub use frame::DailyFrame;

pub use types::data_kind::*;
pub use types::month::Month;
pub use types::observation::DailyObservation;
pub use types::record::*;
pub use types::station::*;

pub use reshape::reshaper::{reshape, reshape_lenient, reshape_record, LenientReshape};

pub use export::csv_exporter::*;
pub use geometry::filter::GeometryFilter;
pub use geometry::region::{Polygon, Region};
pub use service::inventory::InventoryFilter;
pub use service::loader::DEFAULT_BASE_URL;
pub use service::series::SeriesRequest;

pub use export::error::ExportError;
pub use geometry::error::GeometryError;
pub use reshape::error::ReshapeError;
pub use service::error::FetchError;
