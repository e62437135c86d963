//! Station metadata as returned by the HidroWeb inventory.

use crate::types::data_kind::StationKind;

/// A HidroWeb station.
///
/// The typed fields are the ones the crate works with; every column of the
/// inventory row is also kept, in service order, in [`Station::fields`] so
/// the inventory can be exported without losing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// The eight-digit station code (e.g. "02045012").
    pub code: String,
    /// Station name, if reported.
    pub name: Option<String>,
    /// Fluviometric or pluviometric, if the kind code was recognised.
    pub kind: Option<StationKind>,
    /// Geographical location, when both coordinates parse.
    pub location: Option<Location>,
    /// Hydrographic basin code.
    pub basin: Option<String>,
    /// Hydrographic sub-basin code.
    pub sub_basin: Option<String>,
    /// River name.
    pub river: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    /// Acronym of the agency responsible for the station (e.g. "ANA").
    pub responsible: Option<String>,
    /// Acronym of the operating agency (e.g. "CPRM").
    pub operator: Option<String>,
    /// Whether the station transmits by telemetry.
    pub telemetric: Option<bool>,
    /// All inventory columns in the order the service returned them.
    pub fields: Vec<(String, Option<String>)>,
}

/// Decimal-degree coordinates (SIRGAS 2000 as published by the service).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters, if available.
    pub altitude: Option<f64>,
}

impl Station {
    /// Raw value of an inventory column.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_deref())
    }
}
