//! Enumerations shared by the HidroWeb requests and the records they return:
//! what a station measures, which series to request, and how reviewed the
//! readings are.

use std::fmt;

/// The kind of a HidroWeb station, as reported by the inventory (`TipoEstacao`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationKind {
    /// River gauging station. Records stage and flow.
    Fluviometric,
    /// Rain gauge. Records rainfall.
    Pluviometric,
}

impl StationKind {
    /// Numeric code used by the service (`1` fluviometric, `2` pluviometric).
    pub fn code(self) -> u8 {
        match self {
            StationKind::Fluviometric => 1,
            StationKind::Pluviometric => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(StationKind::Fluviometric),
            2 => Some(StationKind::Pluviometric),
            _ => None,
        }
    }

    /// The series a station of this kind publishes.
    pub fn data_kinds(self) -> &'static [DataKind] {
        match self {
            StationKind::Fluviometric => &[DataKind::Stage, DataKind::Flow],
            StationKind::Pluviometric => &[DataKind::Rainfall],
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationKind::Fluviometric => write!(f, "fluviometric"),
            StationKind::Pluviometric => write!(f, "pluviometric"),
        }
    }
}

/// The measured quantity of a historic series (`tipoDados`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// River stage (water level), column prefix `Cota`.
    Stage,
    /// Daily rainfall, column prefix `Chuva`.
    Rainfall,
    /// River discharge, column prefix `Vazao`.
    Flow,
}

impl DataKind {
    pub fn code(self) -> u8 {
        match self {
            DataKind::Stage => 1,
            DataKind::Rainfall => 2,
            DataKind::Flow => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(DataKind::Stage),
            2 => Some(DataKind::Rainfall),
            3 => Some(DataKind::Flow),
            _ => None,
        }
    }

    /// Prefix of the 31 day columns in a series row (`Chuva01..Chuva31`).
    pub fn variable_prefix(self) -> &'static str {
        match self {
            DataKind::Stage => "Cota",
            DataKind::Rainfall => "Chuva",
            DataKind::Flow => "Vazao",
        }
    }

    /// Upper-case name used in exported file names (`serie_CHUVAS_estacao_…`).
    pub fn file_label(self) -> &'static str {
        match self {
            DataKind::Stage => "COTAS",
            DataKind::Rainfall => "CHUVAS",
            DataKind::Flow => "VAZOES",
        }
    }

    /// The station kind that publishes this series.
    pub fn station_kind(self) -> StationKind {
        match self {
            DataKind::Stage | DataKind::Flow => StationKind::Fluviometric,
            DataKind::Rainfall => StationKind::Pluviometric,
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variable_prefix())
    }
}

/// Review status of the readings (`nivelConsistencia`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConsistencyLevel {
    /// Unreviewed readings as they came from the station.
    Raw,
    /// Readings reviewed and validated by the operator.
    Consistent,
}

impl ConsistencyLevel {
    pub fn code(self) -> u8 {
        match self {
            ConsistencyLevel::Raw => 1,
            ConsistencyLevel::Consistent => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ConsistencyLevel::Raw),
            2 => Some(ConsistencyLevel::Consistent),
            _ => None,
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyLevel::Raw => write!(f, "raw"),
            ConsistencyLevel::Consistent => write!(f, "consistent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for kind in [DataKind::Stage, DataKind::Rainfall, DataKind::Flow] {
            assert_eq!(DataKind::from_code(kind.code()), Some(kind));
        }
        for kind in [StationKind::Fluviometric, StationKind::Pluviometric] {
            assert_eq!(StationKind::from_code(kind.code()), Some(kind));
        }
        for level in [ConsistencyLevel::Raw, ConsistencyLevel::Consistent] {
            assert_eq!(ConsistencyLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(DataKind::from_code(0), None);
        assert_eq!(ConsistencyLevel::from_code(3), None);
    }

    #[test]
    fn station_kinds_publish_their_series() {
        assert_eq!(
            StationKind::Fluviometric.data_kinds(),
            &[DataKind::Stage, DataKind::Flow]
        );
        assert_eq!(StationKind::Pluviometric.data_kinds(), &[DataKind::Rainfall]);
        for kind in [DataKind::Stage, DataKind::Rainfall, DataKind::Flow] {
            assert!(kind.station_kind().data_kinds().contains(&kind));
        }
    }

    #[test]
    fn display_uses_variable_prefix() {
        assert_eq!(DataKind::Flow.to_string(), "Vazao");
        assert_eq!(ConsistencyLevel::Raw.to_string(), "raw");
    }
}
