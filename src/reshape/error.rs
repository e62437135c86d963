use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReshapeError {
    #[error("Malformed value '{raw}' for station '{station}' on day {day} of {year:04}-{month:02}")]
    MalformedValue {
        station: String,
        year: i32,
        month: u32,
        day: u32,
        raw: String,
    },

    #[error("Invalid record shape for station '{station}' ({year:04}-{month:02}): {reason}")]
    InvalidRecordShape {
        station: String,
        year: i32,
        month: u32,
        reason: String,
    },
}
