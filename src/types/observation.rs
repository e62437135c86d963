use crate::types::data_kind::ConsistencyLevel;
use chrono::NaiveDate;

/// A single reading for one station on one calendar day.
///
/// `value` is `None` when the station reported nothing for that day; the
/// day itself still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyObservation {
    pub station_code: String,
    pub date: NaiveDate,
    pub consistency: ConsistencyLevel,
    pub value: Option<f64>,
}
