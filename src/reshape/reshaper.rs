//! Wide-to-long conversion of station-month records into daily observations.
//!
//! Every record carries 31 day slots. Slot `i` is day `i + 1` of the
//! record's month; slots past the month's real length cannot name a date and
//! are dropped without error, while a slot that names a real day but holds
//! something that is not a number is a [`ReshapeError::MalformedValue`].

use crate::calendar::DAY_SLOTS;
use crate::reshape::error::ReshapeError;
use crate::types::observation::DailyObservation;
use crate::types::record::{DaySlot, StationMonthRecord};
use log::debug;

/// Result of [`reshape_lenient`]: everything that could be reshaped, plus
/// one error per malformed slot or badly shaped record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LenientReshape {
    pub observations: Vec<DailyObservation>,
    pub errors: Vec<ReshapeError>,
}

impl LenientReshape {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Reshapes `records` into daily observations sorted by date.
///
/// Records are processed in input order and days in ascending order; the
/// final stable sort on date keeps that order between observations sharing a
/// date (e.g. a raw and a consistent reading of the same day).
///
/// # Errors
///
/// The first [`ReshapeError`] aborts the whole call. No observation is
/// returned in that case, so a caller never receives a truncated series.
///
/// # Examples
///
/// ```
/// use hidroweb::{reshape, ConsistencyLevel, Month, StationMonthRecord};
///
/// let record = StationMonthRecord::empty("02045012", Month(2023, 2), ConsistencyLevel::Raw, "Chuva")
///     .with_day(1, 12.5)
///     .with_day(30, 99.0); // there is no 30 February, silently dropped
///
/// let days = reshape(&[record]).unwrap();
/// assert_eq!(days.len(), 28);
/// assert_eq!(days[0].value, Some(12.5));
/// assert_eq!(days[1].value, None);
/// ```
pub fn reshape(records: &[StationMonthRecord]) -> Result<Vec<DailyObservation>, ReshapeError> {
    let mut observations = Vec::with_capacity(records.len() * DAY_SLOTS);
    for record in records {
        observations.extend(reshape_record(record)?);
    }
    sort_by_date(&mut observations);
    Ok(observations)
}

/// Like [`reshape`], but keeps going past errors.
///
/// A malformed slot is reported and its day left out; a record with an
/// invalid shape is reported and skipped entirely. The observations that
/// could be produced are returned sorted exactly as [`reshape`] sorts them.
pub fn reshape_lenient(records: &[StationMonthRecord]) -> LenientReshape {
    let mut result = LenientReshape::default();
    for record in records {
        let length = match month_length_of(record) {
            Ok(length) => length,
            Err(e) => {
                result.errors.push(e);
                continue;
            }
        };
        for (day, slot) in calendar_slots(record, length) {
            match observation_for(record, day, slot) {
                Ok(observation) => result.observations.push(observation),
                Err(e) => result.errors.push(e),
            }
        }
    }
    sort_by_date(&mut result.observations);
    result
}

/// Reshapes a single record into one observation per calendar day of its
/// month, in ascending day order.
pub fn reshape_record(record: &StationMonthRecord) -> Result<Vec<DailyObservation>, ReshapeError> {
    let length = month_length_of(record)?;
    calendar_slots(record, length)
        .map(|(day, slot)| observation_for(record, day, slot))
        .collect()
}

/// Validates the record shape and returns the length of its month.
fn month_length_of(record: &StationMonthRecord) -> Result<u32, ReshapeError> {
    let shape_error = |reason: String| ReshapeError::InvalidRecordShape {
        station: record.station_code.clone(),
        year: record.reference.year(),
        month: record.reference.month(),
        reason,
    };

    if record.day_values.len() != DAY_SLOTS {
        return Err(shape_error(format!(
            "expected {} day slots, found {}",
            DAY_SLOTS,
            record.day_values.len()
        )));
    }
    let length = record
        .reference
        .length()
        .ok_or_else(|| shape_error("month must be within 1..=12".to_string()))?;
    if record.reference.day(1).is_none() {
        return Err(shape_error("year is outside the supported calendar range".to_string()));
    }

    let dropped = record.day_values[length as usize..]
        .iter()
        .filter(|slot| !slot.is_absent())
        .count();
    if dropped > 0 {
        debug!(
            "Dropping {} populated slot(s) past day {} for station {} in {}",
            dropped, length, record.station_code, record.reference
        );
    }
    Ok(length)
}

/// The slots that name a real day, paired with their day-of-month.
fn calendar_slots(
    record: &StationMonthRecord,
    length: u32,
) -> impl Iterator<Item = (u32, &DaySlot)> {
    record
        .day_values
        .iter()
        .take(length as usize)
        .enumerate()
        .map(|(index, slot)| (index as u32 + 1, slot))
}

fn observation_for(
    record: &StationMonthRecord,
    day: u32,
    slot: &DaySlot,
) -> Result<DailyObservation, ReshapeError> {
    let malformed = |raw: String| ReshapeError::MalformedValue {
        station: record.station_code.clone(),
        year: record.reference.year(),
        month: record.reference.month(),
        day,
        raw,
    };

    let value = match slot {
        DaySlot::Absent => None,
        DaySlot::Number(v) if v.is_finite() => Some(*v),
        DaySlot::Number(v) => return Err(malformed(v.to_string())),
        DaySlot::Text(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                None
            } else {
                match text.parse::<f64>() {
                    Ok(v) if v.is_finite() => Some(v),
                    _ => return Err(malformed(raw.clone())),
                }
            }
        }
    };

    // month and year were validated by month_length_of
    let date = record
        .reference
        .day(day)
        .ok_or_else(|| ReshapeError::InvalidRecordShape {
            station: record.station_code.clone(),
            year: record.reference.year(),
            month: record.reference.month(),
            reason: format!("day {day} does not exist"),
        })?;

    Ok(DailyObservation {
        station_code: record.station_code.clone(),
        date,
        consistency: record.consistency,
        value,
    })
}

fn sort_by_date(observations: &mut [DailyObservation]) {
    // sort_by_key is stable
    observations.sort_by_key(|observation| observation.date);
}
