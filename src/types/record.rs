//! Wide-format input of the reshaper: one row per station, month,
//! consistency level and variable, with 31 positional day slots.

use crate::calendar::DAY_SLOTS;
use crate::types::data_kind::ConsistencyLevel;
use crate::types::month::Month;

/// Content of one day-of-month column.
#[derive(Debug, Clone, PartialEq)]
pub enum DaySlot {
    /// Nothing was reported for this slot.
    Absent,
    /// An already numeric reading.
    Number(f64),
    /// Raw text as delivered by the service. Parsed while reshaping.
    Text(String),
}

impl DaySlot {
    /// Builds a slot from optional service text. Missing or blank text is
    /// [`DaySlot::Absent`].
    pub fn from_text(text: Option<&str>) -> Self {
        match text.map(str::trim) {
            Some(t) if !t.is_empty() => DaySlot::Text(t.to_string()),
            _ => DaySlot::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        match self {
            DaySlot::Absent => true,
            DaySlot::Text(t) => t.trim().is_empty(),
            DaySlot::Number(_) => false,
        }
    }
}

impl From<Option<f64>> for DaySlot {
    fn from(value: Option<f64>) -> Self {
        value.map_or(DaySlot::Absent, DaySlot::Number)
    }
}

/// All readings of one station over one calendar month.
///
/// `day_values[i]` holds day `i + 1`. Slots past the real length of the
/// month are structurally present and dropped when reshaping.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMonthRecord {
    pub station_code: String,
    pub reference: Month,
    pub consistency: ConsistencyLevel,
    pub variable_prefix: String,
    pub day_values: Vec<DaySlot>,
}

impl StationMonthRecord {
    /// Record with all 31 slots absent.
    pub fn empty(
        station_code: impl Into<String>,
        reference: Month,
        consistency: ConsistencyLevel,
        variable_prefix: impl Into<String>,
    ) -> Self {
        Self {
            station_code: station_code.into(),
            reference,
            consistency,
            variable_prefix: variable_prefix.into(),
            day_values: vec![DaySlot::Absent; DAY_SLOTS],
        }
    }

    /// Sets the slot of `day` (1-based). Days outside `1..=31` are ignored.
    pub fn with_day(mut self, day: u32, slot: impl Into<DaySlot>) -> Self {
        if let Some(target) = day
            .checked_sub(1)
            .and_then(|index| self.day_values.get_mut(index as usize))
        {
            *target = slot.into();
        }
        self
    }
}

impl From<f64> for DaySlot {
    fn from(value: f64) -> Self {
        DaySlot::Number(value)
    }
}

impl From<&str> for DaySlot {
    fn from(value: &str) -> Self {
        DaySlot::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(DaySlot::from_text(None), DaySlot::Absent);
        assert_eq!(DaySlot::from_text(Some("")), DaySlot::Absent);
        assert_eq!(DaySlot::from_text(Some("   ")), DaySlot::Absent);
        assert_eq!(
            DaySlot::from_text(Some(" 12.5 ")),
            DaySlot::Text("12.5".to_string())
        );
        assert!(DaySlot::Text(" ".into()).is_absent());
    }

    #[test]
    fn empty_record_has_31_absent_slots() {
        let record = StationMonthRecord::empty("02045012", Month(2024, 6), ConsistencyLevel::Raw, "Chuva");
        assert_eq!(record.day_values.len(), DAY_SLOTS);
        assert!(record.day_values.iter().all(DaySlot::is_absent));
    }

    #[test]
    fn with_day_sets_one_based_slot() {
        let record = StationMonthRecord::empty("1", Month(2024, 6), ConsistencyLevel::Raw, "Chuva")
            .with_day(1, 4.0)
            .with_day(31, "7.5")
            .with_day(0, 1.0)
            .with_day(32, 1.0);
        assert_eq!(record.day_values[0], DaySlot::Number(4.0));
        assert_eq!(record.day_values[30], DaySlot::Text("7.5".into()));
        assert_eq!(record.day_values.len(), DAY_SLOTS);
    }
}
