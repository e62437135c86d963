//! Polars view over reshaped daily observations.

use crate::types::observation::DailyObservation;
use chrono::NaiveDate;
use polars::prelude::{col, lit, Column, DataFrame, DataType, Expr, IntoLazy, LazyFrame, PolarsResult};

/// A wrapper around a Polars `LazyFrame` holding daily observations.
///
/// Columns: `station_code` (str), `date` (date), `consistency_level` (u32)
/// and a nullable `f64` value column named at construction time.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hidroweb::{ConsistencyLevel, DailyFrame, DailyObservation};
///
/// let observations = vec![DailyObservation {
///     station_code: "02045012".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     consistency: ConsistencyLevel::Consistent,
///     value: Some(12.5),
/// }];
/// let frame = DailyFrame::from_observations(&observations, "Chuva").unwrap();
/// let df = frame.frame.collect().unwrap();
/// assert_eq!(df.height(), 1);
/// ```
#[derive(Clone)]
pub struct DailyFrame {
    /// The underlying Polars LazyFrame.
    pub frame: LazyFrame,
}

impl DailyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds the frame from observations, keeping their order.
    pub fn from_observations(
        observations: &[DailyObservation],
        value_column: &str,
    ) -> PolarsResult<Self> {
        let epoch = NaiveDate::default();
        let codes: Vec<&str> = observations
            .iter()
            .map(|o| o.station_code.as_str())
            .collect();
        let days: Vec<i32> = observations
            .iter()
            .map(|o| o.date.signed_duration_since(epoch).num_days() as i32)
            .collect();
        let levels: Vec<u32> = observations
            .iter()
            .map(|o| u32::from(o.consistency.code()))
            .collect();
        let values: Vec<Option<f64>> = observations.iter().map(|o| o.value).collect();

        let df = DataFrame::new(vec![
            Column::new("station_code".into(), codes),
            Column::new("date".into(), days).cast(&DataType::Date)?,
            Column::new("consistency_level".into(), levels),
            Column::new(value_column.into(), values),
        ])?;
        Ok(Self::new(df.lazy()))
    }

    /// Applies a Polars predicate lazily.
    pub fn filter(&self, predicate: Expr) -> DailyFrame {
        DailyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Rows dated between `start` and `end`, both inclusive.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> DailyFrame {
        self.filter(
            col("date")
                .gt_eq(lit(start))
                .and(col("date").lt_eq(lit(end))),
        )
    }

    /// Rows dated `date`; one per station and consistency level at most.
    pub fn get_at(&self, date: NaiveDate) -> DailyFrame {
        self.filter(col("date").eq(lit(date)))
    }
}
