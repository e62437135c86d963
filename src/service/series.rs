//! `HidroSerieHistorica`: monthly rows of one station's historic series.

use crate::calendar::{slot_column, DAY_SLOTS};
use crate::service::error::FetchError;
use crate::service::xml::XmlRow;
use crate::types::data_kind::{ConsistencyLevel, DataKind};
use crate::types::month::Month;
use crate::types::record::{DaySlot, StationMonthRecord};
use chrono::NaiveDate;

pub(crate) const OPERATION: &str = "HidroSerieHistorica";
pub(crate) const ROW_TAG: &str = "SerieHistorica";

/// Parameters of one historic series request.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub station: String,
    pub kind: DataKind,
    /// First date to include. `None` leaves the start open.
    pub start: Option<NaiveDate>,
    /// Last date to include. `None` requests up to the latest reading.
    pub end: Option<NaiveDate>,
    /// `None` asks the service for every consistency level.
    pub consistency: Option<ConsistencyLevel>,
}

impl SeriesRequest {
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("codEstacao", self.station.clone()),
            ("tipoDados", self.kind.code().to_string()),
            ("dataInicio", format_service_date(self.start)),
            ("dataFim", format_service_date(self.end)),
            (
                "nivelConsistencia",
                self.consistency
                    .map(|level| level.code().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }
}

fn format_service_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

/// Builds a station-month record from a series row. Day columns that are
/// missing or empty become [`DaySlot::Absent`]; their content is otherwise
/// kept as text and validated by the reshaper.
pub(crate) fn decode_record(row: &XmlRow, kind: DataKind) -> Result<StationMonthRecord, FetchError> {
    let station_code = required(row, "EstacaoCodigo")?.to_string();

    let raw_month = required(row, "DataHora")?;
    let reference = parse_reference_month(raw_month).ok_or_else(|| invalid("DataHora", raw_month))?;

    let raw_level = required(row, "NivelConsistencia")?;
    let consistency = raw_level
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(ConsistencyLevel::from_code)
        .ok_or_else(|| invalid("NivelConsistencia", raw_level))?;

    let prefix = kind.variable_prefix();
    let day_values = (1..=DAY_SLOTS as u32)
        .map(|day| DaySlot::from_text(row.get(&slot_column(prefix, day))))
        .collect();

    Ok(StationMonthRecord {
        station_code,
        reference,
        consistency,
        variable_prefix: prefix.to_string(),
        day_values,
    })
}

/// Year and month of a `DataHora` value. Accepts `yyyy-mm-dd[ hh:mm:ss]`
/// and `dd/mm/yyyy[ hh:mm:ss]`; the day and time are ignored.
pub(crate) fn parse_reference_month(text: &str) -> Option<Month> {
    let date_part = text.trim().split([' ', 'T']).next()?;
    let parts: Vec<&str> = if date_part.contains('/') {
        date_part.split('/').rev().collect()
    } else {
        date_part.split('-').collect()
    };
    match parts.as_slice() {
        [year, month, ..] => Some(Month(year.parse().ok()?, month.parse().ok()?)),
        _ => None,
    }
}

fn required<'a>(row: &'a XmlRow, field: &str) -> Result<&'a str, FetchError> {
    row.get(field).ok_or_else(|| FetchError::MissingField {
        table: ROW_TAG.to_string(),
        field: field.to_string(),
    })
}

fn invalid(field: &str, value: &str) -> FetchError {
    FetchError::InvalidField {
        table: ROW_TAG.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::xml::decode_rows;

    const SERIES_XML: &[u8] = b"<NewDataSet>
<SerieHistorica>
    <EstacaoCodigo>12345678</EstacaoCodigo>
    <DataHora>2024-06-01 00:00:00</DataHora>
    <NivelConsistencia>2</NivelConsistencia>
    <Chuva01>10.0</Chuva01>
    <Chuva01Status>1</Chuva01Status>
    <Chuva02>5.0</Chuva02>
    <Chuva03></Chuva03>
</SerieHistorica>
</NewDataSet>";

    fn row(xml: &[u8]) -> XmlRow {
        decode_rows(xml, ROW_TAG).unwrap().remove(0)
    }

    #[test]
    fn params_follow_service_names() {
        let request = SeriesRequest {
            station: "12345678".into(),
            kind: DataKind::Rainfall,
            start: NaiveDate::from_ymd_opt(2024, 6, 1),
            end: None,
            consistency: Some(ConsistencyLevel::Consistent),
        };
        assert_eq!(
            request.params(),
            vec![
                ("codEstacao", "12345678".to_string()),
                ("tipoDados", "2".to_string()),
                ("dataInicio", "01/06/2024".to_string()),
                ("dataFim", String::new()),
                ("nivelConsistencia", "2".to_string()),
            ]
        );
    }

    #[test]
    fn decodes_a_series_row() {
        let record = decode_record(&row(SERIES_XML), DataKind::Rainfall).unwrap();
        assert_eq!(record.station_code, "12345678");
        assert_eq!(record.reference, Month(2024, 6));
        assert_eq!(record.consistency, ConsistencyLevel::Consistent);
        assert_eq!(record.variable_prefix, "Chuva");
        assert_eq!(record.day_values.len(), 31);
        assert_eq!(record.day_values[0], DaySlot::Text("10.0".into()));
        assert_eq!(record.day_values[1], DaySlot::Text("5.0".into()));
        assert!(record.day_values[2..].iter().all(|slot| *slot == DaySlot::Absent));
    }

    #[test]
    fn reads_only_the_requested_variable() {
        let record = decode_record(&row(SERIES_XML), DataKind::Flow).unwrap();
        assert_eq!(record.variable_prefix, "Vazao");
        assert!(record.day_values.iter().all(|slot| *slot == DaySlot::Absent));
    }

    #[test]
    fn missing_station_code_is_reported() {
        let xml = b"<a><SerieHistorica><DataHora>2024-06-01</DataHora><NivelConsistencia>1</NivelConsistencia></SerieHistorica></a>";
        let err = decode_record(&row(xml), DataKind::Rainfall).unwrap_err();
        assert!(matches!(err, FetchError::MissingField { ref field, .. } if field == "EstacaoCodigo"));
    }

    #[test]
    fn unknown_consistency_level_is_invalid() {
        let xml = b"<a><SerieHistorica><EstacaoCodigo>1</EstacaoCodigo><DataHora>2024-06-01</DataHora><NivelConsistencia>7</NivelConsistencia></SerieHistorica></a>";
        let err = decode_record(&row(xml), DataKind::Rainfall).unwrap_err();
        assert!(matches!(err, FetchError::InvalidField { ref value, .. } if value == "7"));
    }

    #[test]
    fn reference_month_ignores_day_and_time() {
        assert_eq!(parse_reference_month("2024-06-01 00:00:00"), Some(Month(2024, 6)));
        assert_eq!(parse_reference_month("2024-02-30"), Some(Month(2024, 2)));
        assert_eq!(parse_reference_month("1998-11-01T00:00:00"), Some(Month(1998, 11)));
        assert_eq!(parse_reference_month("01/03/1975 00:00:00"), Some(Month(1975, 3)));
        assert_eq!(parse_reference_month("junho"), None);
        assert_eq!(parse_reference_month(""), None);
    }
}
