//! Delimited-text export of daily observations and station inventories.

use crate::export::error::ExportError;
use crate::types::observation::DailyObservation;
use crate::types::station::Station;
use bon::bon;
use csv::WriterBuilder;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use tokio::task;

/// Formatting of the exported files.
///
/// Defaults follow the HidroWeb convention for spreadsheets in Brazilian
/// locale: `;` between fields and `,` as decimal separator.
///
/// # Examples
///
/// ```
/// use hidroweb::CsvOptions;
///
/// let options = CsvOptions::builder()
///     .separator(b',')
///     .decimal_separator('.')
///     .value_column("Vazao")
///     .build();
/// assert_eq!(options.separator, b',');
/// assert_eq!(CsvOptions::default().separator, b';');
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    pub separator: u8,
    pub decimal_separator: char,
    /// Header of the value column of daily files.
    pub value_column: String,
}

#[bon]
impl CsvOptions {
    /// # Arguments
    ///
    /// * `.separator(u8)`: Optional. Field separator. Defaults to `b';'`.
    /// * `.decimal_separator(char)`: Optional. Defaults to `','`.
    /// * `.value_column(impl Into<String>)`: Optional. Defaults to `"value"`.
    #[builder]
    pub fn new(
        separator: Option<u8>,
        decimal_separator: Option<char>,
        #[builder(into)] value_column: Option<String>,
    ) -> Self {
        Self {
            separator: separator.unwrap_or(b';'),
            decimal_separator: decimal_separator.unwrap_or(','),
            value_column: value_column.unwrap_or_else(|| "value".to_string()),
        }
    }

    /// Same options with another value column header.
    pub fn with_value_column(&self, value_column: impl Into<String>) -> Self {
        Self {
            value_column: value_column.into(),
            ..self.clone()
        }
    }

    fn format_value(&self, value: f64) -> String {
        let text = value.to_string();
        if self.decimal_separator == '.' {
            text
        } else {
            text.replace('.', &self.decimal_separator.to_string())
        }
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Writes one row per observation under the header
/// `station_code, date, consistency_level, <value_column>`.
/// Missing values are written as empty fields.
pub fn write_observations_to<W: io::Write>(
    writer: W,
    observations: &[DailyObservation],
    options: &CsvOptions,
) -> Result<(), csv::Error> {
    let mut csv = WriterBuilder::new()
        .delimiter(options.separator)
        .from_writer(writer);
    csv.write_record([
        "station_code",
        "date",
        "consistency_level",
        options.value_column.as_str(),
    ])?;
    for observation in observations {
        csv.write_record([
            observation.station_code.clone(),
            observation.date.format("%Y-%m-%d").to_string(),
            observation.consistency.code().to_string(),
            observation
                .value
                .map(|v| options.format_value(v))
                .unwrap_or_default(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Writes every inventory column, in the order the columns first appear
/// across `stations`. Values are written as the service returned them.
pub fn write_stations_to<W: io::Write>(
    writer: W,
    stations: &[Station],
    options: &CsvOptions,
) -> Result<(), csv::Error> {
    let mut seen = HashSet::new();
    let columns: Vec<&str> = stations
        .iter()
        .flat_map(|station| station.fields.iter().map(|(name, _)| name.as_str()))
        .filter(|name| seen.insert(*name))
        .collect();

    let mut csv = WriterBuilder::new()
        .delimiter(options.separator)
        .from_writer(writer);
    if columns.is_empty() {
        return Ok(());
    }
    csv.write_record(&columns)?;
    for station in stations {
        csv.write_record(columns.iter().map(|column| station.field(column).unwrap_or("")))?;
    }
    csv.flush()?;
    Ok(())
}

/// File variant of [`write_observations_to`], run on the blocking pool.
pub async fn write_observations(
    path: &Path,
    observations: &[DailyObservation],
    options: &CsvOptions,
) -> Result<(), ExportError> {
    let path = path.to_path_buf();
    let observations = observations.to_vec();
    let options = options.clone();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path).map_err(|e| ExportError::Io(path.clone(), e))?;
        write_observations_to(io::BufWriter::new(file), &observations, &options)
            .map_err(|e| ExportError::Csv(path, e))
    })
    .await?
}

/// File variant of [`write_stations_to`], run on the blocking pool.
pub async fn write_stations(
    path: &Path,
    stations: &[Station],
    options: &CsvOptions,
) -> Result<(), ExportError> {
    let path = path.to_path_buf();
    let stations = stations.to_vec();
    let options = options.clone();
    task::spawn_blocking(move || {
        let file = std::fs::File::create(&path).map_err(|e| ExportError::Io(path.clone(), e))?;
        write_stations_to(io::BufWriter::new(file), &stations, &options)
            .map_err(|e| ExportError::Csv(path, e))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::data_kind::ConsistencyLevel;
    use chrono::NaiveDate;

    fn observation(day: u32, value: Option<f64>) -> DailyObservation {
        DailyObservation {
            station_code: "02045012".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            consistency: ConsistencyLevel::Consistent,
            value,
        }
    }

    fn station(fields: &[(&str, Option<&str>)]) -> Station {
        Station {
            code: "1".into(),
            name: None,
            kind: None,
            location: None,
            basin: None,
            sub_basin: None,
            river: None,
            municipality: None,
            state: None,
            responsible: None,
            operator: None,
            telemetric: None,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        }
    }

    fn render(observations: &[DailyObservation], options: &CsvOptions) -> String {
        let mut out = Vec::new();
        write_observations_to(&mut out, observations, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_options_use_semicolon_and_decimal_comma() {
        let options = CsvOptions::default().with_value_column("Chuva");
        let text = render(&[observation(1, Some(10.5)), observation(2, None)], &options);
        assert_eq!(
            text,
            "station_code;date;consistency_level;Chuva\n\
             02045012;2024-06-01;2;10,5\n\
             02045012;2024-06-02;2;\n"
        );
    }

    #[test]
    fn custom_separators() {
        let options = CsvOptions::builder()
            .separator(b'\t')
            .decimal_separator('.')
            .build();
        let text = render(&[observation(3, Some(0.25))], &options);
        assert_eq!(
            text,
            "station_code\tdate\tconsistency_level\tvalue\n02045012\t2024-06-03\t2\t0.25\n"
        );
    }

    #[test]
    fn decimal_comma_is_quoted_when_it_is_also_the_field_separator() {
        let options = CsvOptions::builder().separator(b',').build();
        let text = render(&[observation(1, Some(1.5))], &options);
        assert!(text.ends_with("02045012,2024-06-01,2,\"1,5\"\n"));
    }

    #[test]
    fn empty_series_writes_only_the_header() {
        let text = render(&[], &CsvOptions::default());
        assert_eq!(text, "station_code;date;consistency_level;value\n");
    }

    #[test]
    fn stations_export_union_of_columns() {
        let stations = vec![
            station(&[("Codigo", Some("1")), ("Nome", Some("A"))]),
            station(&[("Codigo", Some("2")), ("Latitude", Some("-21.5")), ("Nome", None)]),
        ];
        let mut out = Vec::new();
        write_stations_to(&mut out, &stations, &CsvOptions::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Codigo;Nome;Latitude\n1;A;\n2;;-21.5\n"
        );
    }

    #[tokio::test]
    async fn writes_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("dados_estacao_02045012.csv");
        write_observations(&path, &[observation(1, Some(2.0))], &CsvOptions::default()).await?;
        let text = std::fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("02045012;2024-06-01;2;2"));
        Ok(())
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let err = write_stations(&path, &[], &CsvOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Io(p, _) if p == path));
    }
}
