//! Client for the ANA HidroWeb service.
//!
//! [`Hidroweb`] fetches station inventories and historic series, reshapes
//! the monthly series into daily observations and exports both as
//! delimited files.

use crate::error::HidrowebError;
use crate::export::csv_exporter::{write_observations, write_stations, CsvOptions};
use crate::geometry::filter::GeometryFilter;
use crate::reshape::reshaper::reshape;
use crate::service::inventory::{self, InventoryFilter};
use crate::service::loader::{ServiceLoader, DEFAULT_BASE_URL};
use crate::service::series::{self, SeriesRequest};
use crate::types::data_kind::{ConsistencyLevel, DataKind, StationKind};
use crate::types::observation::DailyObservation;
use crate::types::record::StationMonthRecord;
use crate::types::station::Station;
use bon::bon;
use chrono::NaiveDate;
use log::{info, warn};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Name of the inventory file written by [`Hidroweb::export_inventory`].
pub const INVENTORY_FILE: &str = "exporta_inventario_hidro.csv";

/// Earliest date requested by bulk exports.
const HISTORY_START: (i32, u32, u32) = (1900, 1, 1);

/// The main client struct for the HidroWeb service.
///
/// # Examples
///
/// ```no_run
/// # use hidroweb::{Hidroweb, HidrowebError, DataKind};
/// # #[tokio::main]
/// # async fn main() -> Result<(), HidrowebError> {
/// let client = Hidroweb::builder().build()?;
/// let observations = client
///     .daily()
///     .station("02045012")
///     .kind(DataKind::Rainfall)
///     .call()
///     .await?;
/// println!("{} daily readings", observations.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Hidroweb {
    loader: ServiceLoader,
}

#[bon]
impl Hidroweb {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(impl Into<String>)`: Optional. Service endpoint. Defaults to [`DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional. Per-request timeout. Defaults to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`HidrowebError::Client`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, HidrowebError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(HidrowebError::Client)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            loader: ServiceLoader::new(base_url, client),
        })
    }

    pub fn base_url(&self) -> &str {
        self.loader.base_url()
    }

    /// Searches the station inventory. Every criterion is optional; unset
    /// criteria match all stations.
    ///
    /// # Arguments
    ///
    /// * `.code_from(impl Into<String>)` / `.code_to(..)`: station code range.
    /// * `.kind(StationKind)`: fluviometric or pluviometric.
    /// * `.name(..)`, `.river(..)`, `.sub_basin(..)`, `.basin(..)`,
    ///   `.municipality(..)`, `.state(..)`: location criteria.
    /// * `.responsible(..)`, `.operator(..)`: agency acronyms.
    /// * `.telemetric(bool)`: telemetry flag.
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub async fn inventory(
        &self,
        #[builder(into)] code_from: Option<String>,
        #[builder(into)] code_to: Option<String>,
        kind: Option<StationKind>,
        #[builder(into)] name: Option<String>,
        #[builder(into)] river: Option<String>,
        #[builder(into)] sub_basin: Option<String>,
        #[builder(into)] basin: Option<String>,
        #[builder(into)] municipality: Option<String>,
        #[builder(into)] state: Option<String>,
        #[builder(into)] responsible: Option<String>,
        #[builder(into)] operator: Option<String>,
        telemetric: Option<bool>,
    ) -> Result<Vec<Station>, HidrowebError> {
        let filter = InventoryFilter {
            code_from,
            code_to,
            kind,
            name,
            river,
            sub_basin,
            basin,
            municipality,
            state,
            responsible,
            operator,
            telemetric,
        };
        self.find_stations(&filter).await
    }

    /// Stations matching `filter`, in service order.
    pub async fn find_stations(&self, filter: &InventoryFilter) -> Result<Vec<Station>, HidrowebError> {
        let rows = self
            .loader
            .rows(inventory::OPERATION, &filter.params(), inventory::ROW_TAG)
            .await?;
        let stations = rows
            .into_iter()
            .map(inventory::decode_station)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stations)
    }

    /// Fetches the monthly records of one station.
    ///
    /// # Arguments
    ///
    /// * `.station(impl Into<String>)`: **Required.** Station code.
    /// * `.kind(DataKind)`: **Required.** Variable to fetch.
    /// * `.start(NaiveDate)` / `.end(NaiveDate)`: Optional. Open when unset.
    /// * `.consistency(ConsistencyLevel)`: Optional. Defaults to [`ConsistencyLevel::Consistent`].
    #[builder]
    pub async fn series(
        &self,
        #[builder(into)] station: String,
        kind: DataKind,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        consistency: Option<ConsistencyLevel>,
    ) -> Result<Vec<StationMonthRecord>, HidrowebError> {
        let request = SeriesRequest {
            station,
            kind,
            start,
            end,
            consistency: Some(consistency.unwrap_or(ConsistencyLevel::Consistent)),
        };
        self.fetch_series(&request).await
    }

    /// Fetches the monthly records described by `request`. A request
    /// without consistency level returns both raw and consistent months.
    pub async fn fetch_series(
        &self,
        request: &SeriesRequest,
    ) -> Result<Vec<StationMonthRecord>, HidrowebError> {
        let rows = self
            .loader
            .rows(series::OPERATION, &request.params(), series::ROW_TAG)
            .await?;
        let records = rows
            .iter()
            .map(|row| series::decode_record(row, request.kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Same arguments as [`Hidroweb::series`], reshaped into date-ordered
    /// daily observations. Fails on the first malformed reading.
    #[builder]
    pub async fn daily(
        &self,
        #[builder(into)] station: String,
        kind: DataKind,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        consistency: Option<ConsistencyLevel>,
    ) -> Result<Vec<DailyObservation>, HidrowebError> {
        let records = self
            .series()
            .station(station)
            .kind(kind)
            .maybe_start(start)
            .maybe_end(end)
            .maybe_consistency(consistency)
            .call()
            .await?;
        Ok(reshape(&records)?)
    }

    /// Writes the inventory matching `filter` to [`INVENTORY_FILE`], then
    /// the full daily history of every data kind each station carries to
    /// `serie_<KIND>_estacao_<code>.csv`. Stations are fetched one after
    /// the other. A series with a malformed reading is logged and gets no
    /// file; the export carries on with the next one. Returns the written
    /// files.
    ///
    /// # Errors
    ///
    /// * [`HidrowebError::OutputDirMissing`] if `dir` is not a directory.
    /// * [`HidrowebError::NoStationsFound`] if the inventory is empty.
    pub async fn export_inventory(
        &self,
        filter: &InventoryFilter,
        dir: &Path,
        options: &CsvOptions,
    ) -> Result<Vec<PathBuf>, HidrowebError> {
        ensure_output_dir(dir).await?;

        let stations = self.find_stations(filter).await?;
        if stations.is_empty() {
            return Err(HidrowebError::NoStationsFound);
        }

        let inventory_path = dir.join(INVENTORY_FILE);
        write_stations(&inventory_path, &stations, options).await?;
        info!("Wrote {} stations to {}", stations.len(), inventory_path.display());
        let mut written = vec![inventory_path];

        let (year, month, day) = HISTORY_START;
        for station in &stations {
            let Some(station_kind) = station.kind.or(filter.kind) else {
                warn!("Station {} has no known type, skipping its series", station.code);
                continue;
            };
            for &kind in station_kind.data_kinds() {
                let request = SeriesRequest {
                    station: station.code.clone(),
                    kind,
                    start: NaiveDate::from_ymd_opt(year, month, day),
                    end: None,
                    consistency: None,
                };
                let records = self.fetch_series(&request).await?;
                let observations = match reshape(&records) {
                    Ok(observations) => observations,
                    Err(e) => {
                        warn!("Skipping {} series of station {}: {}", kind, station.code, e);
                        continue;
                    }
                };

                let path = dir.join(format!(
                    "serie_{}_estacao_{}.csv",
                    kind.file_label(),
                    station.code
                ));
                let options = options.with_value_column(kind.variable_prefix());
                write_observations(&path, &observations, &options).await?;
                info!("Wrote {} {} readings to {}", observations.len(), kind, path.display());
                written.push(path);
            }
        }
        Ok(written)
    }

    /// Exports the daily series of `kind` for every station inside the
    /// polygons of a GeoJSON file, one `dados_estacao_<code>.csv` per
    /// station. Stations without readings in the period, or with a
    /// malformed reading, write no file. Returns the written files.
    ///
    /// # Arguments
    ///
    /// * `.geometry(&Path)`: **Required.** GeoJSON file with the area.
    /// * `.kind(DataKind)`: **Required.** Variable to export.
    /// * `.output_dir(&Path)`: **Required.** Existing output directory.
    /// * `.start(NaiveDate)` / `.end(NaiveDate)`: Optional. Open when unset.
    /// * `.consistency(ConsistencyLevel)`: Optional. Defaults to [`ConsistencyLevel::Consistent`].
    /// * `.options(CsvOptions)`: Optional. Defaults to [`CsvOptions::default`].
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub async fn export_by_geometry(
        &self,
        geometry: &Path,
        kind: DataKind,
        output_dir: &Path,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        consistency: Option<ConsistencyLevel>,
        options: Option<CsvOptions>,
    ) -> Result<Vec<PathBuf>, HidrowebError> {
        ensure_output_dir(output_dir).await?;
        let geometry_filter = GeometryFilter::from_path(geometry).await?;

        let filter = InventoryFilter {
            kind: Some(kind.station_kind()),
            ..InventoryFilter::default()
        };
        let stations = self.find_stations(&filter).await?;
        let selected = geometry_filter.select(&stations);
        info!(
            "{} of {} {} stations lie inside {}",
            selected.len(),
            stations.len(),
            kind.station_kind(),
            geometry.display()
        );

        let options = options
            .unwrap_or_default()
            .with_value_column(kind.variable_prefix());
        let mut written = Vec::new();
        for station in selected {
            let request = SeriesRequest {
                station: station.code.clone(),
                kind,
                start,
                end,
                consistency: Some(consistency.unwrap_or(ConsistencyLevel::Consistent)),
            };
            let records = self.fetch_series(&request).await?;
            if records.is_empty() {
                info!("No {} readings for station {}, skipping", kind, station.code);
                continue;
            }
            let observations = match reshape(&records) {
                Ok(observations) => observations,
                Err(e) => {
                    warn!("Skipping station {}: {}", station.code, e);
                    continue;
                }
            };

            let path = output_dir.join(format!("dados_estacao_{}.csv", station.code));
            write_observations(&path, &observations, &options).await?;
            written.push(path);
        }
        Ok(written)
    }
}

async fn ensure_output_dir(dir: &Path) -> Result<(), HidrowebError> {
    match tokio::fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        _ => Err(HidrowebError::OutputDirMissing(dir.to_path_buf())),
    }
}
