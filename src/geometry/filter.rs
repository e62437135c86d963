use crate::geometry::error::GeometryError;
use crate::geometry::region::Region;
use crate::types::station::Station;
use log::{debug, info};
use rstar::primitives::GeomWithData;
use rstar::{Envelope, RTree, SelectionFunction, AABB};
use std::path::Path;

/// Station position `[longitude, latitude]` tagged with its index in the
/// input slice.
type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Walks only the tree nodes overlapping the area's bounding box.
struct WithinBounds(AABB<[f64; 2]>);

impl SelectionFunction<IndexedPoint> for WithinBounds {
    fn should_unpack_parent(&self, envelope: &AABB<[f64; 2]>) -> bool {
        self.0.intersects(envelope)
    }

    fn should_unpack_leaf(&self, leaf: &IndexedPoint) -> bool {
        self.0.contains_point(leaf.geom())
    }
}

/// Selects the stations located inside a polygonal area.
#[derive(Debug, Clone)]
pub struct GeometryFilter {
    region: Region,
}

impl GeometryFilter {
    pub fn new(region: Region) -> Self {
        Self { region }
    }

    /// Reads the area from a GeoJSON file.
    pub async fn from_path(path: &Path) -> Result<Self, GeometryError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GeometryError::Read(path.to_path_buf(), e))?;
        let region = Region::from_geojson(&bytes)?;
        info!(
            "Loaded {} polygon(s) from {}",
            region.polygons().len(),
            path.display()
        );
        Ok(Self::new(region))
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Stations inside the area, in input order. Stations without
    /// coordinates are never selected.
    pub fn select<'a>(&self, stations: &'a [Station]) -> Vec<&'a Station> {
        let points: Vec<IndexedPoint> = stations
            .iter()
            .enumerate()
            .filter_map(|(index, station)| {
                let location = station.location?;
                Some(GeomWithData::new([location.longitude, location.latitude], index))
            })
            .collect();
        let skipped = stations.len() - points.len();
        if skipped > 0 {
            debug!("{} station(s) without coordinates left out of the selection", skipped);
        }

        let tree = RTree::bulk_load(points);
        let (min, max) = self.region.bounds();
        let mut candidates: Vec<usize> = tree
            .locate_with_selection_function(WithinBounds(AABB::from_corners(min, max)))
            .map(|point| point.data)
            .collect();
        candidates.sort_unstable();

        candidates
            .into_iter()
            .map(|index| &stations[index])
            .filter(|station| {
                station
                    .location
                    .is_some_and(|l| self.region.contains(l.longitude, l.latitude))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::region::Polygon;
    use crate::types::station::Location;

    fn station(code: &str, location: Option<(f64, f64)>) -> Station {
        Station {
            code: code.into(),
            name: None,
            kind: None,
            location: location.map(|(longitude, latitude)| Location {
                latitude,
                longitude,
                altitude: None,
            }),
            basin: None,
            sub_basin: None,
            river: None,
            municipality: None,
            state: None,
            responsible: None,
            operator: None,
            telemetric: None,
            fields: vec![],
        }
    }

    fn triangle_filter() -> GeometryFilter {
        let polygon = Polygon::new(vec![[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]], vec![]).unwrap();
        GeometryFilter::new(Region::new(vec![polygon]).unwrap())
    }

    #[test]
    fn selects_stations_inside_in_input_order() {
        let stations = vec![
            station("d", Some((1.0, 1.0))),
            station("outside-bbox", Some((20.0, 20.0))),
            station("inside-bbox-outside-triangle", Some((9.0, 9.0))),
            station("no-location", None),
            station("a", Some((0.0, 5.0))),
            station("b", Some((2.0, 2.0))),
        ];
        let codes: Vec<&str> = triangle_filter()
            .select(&stations)
            .into_iter()
            .map(|s| s.code.as_str())
            .collect();
        assert_eq!(codes, vec!["d", "a", "b"]);
    }

    #[test]
    fn empty_station_list() {
        assert!(triangle_filter().select(&[]).is_empty());
    }

    #[tokio::test]
    async fn reads_geojson_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("area.geojson");
        std::fs::write(
            &path,
            r#"{"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]]}"#,
        )?;
        let filter = GeometryFilter::from_path(&path).await?;
        let stations = vec![station("in", Some((5.0, 5.0))), station("out", Some((-5.0, 5.0)))];
        assert_eq!(filter.select(&stations).len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let err = GeometryFilter::from_path(Path::new("/nonexistent/area.geojson"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeometryError::Read(..)));
    }
}
