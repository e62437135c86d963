//! Polygonal areas read from GeoJSON and point-in-polygon tests.
//!
//! Coordinates are `[longitude, latitude]` pairs as GeoJSON writes them.
//! Every feature of a collection is merged into one area, and a point on a
//! polygon edge counts as inside it.

use crate::geometry::error::GeometryError;
use serde::Deserialize;

const EDGE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeoJson {
    FeatureCollection {
        features: Vec<GeoJson>,
    },
    Feature {
        geometry: Option<Box<GeoJson>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJson>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Vec<[f64; 2]>,
    holes: Vec<Vec<[f64; 2]>>,
}

/// A union of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RingPosition {
    Inside,
    Boundary,
    Outside,
}

impl Polygon {
    /// Builds a polygon from its exterior ring and optional holes. Rings may
    /// be open or closed.
    pub fn new(exterior: Vec<[f64; 2]>, holes: Vec<Vec<[f64; 2]>>) -> Result<Self, GeometryError> {
        for ring in std::iter::once(&exterior).chain(holes.iter()) {
            if distinct_vertices(ring) < 3 {
                return Err(GeometryError::InvalidRing(format!(
                    "a ring needs at least 3 distinct vertices, found {}",
                    distinct_vertices(ring)
                )));
            }
        }
        Ok(Self { exterior, holes })
    }

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        let point = [longitude, latitude];
        match ring_position(&self.exterior, point) {
            RingPosition::Outside => false,
            RingPosition::Boundary => true,
            RingPosition::Inside => self
                .holes
                .iter()
                .all(|hole| ring_position(hole, point) != RingPosition::Inside),
        }
    }
}

impl Region {
    pub fn new(polygons: Vec<Polygon>) -> Result<Self, GeometryError> {
        if polygons.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(Self { polygons })
    }

    /// Parses a GeoJSON document (feature collection, feature or bare
    /// geometry).
    pub fn from_geojson(bytes: &[u8]) -> Result<Self, GeometryError> {
        let document: GeoJson = serde_json::from_slice(bytes)?;
        let mut polygons = Vec::new();
        collect_polygons(document, &mut polygons)?;
        Self::new(polygons)
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        self.polygons
            .iter()
            .any(|polygon| polygon.contains(longitude, latitude))
    }

    /// `([min_lon, min_lat], [max_lon, max_lat])` over all exterior rings.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for vertex in self.polygons.iter().flat_map(|p| p.exterior.iter()) {
            for axis in 0..2 {
                min[axis] = min[axis].min(vertex[axis]);
                max[axis] = max[axis].max(vertex[axis]);
            }
        }
        (min, max)
    }
}

fn collect_polygons(object: GeoJson, out: &mut Vec<Polygon>) -> Result<(), GeometryError> {
    match object {
        GeoJson::FeatureCollection { features } => {
            for feature in features {
                collect_polygons(feature, out)?;
            }
        }
        GeoJson::Feature { geometry } => {
            if let Some(geometry) = geometry {
                collect_polygons(*geometry, out)?;
            }
        }
        GeoJson::GeometryCollection { geometries } => {
            for geometry in geometries {
                collect_polygons(geometry, out)?;
            }
        }
        GeoJson::Polygon { coordinates } => out.push(polygon_from_rings(coordinates)?),
        GeoJson::MultiPolygon { coordinates } => {
            for rings in coordinates {
                out.push(polygon_from_rings(rings)?);
            }
        }
        GeoJson::Other => return Err(GeometryError::Unsupported),
    }
    Ok(())
}

fn polygon_from_rings(rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon, GeometryError> {
    let mut rings = rings.into_iter().map(ring_from_positions);
    let exterior = rings
        .next()
        .ok_or_else(|| GeometryError::InvalidRing("polygon without exterior ring".into()))??;
    let holes = rings.collect::<Result<Vec<_>, _>>()?;
    Polygon::new(exterior, holes)
}

fn ring_from_positions(positions: Vec<Vec<f64>>) -> Result<Vec<[f64; 2]>, GeometryError> {
    positions
        .into_iter()
        .map(|position| match position.as_slice() {
            [longitude, latitude, ..] => Ok([*longitude, *latitude]),
            _ => Err(GeometryError::InvalidRing(format!(
                "position {position:?} needs longitude and latitude"
            ))),
        })
        .collect()
}

fn distinct_vertices(ring: &[[f64; 2]]) -> usize {
    let mut distinct: Vec<[f64; 2]> = Vec::new();
    for vertex in ring {
        if !distinct.contains(vertex) {
            distinct.push(*vertex);
        }
    }
    distinct.len()
}

/// Even-odd ray casting, with an explicit edge check first.
fn ring_position(ring: &[[f64; 2]], point: [f64; 2]) -> RingPosition {
    let mut inside = false;
    for (index, a) in ring.iter().enumerate() {
        let b = ring[(index + 1) % ring.len()];
        if on_segment(*a, b, point) {
            return RingPosition::Boundary;
        }
        if (a[1] > point[1]) != (b[1] > point[1]) {
            let crossing = a[0] + (point[1] - a[1]) * (b[0] - a[0]) / (b[1] - a[1]);
            if point[0] < crossing {
                inside = !inside;
            }
        }
    }
    if inside {
        RingPosition::Inside
    } else {
        RingPosition::Outside
    }
}

fn on_segment(a: [f64; 2], b: [f64; 2], p: [f64; 2]) -> bool {
    let cross = (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    let scale = (b[0] - a[0]).abs().max((b[1] - a[1]).abs()).max(1.0);
    cross.abs() <= EDGE_TOLERANCE * scale
        && p[0] >= a[0].min(b[0]) - EDGE_TOLERANCE
        && p[0] <= a[0].max(b[0]) + EDGE_TOLERANCE
        && p[1] >= a[1].min(b[1]) - EDGE_TOLERANCE
        && p[1] <= a[1].max(b[1]) + EDGE_TOLERANCE
}
