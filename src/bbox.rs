//! Bounding box extraction from uploaded GeoJSON feature collections.
use crate::error::BboxError;
use geo::BoundingRect;
use geo_types::{Geometry, GeometryCollection};
use serde_json::Value;
use std::fmt;

/// Axis-aligned extent in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingBox {
    pub fn new(minx: f64, miny: f64, maxx: f64, maxy: f64) -> Self {
        Self { minx, miny, maxx, maxy }
    }

    /// Order used by the STAC `bbox` search parameter.
    pub fn to_array(&self) -> [f64; 4] {
        [self.minx, self.miny, self.maxx, self.maxy]
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.minx, self.miny, self.maxx, self.maxy
        )
    }
}

/// Parses `content` as a GeoJSON document with a top level `features` member and returns the
/// extent of every feature geometry. Features with a null geometry are ignored, but at least one
/// feature has to carry a geometry.
pub fn extract_bbox(content: &[u8]) -> Result<BoundingBox, BboxError> {
    let document: Value = serde_json::from_slice(content)?;

    let features = document
        .get("features")
        .ok_or(BboxError::MissingFeatures)?;

    let collection = geometry_collection(features)?;

    let rect = collection
        .bounding_rect()
        .ok_or_else(|| BboxError::Feature("no feature geometries to bound".to_string()))?;

    Ok(BoundingBox::new(
        rect.min().x,
        rect.min().y,
        rect.max().x,
        rect.max().y,
    ))
}

fn geometry_collection(features: &Value) -> Result<GeometryCollection<f64>, BboxError> {
    let features = features
        .as_array()
        .ok_or_else(|| BboxError::Feature("'features' is not an array".to_string()))?;

    let mut geometries: Vec<Geometry<f64>> = vec![];
    for (index, value) in features.iter().enumerate() {
        let feature: geojson::Feature = serde_json::from_value(value.clone())
            .map_err(|e| BboxError::Feature(format!("feature {index}: {e}")))?;

        let Some(geometry) = feature.geometry else {
            continue;
        };

        let geometry = Geometry::<f64>::try_from(geometry)
            .map_err(|e| BboxError::Feature(format!("feature {index}: {e}")))?;
        geometries.push(geometry);
    }

    Ok(GeometryCollection::new_from(geometries))
}
