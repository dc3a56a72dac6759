use std::str::FromStr;

use serde::Serialize;

/// Geographic rectangle used for the spatial filter.
///
/// On the wire this is the map collaborator's `[[minLon, minLat], [maxLon,
/// maxLat]]` pair; containment is strict, so points exactly on an edge fall
/// outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapBounds {
    pub min_longitude: f64,
    pub min_latitude: f64,
    pub max_longitude: f64,
    pub max_latitude: f64,
}

impl MapBounds {
    /// Build bounds from the two corner points.
    #[must_use]
    pub fn new(min_longitude: f64, min_latitude: f64, max_longitude: f64, max_latitude: f64) -> Self {
        Self {
            min_longitude,
            min_latitude,
            max_longitude,
            max_latitude,
        }
    }

    /// Build bounds from the wire shape `[[minLon, minLat], [maxLon, maxLat]]`.
    #[must_use]
    pub fn from_corners(corners: [[f64; 2]; 2]) -> Self {
        let [[min_longitude, min_latitude], [max_longitude, max_latitude]] = corners;
        Self::new(min_longitude, min_latitude, max_longitude, max_latitude)
    }

    /// Return `true` when the point lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        longitude > self.min_longitude
            && longitude < self.max_longitude
            && latitude > self.min_latitude
            && latitude < self.max_latitude
    }
}

impl FromStr for MapBounds {
    type Err = String;

    /// Parse the CLI shape `minLon,minLat,maxLon,maxLat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let &[min_lon, min_lat, max_lon, max_lat] = parts.as_slice() else {
            return Err(format!("expected minLon,minLat,maxLon,maxLat, got '{s}'"));
        };
        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| format!("'{part}' is not a coordinate"))
        };
        Ok(Self::new(
            parse(min_lon)?,
            parse(min_lat)?,
            parse(max_lon)?,
            parse(max_lat)?,
        ))
    }
}
