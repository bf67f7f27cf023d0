//! Coordinate-to-pixel projection for the decorative map. A pure linear
//! transform; north is up, so the y axis is flipped.

/// Geographic bounding box of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Bounding box covering Iran.
pub const IRAN_BOUNDS: MapBounds = MapBounds {
    min_lat: 25.0,
    max_lat: 40.0,
    min_lon: 44.0,
    max_lon: 63.5,
};

impl MapBounds {
    /// Project a coordinate onto a `width` x `height` surface.
    pub fn to_xy(&self, latitude: f64, longitude: f64, width: f64, height: f64) -> (f64, f64) {
        let x = (longitude - self.min_lon) / (self.max_lon - self.min_lon) * width;
        let y = (self.max_lat - latitude) / (self.max_lat - self.min_lat) * height;
        (x, y)
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }
}
