use serde::Serialize;

/// Geographic coordinates in degrees on a unit sphere (no ellipsoid, no altitude).
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    /// Builds a point from degrees.
    ///
    /// Inputs are not clamped. Callers hand in fixed constants, so an
    /// out-of-range value is a programmer error and trips a debug assertion.
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        let p = Self { lat_deg, lon_deg };
        debug_assert!(p.is_in_range(), "geo point out of range: {p:?}");
        p
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat_deg) && (-180.0..=180.0).contains(&self.lon_deg)
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon_deg.to_radians()
    }
}
