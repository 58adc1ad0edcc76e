use foundation::math::GeoPoint;
use serde::Serialize;

use crate::color::Rgba;
use crate::surface::MAX_DEVICE_PIXEL_RATIO;

/// First endpoint of the connection (Connecticut).
pub const POINT_K: GeoPoint = GeoPoint {
    lat_deg: 41.6,
    lon_deg: -72.7,
};

/// Second endpoint of the connection (Hyderabad).
pub const POINT_M: GeoPoint = GeoPoint {
    lat_deg: 17.4,
    lon_deg: 78.5,
};

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub silhouette: Rgba,
    pub edge: Rgba,
    pub grid: Rgba,
    pub arc: Rgba,
    pub k_dot: Rgba,
    pub k_halo: Rgba,
    pub m_dot: Rgba,
    pub m_halo: Rgba,
    pub vignette_inner: Rgba,
    pub vignette_outer: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            silhouette: Rgba::new(43, 43, 43, 0.06),
            edge: Rgba::new(127, 155, 182, 0.22),
            grid: Rgba::new(127, 155, 182, 0.14),
            arc: Rgba::new(183, 155, 92, 0.22),
            k_dot: Rgba::new(127, 155, 182, 0.85),
            k_halo: Rgba::new(127, 155, 182, 0.20),
            m_dot: Rgba::new(183, 155, 92, 0.80),
            m_halo: Rgba::new(183, 155, 92, 0.18),
            vignette_inner: Rgba::new(251, 250, 247, 0.0),
            vignette_outer: Rgba::new(251, 250, 247, 0.65),
        }
    }
}

/// Fixed globe constants. Every length is a fraction of the sphere radius,
/// which itself is a fraction of the smaller canvas side.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GlobeConfig {
    pub radius_fraction: f64,
    /// Radians of spin per millisecond of scheduler time.
    pub rotation_rate_per_ms: f64,
    /// Radians of spin added at full scroll progress.
    pub scroll_coupling: f64,
    pub arc_lift_base: f64,
    pub arc_lift_variance: f64,
    pub grid_step_deg: i32,
    pub grid_extent_deg: i32,
    /// Minor/major axis ratio of the grid ellipses.
    pub grid_flattening: f64,
    pub max_device_pixel_ratio: f64,
    /// Opacity multiplier for markers on the far hemisphere.
    pub back_facing_marker_alpha: f64,
    pub point_k: GeoPoint,
    pub point_m: GeoPoint,
    pub palette: Palette,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            radius_fraction: 0.33,
            rotation_rate_per_ms: 0.00008,
            scroll_coupling: 0.35,
            arc_lift_base: 0.12,
            arc_lift_variance: 0.05,
            grid_step_deg: 10,
            grid_extent_deg: 80,
            grid_flattening: 0.22,
            max_device_pixel_ratio: MAX_DEVICE_PIXEL_RATIO,
            back_facing_marker_alpha: 0.35,
            point_k: POINT_K,
            point_m: POINT_M,
            palette: Palette::default(),
        }
    }
}

impl GlobeConfig {
    /// Grid sample angles in degrees, `-extent..=extent` by `step`.
    pub fn grid_samples(&self) -> impl Iterator<Item = i32> + use<> {
        let extent = self.grid_extent_deg.abs();
        let step = self.grid_step_deg.max(1) as usize;
        (-extent..=extent).step_by(step)
    }
}
