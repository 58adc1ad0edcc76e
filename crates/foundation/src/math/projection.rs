use serde::Serialize;

use super::{GeoPoint, Vec2};

/// A geographic point projected onto the canvas.
///
/// `depth` is the signed distance towards the viewer along +Z. Points with
/// `depth <= 0` sit on the far hemisphere and are occluded by the sphere.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl ProjectedPoint {
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_front_facing(&self) -> bool {
        self.depth > 0.0
    }
}

/// Orthographic sphere projection with the camera on +Z looking at the origin.
///
/// Rotation spins the sphere around its vertical axis by adding to longitude.
/// There is no perspective: depth only decides front/back visibility.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphericalProjector {
    pub center: Vec2,
    pub radius: f64,
}

impl SphericalProjector {
    pub fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn project(&self, point: GeoPoint, rotation_rad: f64) -> ProjectedPoint {
        let phi = point.lat_rad();
        let lambda = point.lon_rad() + rotation_rad;
        let cos_phi = phi.cos();

        let x = self.radius * cos_phi * lambda.sin();
        let y = -self.radius * phi.sin();
        let z = self.radius * cos_phi * lambda.cos();

        ProjectedPoint {
            x: self.center.x + x,
            y: self.center.y + y,
            depth: z,
        }
    }
}

pub fn project(point: GeoPoint, rotation_rad: f64, center: Vec2, radius: f64) -> ProjectedPoint {
    SphericalProjector::new(center, radius).project(point, rotation_rad)
}

#[cfg(test)]
mod tests {
    use super::{SphericalProjector, project};
    use crate::math::{GeoPoint, Vec2};
    use std::f64::consts::TAU;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn projection_is_periodic_in_rotation() {
        let projector = SphericalProjector::new(Vec2::new(320.0, 240.0), 150.0);
        let p = GeoPoint::new(17.4, 78.5);
        for step in 0..12 {
            let rot = step as f64 * 0.37;
            let a = projector.project(p, rot);
            let b = projector.project(p, rot + TAU);
            assert_close(a.x, b.x, 1e-9);
            assert_close(a.y, b.y, 1e-9);
            assert_close(a.depth, b.depth, 1e-9);
        }
    }

    #[test]
    fn camera_facing_meridian_has_max_depth() {
        let r = 200.0;
        let center = Vec2::new(10.0, 20.0);
        let rotation: f64 = 0.25;
        let lat: f64 = 30.0;
        let p = GeoPoint::new(lat, -rotation.to_degrees());
        let out = project(p, rotation, center, r);
        assert_close(out.depth, r * lat.to_radians().cos(), 1e-9);
        assert_close(out.x, center.x, 1e-9);
        assert_close(out.y, center.y - r * lat.to_radians().sin(), 1e-9);
        assert!(out.is_front_facing());
    }

    #[test]
    fn opposite_meridian_is_back_facing() {
        let r = 120.0;
        let rotation: f64 = 0.5;
        for lat in [-90.0f64, -45.0, 0.0, 12.5, 60.0, 90.0] {
            let p = GeoPoint::new(lat, -rotation.to_degrees() + 180.0);
            let out = project(p, rotation, Vec2::ZERO, r);
            let lat_rad = lat.to_radians();
            assert_close(out.depth, -r * lat_rad.cos(), 1e-9);
            assert!(!out.is_front_facing(), "lat {lat} should be occluded");
        }
    }

    #[test]
    fn poles_project_above_and_below_center() {
        let projector = SphericalProjector::new(Vec2::new(0.0, 0.0), 50.0);
        let north = projector.project(GeoPoint::new(90.0, 0.0), 1.2);
        let south = projector.project(GeoPoint::new(-90.0, 0.0), 1.2);
        assert_close(north.y, -50.0, 1e-9);
        assert_close(south.y, 50.0, 1e-9);
        assert_close(north.x, 0.0, 1e-9);
    }

    #[test]
    fn unrotated_k_faces_viewer() {
        let r = 100.0;
        let k = GeoPoint::new(41.6, -72.7);
        let out = project(k, 0.0, Vec2::ZERO, r);
        let expected = r * 41.6f64.to_radians().cos() * (-72.7f64).to_radians().cos();
        assert_close(out.depth, expected, 1e-9);
        assert!(out.is_front_facing());
    }
}
