use foundation::math::{ProjectedPoint, SphericalProjector, Vec2};
use foundation::time::Time;
use tracing::trace;

use crate::color::Rgba;
use crate::command::{DrawCommand, GlobeGeometry, RenderFrame};
use crate::config::GlobeConfig;
use crate::surface::SurfaceSize;

// Fractions of the sphere radius.
const EDGE_WIDTH: f64 = 0.01;
const GRID_WIDTH: f64 = 0.004;
const ARC_WIDTH: f64 = 0.006;
const HALO_WIDTH: f64 = 0.004;
const DOT_RADIUS: f64 = 0.018;
const HALO_RADIUS: f64 = 0.045;
const VIGNETTE_INNER: f64 = 0.2;
const VIGNETTE_OUTER: f64 = 1.15;
const VIGNETTE_EXTENT: f64 = 1.02;

/// Sphere radius for a surface: a fixed share of the smaller side.
pub fn sphere_radius(config: &GlobeConfig, size: SurfaceSize) -> f64 {
    size.min_side() * config.radius_fraction
}

/// Spin angle for a frame. Recomputed from scratch every frame so nothing
/// accumulates between frames.
pub fn rotation(config: &GlobeConfig, time: Time, progress: f64) -> f64 {
    time.as_millis() * config.rotation_rate_per_ms + progress * config.scroll_coupling
}

/// Height of the arc's control point above the chord midpoint.
///
/// Largest at progress 0 and flattening towards the base lift at 1.
pub fn arc_lift(config: &GlobeConfig, radius: f64, progress: f64) -> f64 {
    radius * (config.arc_lift_base + config.arc_lift_variance * (1.0 - progress))
}

fn line_width(radius: f64, fraction: f64) -> f64 {
    (radius * fraction).max(1.0)
}

/// Builds the globe display list for one frame.
///
/// Layers are emitted back to front: silhouette, edge, clipped grid,
/// connecting arc, markers, vignette.
#[derive(Debug, Clone, Default)]
pub struct GlobeRenderer {
    config: GlobeConfig,
}

impl GlobeRenderer {
    pub fn new(config: GlobeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn render(&self, size: SurfaceSize, progress: f64, time: Time) -> RenderFrame {
        let mut frame = RenderFrame::default();
        if size.is_empty() {
            return frame;
        }

        let cfg = &self.config;
        let center = size.center();
        let r = sphere_radius(cfg, size);
        let rot = rotation(cfg, time, progress);

        frame.push(DrawCommand::Clear {
            width: size.width as f64,
            height: size.height as f64,
        });

        frame.push(DrawCommand::FillCircle {
            center,
            radius: r,
            color: cfg.palette.silhouette,
        });
        frame.push(DrawCommand::StrokeCircle {
            center,
            radius: r,
            color: cfg.palette.edge,
            line_width: line_width(r, EDGE_WIDTH),
        });

        self.push_grid(&mut frame, center, r, rot);

        let projector = SphericalProjector::new(center, r);
        let k = projector.project(cfg.point_k, rot);
        let m = projector.project(cfg.point_m, rot);
        let lift = arc_lift(cfg, r, progress);

        // Binary toggle: the arc disappears only once both ends are occluded.
        let arc_drawn = k.is_front_facing() || m.is_front_facing();
        if arc_drawn {
            let mid = k.screen().midpoint(m.screen());
            frame.push(DrawCommand::StrokeQuadratic {
                from: k.screen(),
                control: Vec2::new(mid.x, mid.y - lift),
                to: m.screen(),
                color: cfg.palette.arc,
                line_width: line_width(r, ARC_WIDTH),
            });
        }

        self.push_marker(&mut frame, k, r, cfg.palette.k_dot, cfg.palette.k_halo);
        self.push_marker(&mut frame, m, r, cfg.palette.m_dot, cfg.palette.m_halo);

        frame.push(DrawCommand::RadialVignette {
            center,
            inner_radius: r * VIGNETTE_INNER,
            outer_radius: r * VIGNETTE_OUTER,
            extent_radius: r * VIGNETTE_EXTENT,
            inner: cfg.palette.vignette_inner,
            outer: cfg.palette.vignette_outer,
        });

        trace!(rotation = rot, progress, arc_drawn, "globe frame built");

        frame.geometry = Some(GlobeGeometry {
            center,
            radius: r,
            rotation: rot,
            arc_lift: lift,
            k,
            m,
            arc_drawn,
        });
        frame
    }

    /// Parallels stay put; only the meridians spin with the rotation.
    fn push_grid(&self, frame: &mut RenderFrame, center: Vec2, r: f64, rot: f64) {
        let cfg = &self.config;
        let color = cfg.palette.grid;
        let width = line_width(r, GRID_WIDTH);

        frame.push(DrawCommand::Save);
        frame.push(DrawCommand::Translate { offset: center });
        frame.push(DrawCommand::ClipCircle {
            center: Vec2::ZERO,
            radius: r,
        });

        for lat in cfg.grid_samples() {
            let ring = (lat as f64).to_radians().cos() * r;
            frame.push(DrawCommand::StrokeEllipse {
                center: Vec2::new(0.0, (lat as f64 / 90.0) * r),
                radius_x: ring,
                radius_y: ring * cfg.grid_flattening,
                color,
                line_width: width,
            });
        }

        frame.push(DrawCommand::Rotate { angle: rot });
        for i in cfg.grid_samples() {
            frame.push(DrawCommand::StrokeEllipse {
                center: Vec2::new((i as f64 / 90.0) * r, 0.0),
                radius_x: r * cfg.grid_flattening,
                radius_y: r,
                color,
                line_width: width,
            });
        }

        frame.push(DrawCommand::Restore);
    }

    /// Markers are drawn every frame; occluded ones are faded rather than
    /// hidden so both endpoints stay readable.
    fn push_marker(
        &self,
        frame: &mut RenderFrame,
        p: ProjectedPoint,
        r: f64,
        dot: Rgba,
        halo: Rgba,
    ) {
        let fade = if p.is_front_facing() {
            1.0
        } else {
            self.config.back_facing_marker_alpha
        };
        frame.push(DrawCommand::FillCircle {
            center: p.screen(),
            radius: r * DOT_RADIUS,
            color: dot.scale_alpha(fade),
        });
        frame.push(DrawCommand::StrokeCircle {
            center: p.screen(),
            radius: r * HALO_RADIUS,
            color: halo.scale_alpha(fade),
            line_width: line_width(r, HALO_WIDTH),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{GlobeRenderer, arc_lift, rotation, sphere_radius};
    use crate::command::DrawCommand;
    use crate::config::GlobeConfig;
    use crate::surface::SurfaceSize;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    /// Scheduler time at which the globe has spun by `angle` with no scroll.
    fn time_for_rotation(angle: f64) -> Time {
        Time(angle / GlobeConfig::default().rotation_rate_per_ms)
    }

    fn op_name(c: &DrawCommand) -> &'static str {
        match c {
            DrawCommand::Clear { .. } => "clear",
            DrawCommand::FillCircle { .. } => "fill_circle",
            DrawCommand::StrokeCircle { .. } => "stroke_circle",
            DrawCommand::Save => "save",
            DrawCommand::Restore => "restore",
            DrawCommand::Translate { .. } => "translate",
            DrawCommand::Rotate { .. } => "rotate",
            DrawCommand::ClipCircle { .. } => "clip",
            DrawCommand::StrokeEllipse { .. } => "ellipse",
            DrawCommand::StrokeQuadratic { .. } => "arc",
            DrawCommand::RadialVignette { .. } => "vignette",
        }
    }

    #[test]
    fn rotation_couples_time_and_scroll() {
        let cfg = GlobeConfig::default();
        assert_eq!(rotation(&cfg, Time(0.0), 0.0), 0.0);
        assert_close(rotation(&cfg, Time(1000.0), 0.0), 0.08, 1e-12);
        assert_close(rotation(&cfg, Time(1000.0), 1.0), 0.43, 1e-12);
    }

    #[test]
    fn lift_flattens_as_progress_grows() {
        let cfg = GlobeConfig::default();
        let r = 100.0;
        assert_close(arc_lift(&cfg, r, 0.0), 17.0, 1e-9);
        assert_close(arc_lift(&cfg, r, 1.0), 12.0, 1e-9);
        let mut last = f64::INFINITY;
        for step in 0..=20 {
            let lift = arc_lift(&cfg, r, step as f64 / 20.0);
            assert!(lift < last);
            last = lift;
        }
    }

    #[test]
    fn radius_follows_smaller_side() {
        let cfg = GlobeConfig::default();
        assert_close(sphere_radius(&cfg, SurfaceSize::new(1000, 600)), 198.0, 1e-9);
        assert_close(sphere_radius(&cfg, SurfaceSize::new(300, 900)), 99.0, 1e-9);
    }

    #[test]
    fn layers_are_emitted_back_to_front() {
        let frame = GlobeRenderer::default().render(SurfaceSize::new(800, 600), 0.0, Time(0.0));
        let ops: Vec<&str> = frame.commands.iter().map(op_name).collect();

        let mut expected = vec![
            "clear",
            "fill_circle",
            "stroke_circle",
            "save",
            "translate",
            "clip",
        ];
        expected.extend(std::iter::repeat_n("ellipse", 17));
        expected.push("rotate");
        expected.extend(std::iter::repeat_n("ellipse", 17));
        expected.extend([
            "restore",
            "arc",
            "fill_circle",
            "stroke_circle",
            "fill_circle",
            "stroke_circle",
            "vignette",
        ]);
        assert_eq!(ops, expected);
    }

    #[test]
    fn latitude_rings_are_not_rotated() {
        let renderer = GlobeRenderer::default();
        let size = SurfaceSize::new(600, 600);
        let a = renderer.render(size, 0.0, Time(0.0));
        let b = renderer.render(size, 0.7, Time(5000.0));

        let rings = |f: &crate::command::RenderFrame| -> Vec<DrawCommand> {
            f.commands
                .iter()
                .skip_while(|c| !matches!(c, DrawCommand::ClipCircle { .. }))
                .skip(1)
                .take_while(|c| !matches!(c, DrawCommand::Rotate { .. }))
                .cloned()
                .collect()
        };
        assert_eq!(rings(&a), rings(&b));
        assert_eq!(rings(&a).len(), 17);
    }

    #[test]
    fn equator_ring_spans_full_radius() {
        let size = SurfaceSize::new(500, 500);
        let frame = GlobeRenderer::default().render(size, 0.0, Time(0.0));
        let r = frame.geometry.expect("geometry").radius;
        let equator = frame
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::StrokeEllipse {
                    center,
                    radius_x,
                    radius_y,
                    ..
                } if center.y == 0.0 && center.x == 0.0 => Some((*radius_x, *radius_y)),
                _ => None,
            })
            .expect("equator ring");
        assert_close(equator.0, r, 1e-9);
        assert_close(equator.1, 0.22 * r, 1e-9);
    }

    #[test]
    fn arc_is_skipped_when_both_ends_are_occluded() {
        // Half a turn puts both endpoints on the far side.
        let frame = GlobeRenderer::default().render(
            SurfaceSize::new(800, 800),
            0.0,
            time_for_rotation(std::f64::consts::PI),
        );
        let g = frame.geometry.expect("geometry");
        assert!(!g.k.is_front_facing());
        assert!(!g.m.is_front_facing());
        assert!(!g.arc_drawn);
        assert!(!frame.has_arc());
    }

    #[test]
    fn arc_presence_tracks_endpoint_visibility() {
        let renderer = GlobeRenderer::default();
        let size = SurfaceSize::new(640, 480);
        let mut saw_hidden = false;
        for step in 0..360 {
            let t = time_for_rotation((step as f64).to_radians());
            let frame = renderer.render(size, 0.0, t);
            let g = frame.geometry.expect("geometry");
            let visible = g.k.depth > 0.0 || g.m.depth > 0.0;
            assert_eq!(frame.has_arc(), visible, "step {step}");
            saw_hidden |= !visible;
        }
        assert!(saw_hidden);
    }

    #[test]
    fn back_facing_markers_are_faded_not_hidden() {
        let cfg = GlobeConfig::default();
        let frame = GlobeRenderer::new(cfg).render(
            SurfaceSize::new(400, 400),
            0.0,
            time_for_rotation(std::f64::consts::PI),
        );
        let dots: Vec<f64> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle { color, radius, .. } if *radius < 10.0 => Some(color.a),
                _ => None,
            })
            .collect();
        assert_eq!(dots.len(), 2);
        assert_close(dots[0], cfg.palette.k_dot.a * cfg.back_facing_marker_alpha, 1e-12);
        assert_close(dots[1], cfg.palette.m_dot.a * cfg.back_facing_marker_alpha, 1e-12);
    }

    #[test]
    fn empty_surface_draws_nothing() {
        let frame = GlobeRenderer::default().render(SurfaceSize::new(0, 300), 0.5, Time(10.0));
        assert!(frame.is_empty());
        assert!(frame.geometry.is_none());
    }

    #[test]
    fn thin_lines_never_drop_below_one_pixel() {
        let frame = GlobeRenderer::default().render(SurfaceSize::new(90, 90), 0.0, Time(0.0));
        for c in &frame.commands {
            if let DrawCommand::StrokeEllipse { line_width, .. }
            | DrawCommand::StrokeCircle { line_width, .. }
            | DrawCommand::StrokeQuadratic { line_width, .. } = c
            {
                assert!(*line_width >= 1.0);
            }
        }
    }
}
