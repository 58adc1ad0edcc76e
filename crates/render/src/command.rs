use foundation::math::{ProjectedPoint, Vec2};
use serde::Serialize;

use crate::color::Rgba;

/// One 2D canvas operation. Coordinates are backing-store pixels.
///
/// Commands mirror the canvas state machine: `Save`/`Restore` bracket
/// `Translate`, `Rotate` and `ClipCircle`, and later coordinates are in the
/// transformed space until the matching `Restore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    FillCircle {
        center: Vec2,
        radius: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: Vec2,
        radius: f64,
        color: Rgba,
        line_width: f64,
    },
    Save,
    Restore,
    Translate {
        offset: Vec2,
    },
    Rotate {
        angle: f64,
    },
    ClipCircle {
        center: Vec2,
        radius: f64,
    },
    StrokeEllipse {
        center: Vec2,
        radius_x: f64,
        radius_y: f64,
        color: Rgba,
        line_width: f64,
    },
    /// Quadratic Bézier stroke with round caps.
    StrokeQuadratic {
        from: Vec2,
        control: Vec2,
        to: Vec2,
        color: Rgba,
        line_width: f64,
    },
    /// Radial gradient from `inner` at `inner_radius` to `outer` at
    /// `outer_radius`, filled over a disk of `extent_radius`.
    RadialVignette {
        center: Vec2,
        inner_radius: f64,
        outer_radius: f64,
        extent_radius: f64,
        inner: Rgba,
        outer: Rgba,
    },
}

/// Derived geometry of a globe frame, kept next to the commands for
/// debugging and tests.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct GlobeGeometry {
    pub center: Vec2,
    pub radius: f64,
    pub rotation: f64,
    pub arc_lift: f64,
    pub k: ProjectedPoint,
    pub m: ProjectedPoint,
    pub arc_drawn: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub commands: Vec<DrawCommand>,
    /// `None` when the surface had no area and nothing was drawn.
    pub geometry: Option<GlobeGeometry>,
}

impl RenderFrame {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn has_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, DrawCommand::StrokeQuadratic { .. }))
    }

    pub fn ellipse_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeEllipse { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RenderFrame};
    use crate::color::Rgba;
    use foundation::math::Vec2;

    #[test]
    fn frame_queries_inspect_commands() {
        let mut frame = RenderFrame::default();
        assert!(frame.is_empty());
        frame.push(DrawCommand::Save);
        frame.push(DrawCommand::StrokeEllipse {
            center: Vec2::ZERO,
            radius_x: 1.0,
            radius_y: 1.0,
            color: Rgba::new(0, 0, 0, 1.0),
            line_width: 1.0,
        });
        frame.push(DrawCommand::Restore);
        assert!(!frame.has_arc());
        assert_eq!(frame.ellipse_count(), 1);
    }
}
