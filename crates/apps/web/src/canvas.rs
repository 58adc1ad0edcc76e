use std::f64::consts::TAU;

use render::{CanvasSurface, DrawCommand, RenderFrame};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// The globe `<canvas>` with its 2D context and tracked backing-store size.
pub struct GlobeCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    surface: CanvasSurface,
}

impl GlobeCanvas {
    /// Looks the canvas up by id. `None` when the element is missing, is not a
    /// canvas, or has no 2D context; the caller retries on a later frame.
    pub fn find(document: &Document, id: &str, max_dpr: f64) -> Option<Self> {
        let canvas = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            surface: CanvasSurface::new(max_dpr),
        })
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// Matches the backing store to the layout rectangle. Writing
    /// `width`/`height` clears the canvas, so it only happens on change.
    pub fn revalidate(&mut self, device_pixel_ratio: f64) -> bool {
        let rect = self.canvas.get_bounding_client_rect();
        if !self
            .surface
            .revalidate(rect.width(), rect.height(), device_pixel_ratio)
        {
            return false;
        }
        let size = self.surface.size();
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        true
    }

    pub fn paint(&self, frame: &RenderFrame) -> Result<(), JsValue> {
        paint_commands(&self.ctx, frame)
    }
}

fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), value);
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

/// Replays a display list onto a 2D context, in order.
pub fn paint_commands(ctx: &CanvasRenderingContext2d, frame: &RenderFrame) -> Result<(), JsValue> {
    for command in &frame.commands {
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width, *height);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
                ctx_set_fill_style(ctx, &JsValue::from_str(&color.css()));
                ctx.fill();
            }
            DrawCommand::StrokeCircle {
                center,
                radius,
                color,
                line_width,
            } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
                ctx_set_stroke_style(ctx, &color.css());
                ctx.set_line_width(*line_width);
                ctx.stroke();
            }
            DrawCommand::Save => ctx.save(),
            DrawCommand::Restore => ctx.restore(),
            DrawCommand::Translate { offset } => ctx.translate(offset.x, offset.y)?,
            DrawCommand::Rotate { angle } => ctx.rotate(*angle)?,
            DrawCommand::ClipCircle { center, radius } => {
                ctx.begin_path();
                ctx.arc(center.x, center.y, *radius, 0.0, TAU)?;
                ctx.clip();
            }
            DrawCommand::StrokeEllipse {
                center,
                radius_x,
                radius_y,
                color,
                line_width,
            } => {
                ctx_set_stroke_style(ctx, &color.css());
                ctx.set_line_width(*line_width);
                ctx.begin_path();
                ctx.ellipse(center.x, center.y, *radius_x, *radius_y, 0.0, 0.0, TAU)?;
                ctx.stroke();
            }
            DrawCommand::StrokeQuadratic {
                from,
                control,
                to,
                color,
                line_width,
            } => {
                ctx_set_stroke_style(ctx, &color.css());
                ctx.set_line_width(*line_width);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.quadratic_curve_to(control.x, control.y, to.x, to.y);
                ctx.stroke();
            }
            DrawCommand::RadialVignette {
                center,
                inner_radius,
                outer_radius,
                extent_radius,
                inner,
                outer,
            } => {
                let gradient = ctx.create_radial_gradient(
                    center.x,
                    center.y,
                    *inner_radius,
                    center.x,
                    center.y,
                    *outer_radius,
                )?;
                gradient.add_color_stop(0.0, &inner.css())?;
                gradient.add_color_stop(1.0, &outer.css())?;
                ctx_set_fill_style(ctx, gradient.as_ref());
                ctx.begin_path();
                ctx.arc(center.x, center.y, *extent_radius, 0.0, TAU)?;
                ctx.fill();
            }
        }
    }
    Ok(())
}
