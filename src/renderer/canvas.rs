//! Canvas2D render adapter for the browser build

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{RegionKind, RenderAdapter};
use crate::sim::Rect;

const SPRITE_FILL: &str = "#8a4dc0";
const SPRITE_OUTLINE: &str = "#502076";
const OBSTACLE_FILL: &str = "#d45f46";
const OBSTACLE_OUTLINE: &str = "#aa3f2d";
const COUNTDOWN_FILL: &str = "#ffffff";

/// Paints regions onto a 2D canvas, scaling field units to canvas pixels
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
    scale_x: f64,
    scale_y: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            canvas,
            scale_x: 1.0,
            scale_y: 1.0,
        })
    }
}

impl RenderAdapter for CanvasRenderer {
    fn clear(&mut self, width: f32, height: f32) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.scale_x = w / width as f64;
        self.scale_y = h / height as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn draw_region(&mut self, rect: Rect, kind: RegionKind) {
        let (fill, outline) = match kind {
            RegionKind::Sprite => (SPRITE_FILL, SPRITE_OUTLINE),
            RegionKind::ObstacleTop | RegionKind::ObstacleBottom => (OBSTACLE_FILL, OBSTACLE_OUTLINE),
        };
        let x = rect.min.x as f64 * self.scale_x;
        let y = rect.min.y as f64 * self.scale_y;
        let w = rect.width() as f64 * self.scale_x;
        let h = rect.height() as f64 * self.scale_y;

        self.ctx.set_fill_style_str(fill);
        self.ctx.fill_rect(x, y, w, h);
        self.ctx.set_stroke_style_str(outline);
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn draw_countdown(&mut self, remaining: u32) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str(COUNTDOWN_FILL);
        self.ctx.set_font(&format!("bold {}px sans-serif", (h / 6.0).round()));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        if let Err(e) = self.ctx.fill_text(&remaining.to_string(), w / 2.0, h / 2.0) {
            log::warn!("Countdown draw failed: {:?}", e);
        }
    }
}
