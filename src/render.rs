use crate::constants::{LINK_LINE_WIDTH, PRIMARY_DARK, PRIMARY_LIGHT};
use crate::dom;
use folio_core::FieldSnapshot;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas 2D painter for field snapshots. Draws in CSS pixels; the backing
/// store is scaled by devicePixelRatio.
pub struct Painter {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    dpr: f64,
}

impl Painter {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("unexpected context type: {:?}", e))?;
        let dpr = dom::sync_canvas_backing_size(&canvas);
        Ok(Self { canvas, ctx, dpr })
    }

    /// Re-sync the backing store after a window resize.
    pub fn resize(&mut self) {
        self.dpr = dom::sync_canvas_backing_size(&self.canvas);
    }

    pub fn clear(&self) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    pub fn draw(&self, snapshot: &FieldSnapshot<'_>) {
        self.clear();
        if snapshot.viewport.is_empty() || snapshot.particles.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        _ = ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        let layer = snapshot.layer_opacity as f64;
        let colour = if snapshot.theme.is_dark() {
            PRIMARY_DARK
        } else {
            PRIMARY_LIGHT
        };

        // Links first so dots sit on top
        ctx.set_stroke_style_str(colour);
        ctx.set_line_width(LINK_LINE_WIDTH);
        for edge in snapshot.edges {
            let (Some(a), Some(b)) = (snapshot.particle(edge.a), snapshot.particle(edge.b)) else {
                continue;
            };
            ctx.set_global_alpha(layer * edge.opacity as f64);
            ctx.begin_path();
            ctx.move_to(a.position.x as f64, a.position.y as f64);
            ctx.line_to(b.position.x as f64, b.position.y as f64);
            ctx.stroke();
        }

        ctx.set_fill_style_str(colour);
        for p in snapshot.particles {
            ctx.set_global_alpha(layer * p.opacity as f64);
            ctx.begin_path();
            // size is the dot's on-screen diameter
            _ = ctx.arc(
                p.position.x as f64,
                p.position.y as f64,
                p.size as f64 * 0.5,
                0.0,
                TAU,
            );
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
    }
}
