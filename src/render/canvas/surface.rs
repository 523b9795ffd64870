//! Canvas-backed implementation of [`PageSurface`].

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::Result;
use crate::render::backend::{PageSurface, SurfaceFactory};

/// A page canvas plus its 2D context.
///
/// The context already carries the DPR scale, so all coordinates are in
/// logical (CSS) pixels.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    dpr: f64,
}

impl CanvasSurface {
    /// Wrap an existing canvas, sizing its backing store to `width` x `height` at `dpr`.
    pub fn new(canvas: HtmlCanvasElement, width: f64, height: f64, dpr: f64) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "Failed to get 2d context")?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let w_px = (width * dpr).round().max(1.0) as u32;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let h_px = (height * dpr).round().max(1.0) as u32;
        canvas.set_width(w_px);
        canvas.set_height(h_px);

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{width}px"));
        let _ = style.set_property("height", &format!("{height}px"));

        let _ = ctx.scale(dpr, dpr);

        Ok(Self {
            canvas,
            ctx,
            width,
            height,
            dpr,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Context handed to the cell painter
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }
}

impl PageSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let _ = self.ctx.scale(sx, sy);
    }

    fn clip_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.begin_path();
        self.ctx.rect(x, y, width, height);
        self.ctx.clip();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }
}

/// Creates detached page canvases in `document`.
pub struct CanvasSurfaceFactory {
    document: Document,
    dpr: f64,
}

impl CanvasSurfaceFactory {
    pub fn new(document: Document, dpr: f64) -> Self {
        Self { document, dpr }
    }
}

impl SurfaceFactory for CanvasSurfaceFactory {
    type Surface = CanvasSurface;

    fn create_surface(&mut self, width: f64, height: f64) -> Result<CanvasSurface> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(|_| "Failed to create canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Failed to cast to HtmlCanvasElement")?;
        CanvasSurface::new(canvas, width, height, self.dpr)
    }
}
