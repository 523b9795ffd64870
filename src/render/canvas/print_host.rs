//! Printing through a hidden iframe.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlIFrameElement};

use super::surface::CanvasSurface;
use crate::error::{Result, XlprintError};
use crate::render::backend::{PageSurface, PrintHost};

/// Copies page canvases into a hidden iframe and opens the browser print dialog.
///
/// The iframe stays attached after `print()` returns: the dialog may still be
/// reading from it. It is replaced on the next print.
pub struct IframePrintHost {
    document: Document,
    frame: Option<HtmlIFrameElement>,
}

impl IframePrintHost {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            frame: None,
        }
    }

    fn fresh_frame(&mut self) -> Result<HtmlIFrameElement> {
        if let Some(old) = self.frame.take() {
            old.remove();
        }
        let frame = self
            .document
            .create_element("iframe")
            .map_err(|_| "Failed to create iframe")?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| "Failed to cast to HtmlIFrameElement")?;
        let style = frame.style();
        let _ = style.set_property("display", "none");

        let body = self.document.body().ok_or("Document has no body")?;
        body.append_child(&frame)
            .map_err(|_| "Failed to attach print iframe")?;
        self.frame = Some(frame.clone());
        Ok(frame)
    }
}

fn copy_page(doc: &Document, page: &CanvasSurface) -> Result<HtmlCanvasElement> {
    let source = page.canvas();
    let copy = doc
        .create_element("canvas")
        .map_err(|_| "Failed to create canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| "Failed to cast to HtmlCanvasElement")?;
    copy.set_width(source.width());
    copy.set_height(source.height());
    let style = copy.style();
    let _ = style.set_property("width", &format!("{}px", page.width()));
    let _ = style.set_property("height", &format!("{}px", page.height()));

    let ctx = copy
        .get_context("2d")
        .map_err(|_| "Failed to get 2d context")?
        .ok_or("No 2d context available")?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
    ctx.draw_image_with_html_canvas_element(source, 0.0, 0.0)
        .map_err(|_| XlprintError::Render("failed to copy page canvas".into()))?;
    Ok(copy)
}

impl PrintHost<CanvasSurface> for IframePrintHost {
    fn print(&mut self, page_css: &str, pages: &[CanvasSurface]) -> Result<()> {
        let frame = self.fresh_frame()?;
        let window = frame
            .content_window()
            .ok_or("Print iframe has no window")?;
        let doc = window.document().ok_or("Print iframe has no document")?;

        let style = doc
            .create_element("style")
            .map_err(|_| "Failed to create style element")?;
        style.set_text_content(Some(page_css));
        let head = doc.head().ok_or("Print iframe has no head")?;
        head.append_child(&style)
            .map_err(|_| "Failed to attach page style")?;

        let body = doc.body().ok_or("Print iframe has no body")?;
        for page in pages {
            let copy = copy_page(&doc, page)?;
            body.append_child(&copy)
                .map_err(|_| "Failed to attach page canvas")?;
        }

        tracing::debug!(pages = pages.len(), "opening print dialog");
        window
            .print()
            .map_err(|_| XlprintError::Render("window.print() failed".into()))?;
        Ok(())
    }
}
