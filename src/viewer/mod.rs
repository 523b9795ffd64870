//! `XlPrint`: the WASM-exported print preview entry point.
//!
//! Wires a JavaScript `renderCell` callback and a caller-provided container
//! element to a [`PrintSession`] of Canvas 2D pages.
//!
//! ```javascript
//! import init, { XlPrint } from 'xlprint';
//! await init();
//! const print = new XlPrint(window.devicePixelRatio, 10);
//! print.load_sheet(JSON.stringify(sheet));
//! print.preview(container, (ctx, row, col, yOffset, rect) => { ... });
//! print.print();
//! ```

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::error::XlprintError;
use crate::layout::SheetLayout;
use crate::print::{Paper, PrintOptions, PrintSession, SheetDataView};
use crate::render::{CanvasSurface, CanvasSurfaceFactory, CellPainter, IframePrintHost};
use crate::types::{Alignment, Orientation, SheetDescription};

const PAGE_CLASS: &str = "xlprint-page";

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

/// Forwards each cell to the JS `renderCell(ctx, row, col, yOffset, rect)`.
///
/// `rect` is `{ x, y, width, height }` of the cell (or the whole merge at its
/// origin); cells covered by a merge are not forwarded.
struct JsCellPainter<'a> {
    callback: &'a Function,
}

impl CellPainter<CanvasSurface> for JsCellPainter<'_> {
    fn paint_cell(
        &mut self,
        surface: &mut CanvasSurface,
        sheet: &dyn SheetDataView,
        row: u32,
        col: u32,
        vertical_offset: f64,
    ) {
        let rect = sheet.cell_rect(row, col);
        if rect.skip {
            return;
        }
        let obj = Object::new();
        let _ = Reflect::set(&obj, &"x".into(), &rect.x.into());
        let _ = Reflect::set(&obj, &"y".into(), &rect.y.into());
        let _ = Reflect::set(&obj, &"width".into(), &rect.width.into());
        let _ = Reflect::set(&obj, &"height".into(), &rect.height.into());

        let args = Array::new();
        args.push(surface.context());
        args.push(&row.into());
        args.push(&col.into());
        args.push(&vertical_offset.into());
        args.push(&obj);
        if let Err(err) = self.callback.apply(&JsValue::NULL, &args) {
            tracing::warn!(row, col, error = ?err, "renderCell threw");
        }
    }
}

#[wasm_bindgen]
pub struct XlPrint {
    session: PrintSession<CanvasSurface>,
    sheet: Option<SheetLayout>,
    container: Option<HtmlElement>,
    render_cell: Option<Function>,
    host: Option<IframePrintHost>,
}

#[wasm_bindgen]
impl XlPrint {
    /// Create a print session rendering at `dpr` with the preview stacked at `z_index`.
    #[wasm_bindgen(constructor)]
    pub fn new(dpr: f64, z_index: i32) -> XlPrint {
        console_error_panic_hook::set_once();
        let options = PrintOptions { dpr, z_index };
        XlPrint {
            session: PrintSession::new(Paper::default(), options),
            sheet: None,
            container: None,
            render_cell: None,
            host: None,
        }
    }

    /// Load a sheet description (JSON) and apply its paper config, if any.
    #[wasm_bindgen]
    pub fn load_sheet(&mut self, json: &str) -> Result<(), JsValue> {
        let desc: SheetDescription = serde_json::from_str(json).map_err(XlprintError::from)?;
        let layout = SheetLayout::from_description(&desc)?;
        if let Some(paper) = &desc.paper {
            self.session.apply_config(paper)?;
        }
        self.sheet = Some(layout);
        self.refresh()
    }

    #[wasm_bindgen]
    pub fn set_paper_size(&mut self, name: &str) -> Result<(), JsValue> {
        self.session.set_paper_size(name)?;
        self.refresh()
    }

    #[wasm_bindgen]
    pub fn set_orientation(&mut self, orientation: &str) -> Result<(), JsValue> {
        let orientation: Orientation = orientation.parse()?;
        self.session.set_orientation(orientation);
        self.refresh()
    }

    #[wasm_bindgen]
    pub fn set_alignment(&mut self, align: &str) -> Result<(), JsValue> {
        let align: Alignment = align.parse()?;
        self.session.set_alignment(align);
        self.refresh()
    }

    #[wasm_bindgen]
    pub fn set_padding(&mut self, padding: f64) -> Result<(), JsValue> {
        self.session.set_padding(padding);
        self.refresh()
    }

    #[wasm_bindgen]
    pub fn set_fit_to_width(&mut self, fit: bool) -> Result<(), JsValue> {
        self.session.set_fit_to_width(fit);
        self.refresh()
    }

    /// Render every page into `container`, replacing its previous content.
    #[wasm_bindgen]
    pub fn preview(
        &mut self,
        container: HtmlElement,
        render_cell: Function,
    ) -> Result<usize, JsValue> {
        self.container = Some(container);
        self.render_cell = Some(render_cell);
        self.render_preview()
    }

    #[wasm_bindgen]
    pub fn page_count(&self) -> usize {
        self.session.pages().len()
    }

    /// Pagination plan of the last preview as a JS object.
    #[wasm_bindgen]
    pub fn plan(&self) -> Result<JsValue, JsValue> {
        match self.session.pagination() {
            Some(p) => {
                serde_wasm_bindgen::to_value(p).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Paper size CSS used for printing.
    #[wasm_bindgen]
    pub fn page_css(&self) -> String {
        self.session.page_css()
    }

    /// Send the previewed pages to the browser print dialog.
    #[wasm_bindgen]
    pub fn print(&mut self) -> Result<(), JsValue> {
        if self.host.is_none() {
            self.host = Some(IframePrintHost::new(document()?));
        }
        if let Some(host) = self.host.as_mut() {
            self.session.print(host)?;
        }
        Ok(())
    }
}

impl XlPrint {
    /// Re-render when a preview is showing; otherwise settings just apply to the next one.
    fn refresh(&mut self) -> Result<(), JsValue> {
        if self.container.is_some() {
            self.render_preview()?;
        }
        Ok(())
    }

    fn render_preview(&mut self) -> Result<usize, JsValue> {
        let (Some(container), Some(callback)) = (self.container.clone(), self.render_cell.clone())
        else {
            return Ok(0);
        };
        container.set_inner_html("");
        let Some(sheet) = self.sheet.as_ref() else {
            return Ok(0);
        };

        let doc = document()?;
        let options = self.session.options();
        let _ = container
            .style()
            .set_property("z-index", &options.z_index.to_string());

        let mut factory = CanvasSurfaceFactory::new(doc.clone(), options.dpr);
        let mut painter = JsCellPainter {
            callback: &callback,
        };
        let count = self.session.preview(sheet, &mut factory, &mut painter)?;

        let paper = self.session.paper();
        for page in self.session.pages() {
            let card = doc
                .create_element("div")?
                .dyn_into::<HtmlElement>()
                .map_err(|_| JsValue::from_str("Failed to cast page card"))?;
            card.set_class_name(PAGE_CLASS);
            let style = card.style();
            let _ = style.set_property("width", &format!("{}px", paper.width()));
            let _ = style.set_property("height", &format!("{}px", paper.height()));
            card.append_child(page.canvas())?;
            container.append_child(&card)?;
        }
        Ok(count)
    }
}
