//! Paper geometry: named sizes, orientation, padding and alignment.

use serde::Serialize;

use crate::error::{Result, XlprintError};
use crate::types::{Alignment, Orientation, PaperConfig};

/// CSS pixels per inch.
pub const PX_PER_INCH: f64 = 96.0;

/// Default padding on every side of the page, CSS pixels.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Named paper sizes in inches (portrait width, height).
pub const PAPER_SIZES: &[(&str, f64, f64)] = &[
    ("A3", 11.69, 16.54),
    ("A4", 8.27, 11.69),
    ("A5", 5.83, 8.27),
    ("B4", 9.84, 13.90),
    ("B5", 6.93, 9.84),
];

pub fn inches_to_px(inches: f64) -> f64 {
    inches * PX_PER_INCH
}

/// Look up a named paper size, case-insensitively, returning its raw
/// (portrait) width and height in CSS pixels.
pub fn paper_size_px(name: &str) -> Option<(f64, f64)> {
    let name = name.trim();
    PAPER_SIZES
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, w, h)| (inches_to_px(w), inches_to_px(h)))
}

/// Print paper configuration.
///
/// Lives for the whole preview session; the page scale is not stored here but
/// resolved per pass (see [`crate::print::PageGeometry`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Name of the selected paper size
    pub name: String,
    /// Portrait width, CSS pixels
    pub raw_width: f64,
    /// Portrait height, CSS pixels
    pub raw_height: f64,
    pub padding: f64,
    pub orientation: Orientation,
    pub align: Alignment,
    /// Scale wide content down to the printable width
    pub fit_to_width: bool,
}

impl Default for Paper {
    fn default() -> Self {
        let (raw_width, raw_height) = paper_size_px("A4").unwrap_or((793.92, 1122.24));
        Self {
            name: "A4".to_string(),
            raw_width,
            raw_height,
            padding: DEFAULT_PADDING,
            orientation: Orientation::Portrait,
            align: Alignment::Left,
            fit_to_width: true,
        }
    }
}

impl Paper {
    /// Paper of a named size with default padding/orientation.
    ///
    /// # Errors
    /// Returns `UnknownPaperSize` if the name is not in [`PAPER_SIZES`].
    pub fn named(name: &str) -> Result<Self> {
        let mut paper = Self::default();
        paper.set_size(name)?;
        Ok(paper)
    }

    /// Paper with explicit raw dimensions (CSS pixels).
    pub fn custom(raw_width: f64, raw_height: f64, padding: f64) -> Self {
        Self {
            name: "Custom".to_string(),
            raw_width,
            raw_height,
            padding,
            ..Self::default()
        }
    }

    /// Apply a paper config on top of the current values.
    ///
    /// # Errors
    /// Returns `UnknownPaperSize` for an unknown paper name; nothing is changed then.
    pub fn apply_config(&mut self, config: &PaperConfig) -> Result<()> {
        if let Some(name) = config.paper_size.as_deref() {
            self.set_size(name)?;
        }
        if let Some(orientation) = config.orientation {
            self.orientation = orientation;
        }
        if let Some(align) = config.align {
            self.align = align;
        }
        if let Some(padding) = config.padding {
            self.padding = padding.max(0.0);
        }
        if let Some(fit) = config.fit_to_width {
            self.fit_to_width = fit;
        }
        Ok(())
    }

    /// Switch to a named size, keeping orientation/padding/alignment.
    ///
    /// # Errors
    /// Returns `UnknownPaperSize` if the name is not in [`PAPER_SIZES`].
    pub fn set_size(&mut self, name: &str) -> Result<()> {
        let (w, h) =
            paper_size_px(name).ok_or_else(|| XlprintError::UnknownPaperSize(name.to_string()))?;
        self.raw_width = w;
        self.raw_height = h;
        self.name = name.trim().to_ascii_uppercase();
        Ok(())
    }

    /// Page width after orientation (landscape swaps raw dimensions)
    pub fn width(&self) -> f64 {
        match self.orientation {
            Orientation::Landscape => self.raw_height,
            Orientation::Portrait => self.raw_width,
        }
    }

    /// Page height after orientation
    pub fn height(&self) -> f64 {
        match self.orientation {
            Orientation::Landscape => self.raw_width,
            Orientation::Portrait => self.raw_height,
        }
    }

    /// Printable width: page width minus padding on both sides
    pub fn printable_width(&self) -> f64 {
        self.width() - 2.0 * self.padding
    }

    /// Printable height: page height minus padding on both sides
    pub fn printable_height(&self) -> f64 {
        self.height() - 2.0 * self.padding
    }

    /// `@page` CSS used when handing rendered pages to the host print facility
    pub fn page_css(&self) -> String {
        format!(
            "@page {{ size: {}px {}px; }}\n\
             canvas {{ page-break-before: auto; page-break-after: always; }}",
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_is_a4_portrait() {
        let paper = Paper::default();
        assert_eq!(paper.name, "A4");
        assert!(close(paper.width(), 8.27 * 96.0));
        assert!(close(paper.height(), 11.69 * 96.0));
        assert_eq!(paper.padding, 50.0);
        assert_eq!(paper.align, Alignment::Left);
        assert!(paper.fit_to_width);
    }

    #[test]
    fn test_landscape_swaps_dimensions() {
        let mut paper = Paper::named("a3").unwrap();
        assert_eq!(paper.name, "A3");
        paper.orientation = Orientation::Landscape;
        assert!(close(paper.width(), 16.54 * 96.0));
        assert!(close(paper.height(), 11.69 * 96.0));
        assert!(close(paper.printable_width(), 16.54 * 96.0 - 100.0));
    }

    #[test]
    fn test_unknown_size_leaves_paper_unchanged() {
        let mut paper = Paper::default();
        let err = paper.set_size("Letter").unwrap_err();
        assert!(matches!(err, XlprintError::UnknownPaperSize(_)));
        assert_eq!(paper, Paper::default());
    }

    #[test]
    fn test_apply_config() {
        let mut paper = Paper::default();
        paper
            .apply_config(&PaperConfig {
                paper_size: Some("B5".into()),
                orientation: Some(Orientation::Landscape),
                align: Some(Alignment::Right),
                padding: Some(-4.0),
                fit_to_width: Some(false),
            })
            .unwrap();
        assert_eq!(paper.name, "B5");
        assert_eq!(paper.orientation, Orientation::Landscape);
        assert_eq!(paper.align, Alignment::Right);
        assert_eq!(paper.padding, 0.0);
        assert!(!paper.fit_to_width);
    }

    #[test]
    fn test_page_css() {
        let paper = Paper::custom(800.0, 1000.0, 0.0);
        let css = paper.page_css();
        assert!(css.contains("@page { size: 800px 1000px; }"));
        assert!(css.contains("page-break-after: always"));
    }
}
