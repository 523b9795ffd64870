//! Fit-to-width scale resolution and per-pass page geometry.

use serde::Serialize;

use super::paper::Paper;
use crate::types::Alignment;

/// Resolve the page scale for content of `content_width` printed into
/// `printable_width`.
///
/// Wide content is scaled down to fit; narrow content is never magnified, the
/// result is capped at 1.0. Degenerate inputs (zero/negative/non-finite widths)
/// resolve to 1.0 so `NaN`/`Infinity` never reach the layout.
pub fn resolve_scale(content_width: f64, printable_width: f64) -> f64 {
    if !content_width.is_finite() || content_width <= 0.0 {
        return 1.0;
    }
    let ratio = printable_width / content_width;
    if !ratio.is_finite() || ratio <= 0.0 {
        return 1.0;
    }
    ratio.min(1.0)
}

/// Horizontal offset of content inside the printable width.
///
/// Only content narrower than the printable width has slack to distribute.
pub fn align_offset(align: Alignment, scaled_content_width: f64, printable_width: f64) -> f64 {
    let slack = printable_width - scaled_content_width;
    if !slack.is_finite() || slack <= 0.0 {
        return 0.0;
    }
    match align {
        Alignment::Left => 0.0,
        Alignment::Center => slack / 2.0,
        Alignment::Right => slack,
    }
}

/// Geometry resolved once per pagination pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub paper_width: f64,
    pub paper_height: f64,
    pub padding: f64,
    pub printable_width: f64,
    pub printable_height: f64,
    /// Content scale in `(0, 1]`
    pub scale: f64,
    /// Extra left offset from alignment of narrow content
    pub align_offset: f64,
}

impl PageGeometry {
    /// Resolve the geometry of `paper` for content `content_width` wide (unscaled).
    pub fn resolve(paper: &Paper, content_width: f64) -> Self {
        let printable_width = paper.printable_width();
        let scale = if paper.fit_to_width {
            resolve_scale(content_width, printable_width)
        } else {
            1.0
        };
        let scaled_width = if content_width.is_finite() {
            content_width.max(0.0) * scale
        } else {
            0.0
        };
        Self {
            paper_width: paper.width(),
            paper_height: paper.height(),
            padding: paper.padding,
            printable_width,
            printable_height: paper.printable_height(),
            scale,
            align_offset: align_offset(paper.align, scaled_width, printable_width),
        }
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
    use test_case::test_case;

    #[test_case(3000.0, 800.0, 800.0 / 3000.0 ; "wide content scales down")]
    #[test_case(400.0, 800.0, 1.0 ; "narrow content is capped at one")]
    #[test_case(800.0, 800.0, 1.0 ; "exact fit")]
    #[test_case(0.0, 800.0, 1.0 ; "zero width")]
    #[test_case(-10.0, 800.0, 1.0 ; "negative width")]
    #[test_case(f64::NAN, 800.0, 1.0 ; "nan width")]
    #[test_case(f64::INFINITY, 800.0, 1.0 ; "infinite width")]
    #[test_case(500.0, 0.0, 1.0 ; "no printable width")]
    fn test_resolve_scale(content: f64, printable: f64, expected: f64) {
        let scale = resolve_scale(content, printable);
        assert!((scale - expected).abs() < 1e-12, "{scale} != {expected}");
        assert!(scale > 0.0 && scale <= 1.0);
    }

    #[test_case(Alignment::Left, 0.0)]
    #[test_case(Alignment::Center, 200.0)]
    #[test_case(Alignment::Right, 400.0)]
    fn test_align_offset(align: Alignment, expected: f64) {
        assert_eq!(align_offset(align, 400.0, 800.0), expected);
    }

    #[test]
    fn test_align_offset_without_slack() {
        assert_eq!(align_offset(Alignment::Right, 900.0, 800.0), 0.0);
        assert_eq!(align_offset(Alignment::Center, f64::NAN, 800.0), 0.0);
    }

    #[test]
    fn test_geometry_fit_to_width() {
        let paper = Paper::custom(900.0, 1100.0, 50.0);
        let geometry = PageGeometry::resolve(&paper, 3200.0);
        assert_eq!(geometry.printable_width, 800.0);
        assert_eq!(geometry.printable_height, 1000.0);
        assert_eq!(geometry.scale, 0.25);
        assert_eq!(geometry.align_offset, 0.0);
    }

    #[test]
    fn test_geometry_actual_size_keeps_scale() {
        let mut paper = Paper::custom(900.0, 1100.0, 50.0);
        paper.fit_to_width = false;
        let geometry = PageGeometry::resolve(&paper, 3200.0);
        assert_eq!(geometry.scale, 1.0);
    }

    #[test]
    fn test_geometry_centers_narrow_content() {
        let mut paper = Paper::custom(900.0, 1100.0, 50.0);
        paper.align = Alignment::Center;
        let geometry = PageGeometry::resolve(&paper, 200.0);
        assert_eq!(geometry.scale, 1.0);
        assert_eq!(geometry.align_offset, 300.0);
    }
}
