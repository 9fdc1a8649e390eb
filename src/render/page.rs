//! Paper selection and panel placement.
//!
//! Panels are printed landscape: the page is rotated 90 degrees, so the panel
//! height is checked against the paper width and the panel width against the
//! paper height.

use glam::{DVec2, dvec2};

use super::defaults::MM_SCALE;
use crate::errors::PaperAdvisory;

/// Margin on every side of the page, in millimetres.
pub const PAGE_MARGIN: f64 = 12.7;

/// A standard paper size, in centimetres as listed by Ghostscript.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub name: &'static str,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PaperSize {
    const fn new(name: &'static str, width_cm: f64, height_cm: f64) -> Self {
        Self {
            name,
            width_cm,
            height_cm,
        }
    }

    /// Printable width in millimetres.
    pub fn usable_width(&self) -> f64 {
        10.0 * self.width_cm - 2.0 * PAGE_MARGIN
    }

    /// Printable height in millimetres.
    pub fn usable_height(&self) -> f64 {
        10.0 * self.height_cm - 2.0 * PAGE_MARGIN
    }
}

/// Candidate papers in the order they are tried. Widths are not monotonic.
pub const PAPER_SIZES: [PaperSize; 9] = [
    PaperSize::new("letter", 21.59, 27.94),
    PaperSize::new("a4", 20.9903, 29.7039),
    PaperSize::new("legal", 21.59, 35.56),
    PaperSize::new("a3", 29.7039, 41.9806),
    PaperSize::new("11x17", 27.94, 43.18),
    PaperSize::new("a1", 59.4078, 83.9611),
    PaperSize::new("archD", 60.96, 91.44),
    PaperSize::new("a0", 93.9611, 118.816),
    PaperSize::new("b0", 100.048, 141.393),
];

/// The chosen paper and its printable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFit {
    pub paper: PaperSize,
    pub usable_width: f64,
    pub usable_height: f64,
}

impl PageFit {
    fn new(paper: PaperSize) -> Self {
        Self {
            paper,
            usable_width: paper.usable_width(),
            usable_height: paper.usable_height(),
        }
    }

    pub fn is_letter(&self) -> bool {
        self.paper.name == PAPER_SIZES[0].name
    }

    /// The note to print when the output needs a non-default paper size.
    pub fn advisory(&self) -> Option<PaperAdvisory> {
        (!self.is_letter()).then_some(PaperAdvisory {
            paper: self.paper.name,
        })
    }

    /// Lower-left corner of the panel in the rotated page frame.
    pub fn placement(&self, panel: DVec2) -> DVec2 {
        dvec2(
            (self.usable_height - panel.x) / 2.0 + PAGE_MARGIN,
            (self.usable_width - panel.y) / 2.0 - self.usable_width - PAGE_MARGIN,
        )
    }

    /// The rotate/scale/translate fragment that maps millimetres onto the page.
    pub fn transform(&self, panel: DVec2, reverse: bool) -> String {
        let corner = self.placement(panel);
        if reverse {
            format!(
                "90 rotate -{MM_SCALE} {MM_SCALE} scale {:.6} {:.6} translate ",
                corner.x - self.usable_height,
                corner.y
            )
        } else {
            format!(
                "90 rotate {MM_SCALE} {MM_SCALE} scale {:.6} {:.6} translate ",
                corner.x, corner.y
            )
        }
    }
}

/// Pick the first paper in [`PAPER_SIZES`] that holds a `width` x `height` mm
/// panel laid out landscape. Panels too big for every paper get the last one.
pub fn fit_page(width: f64, height: f64) -> PageFit {
    let mut page = 0;
    for i in 0..PAPER_SIZES.len() - 1 {
        if height > PAPER_SIZES[page].usable_width() {
            page = i + 1;
        }
        if width > PAPER_SIZES[page].usable_height() {
            page = i + 1;
        }
    }
    PageFit::new(PAPER_SIZES[page])
}
