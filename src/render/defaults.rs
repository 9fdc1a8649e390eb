//! Fixed drawing settings shared by the assemblers and element renderers.

use glam::{DVec2, dvec2};

/// Line width for control holes and rectangles.
pub const OUTLINE_WIDTH: &str = "0.1 W ";

/// Line width for the panel border, opened with a saved graphics state.
pub const PANEL_BORDER: &str = "gsave 0.2 W ";

/// Points per millimetre, as printed in the page transform.
pub const MM_SCALE: &str = "2.83464567";

/// Points per 1/300 inch, as printed in the dial sheet transform.
pub const SHEET_SCALE: &str = "0.24";

/// Center of a dial sheet in 1/300 inch: (4 in, 6 in) on a letter page.
pub const SHEET_CENTER: DVec2 = dvec2(1200.0, 1800.0);
