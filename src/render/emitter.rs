//! Width-bounded PostScript token stream.
//!
//! Fragments are appended to a line buffer. Before each append the buffer is
//! written out if it is already longer than [`WRAP_COLUMN`], so a line ends up
//! a little past the column rather than being split inside a token.

use glam::DVec2;

use crate::types::Color;

/// Buffered lines are flushed once they grow past this many bytes.
pub const WRAP_COLUMN: usize = 72;

/// Line terminator for every output line.
pub const EOL: &str = "\r\n";

/// How coordinates are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordStyle {
    /// Six decimals (millimetres on a panel)
    Fixed,
    /// Truncated toward zero (1/300 inch on a dial sheet)
    Integer,
}

/// Accumulates a complete PostScript document in memory.
#[derive(Debug)]
pub struct Emitter {
    out: String,
    line: String,
    coords: CoordStyle,
}

impl Emitter {
    pub fn new(coords: CoordStyle) -> Self {
        Self {
            out: String::new(),
            line: String::new(),
            coords,
        }
    }

    /// Write a structural line (header comments) directly, bypassing the buffer.
    pub fn raw_line(&mut self, line: &str) {
        self.out.push_str(line);
        self.out.push_str(EOL);
    }

    /// Append one fragment, flushing first if the buffered line is too long.
    pub fn emit(&mut self, fragment: &str) {
        if self.line.len() > WRAP_COLUMN {
            self.flush();
        }
        self.line.push_str(fragment);
    }

    /// `r g b C` with each channel as a fraction of 256.
    pub fn emit_color(&mut self, color: Color) {
        for channel in color.fractions() {
            self.emit(&format!("{channel:4.2} "));
        }
        self.emit("C ");
    }

    /// A single coordinate in the emitter's [`CoordStyle`].
    pub fn emit_coord(&mut self, value: f64) {
        let fragment = match self.coords {
            CoordStyle::Fixed => format!("{value:.6} "),
            CoordStyle::Integer => format!("{} ", value.trunc() as i64),
        };
        self.emit(&fragment);
    }

    pub fn emit_move(&mut self, p: DVec2) {
        self.emit_coord(p.x);
        self.emit_coord(p.y);
        self.emit("M ");
    }

    pub fn emit_line(&mut self, p: DVec2) {
        self.emit_coord(p.x);
        self.emit_coord(p.y);
        self.emit("L ");
    }

    /// Move to the first point, then line to the rest.
    pub fn emit_polyline(&mut self, points: impl IntoIterator<Item = DVec2>) {
        for (i, p) in points.into_iter().enumerate() {
            if i == 0 {
                self.emit_move(p);
            } else {
                self.emit_line(p);
            }
        }
    }

    /// A PostScript string literal as one fragment, so it is never wrapped.
    pub fn emit_string(&mut self, text: &str) {
        let mut fragment = String::with_capacity(text.len() + 3);
        fragment.push('(');
        for c in text.chars() {
            if matches!(c, '(' | ')' | '\\') {
                fragment.push('\\');
            }
            fragment.push(c);
        }
        fragment.push_str(") ");
        self.emit(&fragment);
    }

    /// Write out the buffered line, dropping one trailing space.
    pub fn flush(&mut self) {
        let mut line = std::mem::take(&mut self.line);
        if line.ends_with(' ') {
            line.pop();
        }
        self.out.push_str(&line);
        self.out.push_str(EOL);
    }

    /// Force out the last partial line and return the whole document.
    pub fn finish(mut self) -> String {
        self.flush();
        self.out
    }

    /// Finish with `showpage`, a forced flush and the trailer comment.
    pub fn finish_page(mut self) -> String {
        self.emit("showpage ");
        self.flush();
        self.raw_line("%%Trailer");
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    fn lines(ps: &str) -> Vec<&str> {
        ps.split_terminator(EOL).collect()
    }

    #[test]
    fn fragments_flush_only_past_the_column() {
        let mut out = Emitter::new(CoordStyle::Integer);
        // the 9th fragment finds 80 bytes buffered
        for _ in 0..9 {
            out.emit("123456789 ");
        }
        let ps = out.finish();
        let lines = lines(&ps);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 79);
        assert_eq!(lines[1], "123456789");
    }

    #[test]
    fn no_flush_at_exactly_the_column() {
        let mut out = Emitter::new(CoordStyle::Integer);
        out.emit(&"x".repeat(WRAP_COLUMN));
        out.emit("tail ");
        assert_eq!(out.finish(), format!("{}tail\r\n", "x".repeat(WRAP_COLUMN)));
    }

    #[test]
    fn only_one_trailing_space_is_trimmed() {
        let mut out = Emitter::new(CoordStyle::Integer);
        out.emit("S  ");
        assert_eq!(out.finish(), "S \r\n");
    }

    #[test]
    fn color_fragments() {
        let mut out = Emitter::new(CoordStyle::Fixed);
        out.emit_color(Color::from_packed(0xdfefff));
        insta::assert_snapshot!(out.finish().trim_end(), @"0.87 0.93 1.00 C");
    }

    #[test]
    fn fixed_coordinates() {
        let mut out = Emitter::new(CoordStyle::Fixed);
        out.emit_move(dvec2(1.5, -2.0));
        out.emit_line(dvec2(10.0, 0.125));
        insta::assert_snapshot!(out.finish().trim_end(), @"1.500000 -2.000000 M 10.000000 0.125000 L");
    }

    #[test]
    fn integer_coordinates_truncate_toward_zero() {
        let mut out = Emitter::new(CoordStyle::Integer);
        out.emit_move(dvec2(1200.9, -3.7));
        insta::assert_snapshot!(out.finish().trim_end(), @"1200 -3 M");
    }

    #[test]
    fn strings_are_escaped_and_never_split() {
        let mut out = Emitter::new(CoordStyle::Fixed);
        out.emit(&"y".repeat(70));
        out.emit("ab ");
        out.emit_string(r"a (b) \ c");
        let ps = out.finish();
        let lines = lines(&ps);
        assert_eq!(lines[1], r"(a \(b\) \\ c)");
    }

    #[test]
    fn raw_lines_bypass_the_buffer() {
        let mut out = Emitter::new(CoordStyle::Fixed);
        out.raw_line("%!PS-Adobe-2.0");
        out.emit("gsave ");
        let ps = out.finish_page();
        assert_eq!(ps, "%!PS-Adobe-2.0\r\ngsave showpage\r\n%%Trailer\r\n");
    }

    #[test]
    fn polyline_moves_then_lines() {
        let mut out = Emitter::new(CoordStyle::Integer);
        out.emit_polyline([dvec2(0.0, 0.0), dvec2(1.0, 0.0), dvec2(1.0, 1.0)]);
        insta::assert_snapshot!(out.finish().trim_end(), @"0 0 M 1 0 L 1 1 L");
    }
}
