//! Document header comments and the procedure definitions used by the body.

use super::emitter::Emitter;

/// Short procedure names for the drawing operators.
const PROCSET: [&str; 5] = [
    "/F { findfont exch scalefont setfont } bind def /L { lineto } bind def /C",
    "{ setrgbcolor } bind def /M { moveto } bind def /S { stroke } bind def /W",
    "{ setlinewidth } bind def /T { show } bind def /TR { dup stringwidth exch",
    "neg exch rmoveto show } bind def /TC { dup stringwidth exch 2 div neg",
    "exch rmoveto show } bind def",
];

const CREATOR: &str = concat!("dialpanel ", env!("CARGO_PKG_VERSION"));

fn procset(out: &mut Emitter) {
    out.raw_line("%%BeginProcSet: TextProcs 1.0 0");
    for line in PROCSET {
        out.raw_line(line);
    }
    out.raw_line("%%EndProcSet");
    out.raw_line("%%EndProlog");
}

/// Header for a landscape front panel on `paper`.
pub fn panel_header(out: &mut Emitter, title: &str, paper: &str) {
    out.raw_line("%!PS-Adobe-2.0");
    out.raw_line(&format!("%%Title: (Panel from file {title})"));
    out.raw_line(&format!("%%Creator: {CREATOR}"));
    out.raw_line(&format!("%%Author: ({CREATOR})"));
    out.raw_line("%%Pages: 1");
    out.raw_line("%%Orientation: Landscape");
    out.raw_line(&format!("%%DocumentPaperSizes: {paper}"));
    out.raw_line("%%EndComments");
    out.raw_line("%%BeginProlog");
    procset(out);
    out.raw_line("%%Page: 1 1");
}

/// Header for a single dial sheet.
pub fn dial_header(out: &mut Emitter, title: &str) {
    out.raw_line("%!PS-Adobe-2.0");
    out.raw_line(&format!("%%Title: (Dial from file {title})"));
    out.raw_line(&format!("%%Creator: {CREATOR}"));
    out.raw_line("%%Pages: 1");
    procset(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::emitter::CoordStyle;

    #[test]
    fn panel_header_names_the_paper() {
        let mut out = Emitter::new(CoordStyle::Fixed);
        panel_header(&mut out, "radio.panel", "a3");
        let ps = out.finish();
        let lines: Vec<&str> = ps.split("\r\n").collect();
        assert_eq!(lines[0], "%!PS-Adobe-2.0");
        assert_eq!(lines[1], "%%Title: (Panel from file radio.panel)");
        assert!(lines.contains(&"%%DocumentPaperSizes: a3"));
        assert!(lines.contains(&"%%Orientation: Landscape"));
        assert_eq!(lines[lines.len() - 3], "%%Page: 1 1");
    }

    #[test]
    fn dial_header_has_no_page_comments() {
        let mut out = Emitter::new(CoordStyle::Integer);
        dial_header(&mut out, "dial.txt");
        let ps = out.finish();
        assert!(ps.contains("%%Title: (Dial from file dial.txt)\r\n"));
        assert!(!ps.contains("%%Page:"));
        assert!(ps.contains("exch rmoveto show } bind def\r\n%%EndProcSet\r\n%%EndProlog\r\n"));
    }
}
