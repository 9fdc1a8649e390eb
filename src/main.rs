use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use dialpanel::errors::ConfigWarning;
use dialpanel::render::page::PageFit;
use dialpanel::{Limits, parse, render};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit statuses
mod status {
    pub const USAGE: u8 = 1;
    pub const CONFIG: u8 = 3;
    pub const OPEN: u8 = 8;
    /// EX_IOERR
    pub const OUTPUT: u8 = 74;
}

#[derive(Parser)]
#[command(name = "dialpanel")]
#[command(about = "Generate PostScript artwork for dials and front panels", long_about = None)]
#[command(version)]
struct Cli {
    /// Description file; without it, `--dial` draws the default dial
    #[arg(value_hint = clap::ValueHint::FilePath)]
    file: Option<Utf8PathBuf>,

    /// Draw one dial on its own page instead of a panel
    #[arg(long)]
    dial: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of dials on a panel
    #[arg(long, default_value_t = Limits::default().dials)]
    max_dials: usize,

    /// Maximum number of control holes on a panel
    #[arg(long, default_value_t = Limits::default().controls)]
    max_controls: usize,

    /// Maximum number of rectangles on a panel, both kinds combined
    #[arg(long, default_value_t = Limits::default().rectangles)]
    max_rectangles: usize,

    /// Maximum number of text labels on a panel
    #[arg(long, default_value_t = Limits::default().labels)]
    max_labels: usize,
}

impl Cli {
    fn limits(&self) -> Limits {
        Limits {
            dials: self.max_dials,
            controls: self.max_controls,
            rectangles: self.max_rectangles,
            labels: self.max_labels,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(status::USAGE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();

    info!("dialpanel {}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run(cli: &Cli) -> Result<(), u8> {
    let (name, source) = match &cli.file {
        Some(path) => {
            let source = parse::read_source(path).map_err(|err| {
                eprintln!("{:?}", miette::Report::new(err));
                status::OPEN
            })?;
            (path.to_string(), source)
        }
        None if cli.dial => ("<default>".to_string(), String::new()),
        None => {
            eprintln!("Usage: dialpanel <panel description file> > <output_file.ps>");
            return Err(status::USAGE);
        }
    };

    let (postscript, page) = if cli.dial {
        let parsed = parse::parse_dial_sheet(&name, &source);
        report_warnings(parsed.warnings);
        let postscript = render::render_dial_sheet(&parsed.value, &name);
        (postscript.map_err(config_failure)?, None)
    } else {
        let parsed = parse::parse_panel(&name, &source, &cli.limits());
        report_warnings(parsed.warnings);
        let drawing = render::render_panel(&parsed.value, &name).map_err(config_failure)?;
        (drawing.postscript, Some(drawing.page))
    };

    write_output(&postscript).map_err(|err| {
        eprintln!("{:?}", miette::Report::msg(format!("cannot write output: {err}")));
        status::OUTPUT
    })?;
    debug!("wrote {} bytes", postscript.len());

    if let Some(page) = page {
        paper_advisory(&page);
    }
    Ok(())
}

fn report_warnings(warnings: Vec<ConfigWarning>) {
    for warning in warnings {
        eprintln!("{:?}", miette::Report::new(warning));
    }
}

fn config_failure(err: dialpanel::RenderError) -> u8 {
    eprintln!("{:?}", miette::Report::new(err));
    status::CONFIG
}

fn paper_advisory(page: &PageFit) {
    if let Some(advisory) = page.advisory() {
        eprintln!("{:?}", miette::Report::new(advisory));
    }
}

fn write_output(postscript: &str) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(postscript.as_bytes())?;
    out.flush()
}
