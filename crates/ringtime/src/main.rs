use clap::{Args, Parser, Subcommand, ValueEnum};
use ringtime::resolver::{self, Range};
use ringtime::time::{ClockTime, Interval, OpenCloseWindow, Step};
use ringtime::{DialConfig, DialControl, Handle, svg};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ringtime", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the dial as an SVG document
    Render {
        #[command(flatten)]
        dial: DialArgs,

        /// Write to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Check where a handle would land if dragged to a value
    Resolve {
        #[command(flatten)]
        dial: DialArgs,

        /// The handle being dragged
        #[arg(long, value_enum)]
        handle: HandleArg,

        /// The step the handle is dragged to
        #[arg(long)]
        value: Step,
    },
}

#[derive(Args, Debug)]
struct DialArgs {
    /// Rendered width in pixels
    #[arg(long, default_value_t = 300.0)]
    width: f64,

    /// Opening time (HH:MM, minutes 00 or 30)
    #[arg(long, default_value = "08:00")]
    open: ClockTime,

    /// Closing time (HH:MM, minutes 00 or 30)
    #[arg(long, default_value = "23:00")]
    close: ClockTime,

    /// Unavailable interval in steps, e.g. 34-40. May be repeated.
    #[arg(short = 'u', long = "unavailable")]
    unavailable: Vec<Interval>,

    /// Current start step
    #[arg(long, default_value_t = 20)]
    start: Step,

    /// Current end step
    #[arg(long, default_value_t = 30)]
    end: Step,
}

impl DialArgs {
    fn split(self) -> (DialConfig, Range) {
        let config = DialConfig::new(
            self.width,
            OpenCloseWindow::new(self.open, self.close),
            self.unavailable,
        );
        (config, Range::new(self.start, self.end))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum HandleArg {
    Start,
    End,
}

impl From<HandleArg> for Handle {
    fn from(arg: HandleArg) -> Self {
        match arg {
            HandleArg::Start => Handle::Start,
            HandleArg::End => Handle::End,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { dial, output } => render(dial, output),
        Commands::Resolve {
            dial,
            handle,
            value,
        } => resolve(dial, handle.into(), value),
    }
}

fn render(dial: DialArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, range) = dial.split();
    let width = config.width;
    let document = svg::render(&DialControl::new(config).frame(range), width);

    match output {
        Some(path) => {
            fs_err::write(&path, document)?;
            log::info!("Wrote {}", path.display());
        }
        None => std::io::stdout().write_all(document.as_bytes())?,
    }
    Ok(())
}

fn resolve(dial: DialArgs, handle: Handle, value: Step) -> anyhow::Result<()> {
    let (config, range) = dial.split();
    if !(ringtime::time::MIN_VAL..ringtime::time::MAX_VAL).contains(&value) {
        anyhow::bail!("Step {} is outside the dial (0..48)", value);
    }

    let decision = resolver::resolve(handle, value, range, &config.window, &config.unavailable);
    let next = decision
        .request(handle, range)
        .map(Range::from)
        .unwrap_or(range);

    println!("{:?}", decision);
    println!(
        "{} ({})",
        ringtime::display::range_label(next),
        ringtime::display::duration_text(next)
    );
    Ok(())
}
