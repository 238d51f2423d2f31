use clap::Parser;
use termcolor::ColorChoice;

#[derive(Parser)]
#[clap(name = "sysz-layout", version = env!("CARGO_PKG_VERSION"))]
pub struct Opts {
    /// Names of the structures to print. All of them are printed if none
    /// are given.
    ///
    /// Possible values are: sysz_op_mem, cs_sysz_op, cs_sysz
    pub structs: Vec<String>,

    /// Print the layout of the Rust declarations without checking them.
    #[clap(long = "rust-only")]
    pub rust_only: bool,

    /// Check against layout values saved in a file instead of the values
    /// computed by the C compiler. The file can hold lines of the form
    /// `sizeof(cs_sysz) = 200` or the output of capstone's SystemZ struct
    /// size test program.
    #[clap(long = "expected")]
    pub expected: Option<String>,

    /// Also print the size of every field.
    #[clap(long = "fields")]
    pub fields: bool,

    /// Write the report to a file instead of stdout.
    #[clap(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Raises the log level. Errors and warnings are always logged, -v adds
    /// info, -vv debug and -vvv trace. Use `quiet` to turn logging off.
    #[clap(short, long, parse(from_occurrences))]
    pub verbose: u32,

    /// Disables logging.
    #[clap(short, long)]
    pub quiet: bool,

    /// Coloring: auto, always, never, and always-ansi (only uses ansi color codes).
    #[clap(long = "color", default_value = "auto", parse(try_from_str = parse_colorchoice))]
    pub color_choice: ColorChoice,
}

impl Opts {
    pub fn log_level_filter(&self) -> log::LevelFilter {
        use log::LevelFilter;

        if self.quiet {
            return LevelFilter::Off;
        }

        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub fn parse_colorchoice(s: &str) -> Result<ColorChoice, String> {
    if s.eq_ignore_ascii_case("auto") {
        Ok(ColorChoice::Auto)
    } else if s.eq_ignore_ascii_case("always") {
        Ok(ColorChoice::Always)
    } else if s.eq_ignore_ascii_case("never") {
        Ok(ColorChoice::Never)
    } else if s.eq_ignore_ascii_case("always-ansi") {
        Ok(ColorChoice::AlwaysAnsi)
    } else {
        Err(format!("{} is not a valid color value", s))
    }
}
