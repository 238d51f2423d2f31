pub mod cli;
pub mod logging;
mod printer;

use anyhow::Context as _;
use clap::Parser as _;
use cli::Opts;
use layout::{check, CompilerProbe, LayoutSource, RustLayouts, StaticSource};
use logging::AppLogger;
use printer::PrintOptions;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

pub fn run() -> anyhow::Result<()> {
    let opts = Opts::parse();

    unsafe { AppLogger::instance().set_level(opts.log_level_filter()) };
    let color_choice = match opts.color_choice {
        ColorChoice::Auto => unsafe {
            AppLogger::instance().set_color_choice_err(if atty::is(atty::Stream::Stderr) {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            });

            if atty::is(atty::Stream::Stdout) {
                ColorChoice::Always
            } else {
                ColorChoice::Never
            }
        },

        choice => unsafe {
            AppLogger::instance().set_color_choice_err(choice);
            choice
        },
    };

    if opts.rust_only && opts.expected.is_some() {
        return Err(anyhow::anyhow!(
            "--rust-only and --expected cannot be used together"
        ));
    }

    let layouts = layout::sysz::select(&opts.structs)?;
    let source = layout_source(&opts)?;
    log::debug!(
        "checking {} structures against {}",
        layouts.len(),
        source.name()
    );

    let report = check::run(layouts.iter().copied(), &*source);
    let print_options = PrintOptions {
        fields: opts.fields,
        statuses: !opts.rust_only,
    };

    if let Some(ref output) = opts.output {
        let path = expand_path(output)?;
        let file = File::create(&path)
            .with_context(|| format!("failed to create output file `{}`", path.display()))?;
        let mut out = NoColor::new(BufWriter::new(file));
        print(&mut out, &report, &print_options)?;
        log::info!("wrote layout report to {}", path.display());
    } else {
        let mut stdout = StandardStream::stdout(color_choice);
        print(&mut stdout, &report, &print_options)?;
    }

    if !report.is_ok() {
        return Err(anyhow::anyhow!(
            "{} layout checks failed ({} mismatched, {} missing)",
            report.failures(),
            report.mismatches(),
            report.missing()
        ));
    }

    Ok(())
}

fn print(
    out: &mut dyn WriteColor,
    report: &layout::Report,
    options: &PrintOptions,
) -> anyhow::Result<()> {
    printer::print_report(out, report, options)
        .and_then(|_| out.flush())
        .context("error occurred while printing layout report")
}

/// Chooses where the expected layout values come from.
fn layout_source(opts: &Opts) -> anyhow::Result<Box<dyn LayoutSource>> {
    if opts.rust_only {
        return Ok(Box::new(RustLayouts(layout::sysz::layouts())));
    }

    if let Some(ref expected) = opts.expected {
        let path = expand_path(expected)?;
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read layout file `{}`", path.display()))?;
        let source = StaticSource::parse(path.display().to_string(), &text)
            .with_context(|| format!("failed to parse layout file `{}`", path.display()))?;
        log::debug!("read {} layout values from {}", source.len(), path.display());
        return Ok(Box::new(source));
    }

    Ok(Box::new(CompilerProbe))
}

fn expand_path(path: &str) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("failed to expand path `{}`", path))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
