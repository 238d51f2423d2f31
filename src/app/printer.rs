use layout::{Report, Status};
use termcolor::{Color, ColorSpec, WriteColor};

pub struct PrintOptions {
    /// Print `fieldsize` lines even when they match.
    pub fields: bool,
    /// Print whether each value matches the Rust declaration.
    pub statuses: bool,
}

/// Prints a report in the same `sizeof(T) = N` form that the C probe uses.
pub fn print_report(
    out: &mut dyn WriteColor,
    report: &Report,
    options: &PrintOptions,
) -> std::io::Result<()> {
    let clr_norm = ColorSpec::new(); // normal color

    let mut clr_query = ColorSpec::new(); // query color
    clr_query.set_fg(Some(Color::Cyan));

    let mut clr_ok = ColorSpec::new(); // matching value color
    clr_ok.set_fg(Some(Color::Green));

    let mut clr_bad = ColorSpec::new(); // mismatched value color
    clr_bad.set_fg(Some(Color::Red));
    clr_bad.set_bold(true);

    let mut clr_miss = ColorSpec::new(); // missing value color
    clr_miss.set_fg(Some(Color::Yellow));

    let visible = |status: Status, field_size: bool| {
        !field_size || options.fields || (options.statuses && status != Status::Match)
    };

    let max_query = report
        .checks()
        .filter(|c| visible(c.status(), c.query.is_field_size()))
        .map(|c| c.query.to_string().len())
        .max()
        .unwrap_or(0);

    for (idx, s) in report.structs.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }

        for check in s.checks.iter() {
            let status = check.status();
            if !visible(status, check.query.is_field_size()) {
                continue;
            }

            out.set_color(&clr_query)?;
            write!(out, "{:<1$}", check.query.to_string(), max_query)?;
            out.set_color(&clr_norm)?;
            write!(out, " = ")?;

            let value = match check.expected {
                Some(value) => value.to_string(),
                None => String::from("?"),
            };

            if options.statuses {
                write!(out, "{:<4}  ", value)?;
                match status {
                    Status::Match => {
                        out.set_color(&clr_ok)?;
                        write!(out, "ok")?;
                    }
                    Status::Mismatch => {
                        out.set_color(&clr_bad)?;
                        write!(out, "mismatch (rust = {})", check.rust)?;
                    }
                    Status::Missing => {
                        out.set_color(&clr_miss)?;
                        write!(out, "missing (rust = {})", check.rust)?;
                    }
                }
            } else {
                write!(out, "{}", value)?;
            }

            out.set_color(&clr_norm)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use layout::{check, RustLayouts, StaticSource};
    use termcolor::NoColor;

    fn render(report: &Report, options: &PrintOptions) -> String {
        let mut out = NoColor::new(Vec::new());
        print_report(&mut out, report, options).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn rust_only_output() {
        let op_mem = layout::sysz::find("sysz_op_mem").unwrap();
        let report = check::run(Some(op_mem), &RustLayouts(layout::sysz::layouts()));
        let text = render(
            &report,
            &PrintOptions {
                fields: false,
                statuses: false,
            },
        );

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("sizeof(sysz_op_mem) "));
        assert!(lines[2].starts_with("offsetof(sysz_op_mem, base) "));
        assert!(lines[2].trim_end().ends_with("= 0"));
        assert!(!text.contains("fieldsize"));
        assert!(!text.contains("ok"));
        assert!(lines.iter().all(|l| !l.ends_with(' ')));
    }

    #[test]
    fn failed_field_sizes_are_always_shown() {
        let details = layout::sysz::find("cs_sysz").unwrap();
        let mut source = StaticSource::new("fixture");
        source.insert("fieldsize(cs_sysz, op_count)", 4);

        let report = check::run(Some(details), &source);
        let text = render(
            &report,
            &PrintOptions {
                fields: false,
                statuses: true,
            },
        );

        assert!(text.contains("mismatch (rust = 1)"));
        assert!(text.contains("fieldsize(cs_sysz, op_count)"));
        assert!(text.contains("missing (rust = "));
        assert!(!text.contains("ok"));
    }
}
