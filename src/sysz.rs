//! The SystemZ detail types whose layouts can be checked.

use crate::error::Error;
use crate::StructLayout;

/// Layouts of `sysz_op_mem`, `cs_sysz_op` and `cs_sysz`, in that order.
pub fn layouts() -> &'static [StructLayout] {
    capstone::sysz::LAYOUTS
}

/// Finds the layout of a structure by its C name, ignoring case.
pub fn find(name: &str) -> Result<&'static StructLayout, Error> {
    layouts()
        .iter()
        .find(|layout| layout.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::msg(format!("unknown structure `{}`", name)))
}

/// Selects layouts by name, keeping the order in which they were first named.
/// Every layout is selected if no names are given.
pub fn select<S: AsRef<str>>(names: &[S]) -> Result<Vec<&'static StructLayout>, Error> {
    if names.is_empty() {
        return Ok(layouts().iter().collect());
    }

    let mut selected: Vec<&'static StructLayout> = Vec::with_capacity(names.len());
    for name in names {
        let layout = find(name.as_ref())?;
        if !selected.iter().any(|s| s.name == layout.name) {
            selected.push(layout);
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn layouts_are_innermost_first() {
        let names = layouts().iter().map(|l| l.name).collect::<Vec<_>>();
        assert_eq!(names, ["sysz_op_mem", "cs_sysz_op", "cs_sysz"]);
    }

    #[test]
    fn find_ignores_case() {
        assert_eq!(find("CS_SYSZ").unwrap().name, "cs_sysz");
        let err = find("cs_x86").unwrap_err();
        assert_eq!(err.to_string(), "unknown structure `cs_x86`");
    }

    #[test]
    fn select_dedups_and_keeps_order() {
        let selected = select(&["cs_sysz", "sysz_op_mem", "Cs_Sysz"]).unwrap();
        let names = selected.iter().map(|l| l.name).collect::<Vec<_>>();
        assert_eq!(names, ["cs_sysz", "sysz_op_mem"]);

        let none: &[&str] = &[];
        assert_eq!(select(none).unwrap().len(), 3);

        assert!(select(&["cs_sysz", "nope"]).is_err());
    }
}
