//! Compares the Rust layouts against a [`LayoutSource`].

use crate::source::{LayoutSource, Query};
use crate::StructLayout;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Match,
    Mismatch,
    /// The source had no value for the query.
    Missing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Check {
    pub query: Query,
    /// Value computed from the Rust declaration.
    pub rust: usize,
    /// Value reported by the source.
    pub expected: Option<usize>,
}

impl Check {
    pub fn status(&self) -> Status {
        match self.expected {
            Some(expected) if expected == self.rust => Status::Match,
            Some(_) => Status::Mismatch,
            None => Status::Missing,
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status() == Status::Match
    }
}

pub struct StructReport {
    pub name: &'static str,
    pub checks: Vec<Check>,
}

impl StructReport {
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.is_ok())
    }
}

pub struct Report {
    /// Name of the source the layouts were checked against.
    pub source: String,
    pub structs: Vec<StructReport>,
}

impl Report {
    pub fn checks(&self) -> impl Iterator<Item = &Check> {
        self.structs.iter().flat_map(|s| s.checks.iter())
    }

    pub fn mismatches(&self) -> usize {
        self.checks()
            .filter(|c| c.status() == Status::Mismatch)
            .count()
    }

    pub fn missing(&self) -> usize {
        self.checks()
            .filter(|c| c.status() == Status::Missing)
            .count()
    }

    pub fn failures(&self) -> usize {
        self.checks().filter(|c| !c.is_ok()).count()
    }

    pub fn is_ok(&self) -> bool {
        self.checks().all(Check::is_ok)
    }
}

/// Checks every value of a single structure's layout.
pub fn compare(layout: &StructLayout, source: &dyn LayoutSource) -> StructReport {
    let checks = Query::all(layout)
        .into_iter()
        .filter_map(|query| {
            let rust = query.eval(layout)?;
            Some(Check {
                query,
                rust,
                expected: source.query(&query),
            })
        })
        .collect();

    StructReport {
        name: layout.name,
        checks,
    }
}

/// Checks the given layouts against a source, logging every failed check.
pub fn run<'l, I>(layouts: I, source: &dyn LayoutSource) -> Report
where
    I: IntoIterator<Item = &'l StructLayout>,
{
    let mut report = Report {
        source: source.name().to_owned(),
        structs: Vec::new(),
    };

    for layout in layouts {
        log::debug!("checking {} against {}", layout.name, source.name());
        let struct_report = compare(layout, source);

        for check in struct_report.failures() {
            match check.expected {
                Some(expected) => log::warn!(
                    "{} is {} in rust but {} according to {}",
                    check.query,
                    check.rust,
                    expected,
                    source.name()
                ),
                None => log::warn!("{} has no value for {}", source.name(), check.query),
            }
        }

        report.structs.push(struct_report);
    }

    log::info!(
        "checked {} values in {} structures: {} mismatched, {} missing",
        report.checks().count(),
        report.structs.len(),
        report.mismatches(),
        report.missing()
    );

    report
}
