use crate::error::Error;
use crate::StructLayout;
use std::collections::HashMap;
use std::fmt;

/// A single layout value that can be asked of a [`LayoutSource`]. These are
/// displayed the same way the C probe names them, e.g. `offsetof(cs_sysz, cc)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    SizeOf(&'static str),
    AlignOf(&'static str),
    OffsetOf(&'static str, &'static str),
    FieldSize(&'static str, &'static str),
}

impl Query {
    /// All of the queries for a structure: its size and alignment followed by
    /// the offset and size of each field.
    pub fn all(layout: &StructLayout) -> Vec<Query> {
        let mut queries = Vec::with_capacity(2 + layout.fields.len() * 2);
        queries.push(Query::SizeOf(layout.name));
        queries.push(Query::AlignOf(layout.name));
        for field in layout.fields {
            queries.push(Query::OffsetOf(layout.name, field.name));
            queries.push(Query::FieldSize(layout.name, field.name));
        }
        queries
    }

    /// The name of the structure this query is about.
    pub fn struct_name(&self) -> &'static str {
        match *self {
            Query::SizeOf(s) | Query::AlignOf(s) => s,
            Query::OffsetOf(s, _) | Query::FieldSize(s, _) => s,
        }
    }

    pub fn is_field_size(&self) -> bool {
        matches!(self, Query::FieldSize(..))
    }

    /// Answers this query from a Rust layout. Returns `None` if the layout
    /// is for a different structure or does not have the field.
    pub fn eval(&self, layout: &StructLayout) -> Option<usize> {
        if self.struct_name() != layout.name {
            return None;
        }

        match *self {
            Query::SizeOf(_) => Some(layout.size),
            Query::AlignOf(_) => Some(layout.align),
            Query::OffsetOf(_, f) => layout.field(f).map(|f| f.offset),
            Query::FieldSize(_, f) => layout.field(f).map(|f| f.size),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::SizeOf(s) => write!(f, "sizeof({})", s),
            Query::AlignOf(s) => write!(f, "alignof({})", s),
            Query::OffsetOf(s, field) => write!(f, "offsetof({}, {})", s, field),
            Query::FieldSize(s, field) => write!(f, "fieldsize({}, {})", s, field),
        }
    }
}

/// Something that knows the layout of the C structures.
pub trait LayoutSource {
    /// A short name for this source used in logs.
    fn name(&self) -> &str;

    /// Returns the value for a query or `None` if the source doesn't know it.
    fn query(&self, query: &Query) -> Option<usize>;
}

/// The layout computed by the C compiler from the capstone headers.
pub struct CompilerProbe;

impl LayoutSource for CompilerProbe {
    fn name(&self) -> &str {
        "c compiler"
    }

    fn query(&self, query: &Query) -> Option<usize> {
        let value = capstone::probe(&query.to_string());
        log::trace!("probe {} -> {:?}", query, value);
        value
    }
}

/// The layout of the Rust declarations themselves.
pub struct RustLayouts<'l>(pub &'l [StructLayout]);

impl<'l> LayoutSource for RustLayouts<'l> {
    fn name(&self) -> &str {
        "rust"
    }

    fn query(&self, query: &Query) -> Option<usize> {
        self.0.iter().find_map(|layout| query.eval(layout))
    }
}

/// Layout values read from text, such as the saved output of a probe that was
/// run on another machine.
#[derive(Default)]
pub struct StaticSource {
    name: String,
    values: HashMap<String, usize>,
}

impl StaticSource {
    pub fn new<N: Into<String>>(name: N) -> StaticSource {
        StaticSource {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Sets the value for a query name. Whitespace in the name is ignored, so
    /// `offsetof(cs_sysz,cc)` and `offsetof(cs_sysz, cc)` are the same entry.
    /// Returns the value that was replaced.
    pub fn insert<K: AsRef<str>>(&mut self, name: K, value: usize) -> Option<usize> {
        self.values.insert(normalize_key(name.as_ref()), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parses saved layout values. Two formats are understood and may be mixed:
    ///
    /// - `sizeof(cs_sysz) = 200` lines, as printed by this tool. Anything after
    ///   the value is ignored.
    /// - The sizes and offset table printed by the capstone test program:
    ///   `[*] cs_sysz: 200` and `cs_sysz_op: 32` give sizes, a
    ///   `cs_sysz_op<TAB>offset<TAB>size` line starts a table, and rows such as
    ///   `union.reg: 8 4` give the offset and size of a field.
    ///
    /// Blank lines, lines starting with `#` and header file names are skipped.
    /// A value given twice keeps the later one.
    pub fn parse<N: Into<String>>(name: N, text: &str) -> Result<StaticSource, Error> {
        let mut source = StaticSource::new(name);
        let mut table: Option<String> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.ends_with(".h") {
                continue;
            }

            if let Some((key, rest)) = line.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    return Err(Error::msg(format!("line {}: missing name", line_no)));
                }
                let value = parse_value(line_no, key, rest.split_whitespace().next())?;
                source.define(line_no, key, value);
            } else if let Some((key, rest)) = line.split_once(':') {
                let key = key.trim_start_matches("[*]").trim();
                if key.is_empty() {
                    return Err(Error::msg(format!("line {}: missing name", line_no)));
                }

                let mut values = rest.split_whitespace();
                let first = values.next();
                match values.next() {
                    None => {
                        let size = parse_value(line_no, key, first)?;
                        source.define(line_no, &format!("sizeof({})", key), size);
                    }

                    second => {
                        let ty = table.as_deref().ok_or_else(|| {
                            Error::msg(format!(
                                "line {}: field `{}` is outside of an offset table",
                                line_no, key
                            ))
                        })?;
                        let field = key.trim_start_matches("union.");
                        let offset = parse_value(line_no, key, first)?;
                        let size = parse_value(line_no, key, second)?;
                        source.define(line_no, &format!("offsetof({}, {})", ty, field), offset);
                        source.define(line_no, &format!("fieldsize({}, {})", ty, field), size);
                    }
                }
            } else {
                let words = line.split_whitespace().collect::<Vec<_>>();
                match words.as_slice() {
                    [ty, offset, size]
                        if offset.eq_ignore_ascii_case("offset")
                            && size.eq_ignore_ascii_case("size") =>
                    {
                        table = Some((*ty).to_owned());
                    }
                    _ => {
                        return Err(Error::msg(format!(
                            "line {}: expected `name = value`",
                            line_no
                        )))
                    }
                }
            }
        }

        Ok(source)
    }

    fn define(&mut self, line_no: usize, key: &str, value: usize) {
        match self.insert(key, value) {
            Some(previous) if previous != value => log::warn!(
                "line {}: {} was {} and is redefined as {}",
                line_no,
                key,
                previous,
                value
            ),
            _ => {}
        }
    }
}

fn parse_value(line_no: usize, key: &str, value: Option<&str>) -> Result<usize, Error> {
    let value = value.unwrap_or("");
    value.parse::<usize>().map_err(|err| {
        Error::new(
            format!("line {}: invalid value `{}` for {}", line_no, value, key),
            Box::new(err),
        )
    })
}

fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

impl LayoutSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, query: &Query) -> Option<usize> {
        self.values.get(&normalize_key(&query.to_string())).copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use capstone::sysz::{DETAILS_LAYOUT, OP_MEM_LAYOUT};
    use std::error::Error as _;

    #[test]
    fn query_names_match_probe() {
        assert_eq!(Query::SizeOf("cs_sysz").to_string(), "sizeof(cs_sysz)");
        assert_eq!(Query::AlignOf("cs_sysz").to_string(), "alignof(cs_sysz)");
        assert_eq!(
            Query::OffsetOf("sysz_op_mem", "base").to_string(),
            "offsetof(sysz_op_mem, base)"
        );
        assert_eq!(
            Query::FieldSize("cs_sysz_op", "mem").to_string(),
            "fieldsize(cs_sysz_op, mem)"
        );
    }

    #[test]
    fn queries_for_layout() {
        let queries = Query::all(&OP_MEM_LAYOUT);
        assert_eq!(queries.len(), 2 + 4 * 2);
        assert_eq!(queries[0], Query::SizeOf("sysz_op_mem"));
        assert_eq!(queries[1], Query::AlignOf("sysz_op_mem"));
        assert_eq!(queries[2], Query::OffsetOf("sysz_op_mem", "base"));
        assert_eq!(queries[3], Query::FieldSize("sysz_op_mem", "base"));
        assert_eq!(queries[9], Query::FieldSize("sysz_op_mem", "disp"));
    }

    #[test]
    fn eval_only_answers_for_own_struct() {
        assert_eq!(
            Query::SizeOf("cs_sysz").eval(&DETAILS_LAYOUT),
            Some(DETAILS_LAYOUT.size)
        );
        assert_eq!(Query::SizeOf("cs_sysz").eval(&OP_MEM_LAYOUT), None);
        assert_eq!(Query::OffsetOf("cs_sysz", "flags").eval(&DETAILS_LAYOUT), None);
    }

    #[test]
    fn compiler_probe_knows_every_query() {
        for layout in capstone::sysz::LAYOUTS {
            for query in Query::all(layout) {
                assert!(CompilerProbe.query(&query).is_some(), "{}", query);
            }
        }
        assert_eq!(CompilerProbe.query(&Query::SizeOf("cs_arm")), None);
    }

    #[test]
    fn parse_probe_output() {
        let text = "\
            # recorded on s390x\n\
            sizeof(sysz_op_mem) = 24\n\
            \n\
            offsetof(sysz_op_mem, base) = 0\n\
            offsetof(sysz_op_mem, disp) = 16  ok\n\
            offsetof(cs_sysz, op_count) = 3  mismatch (rust = 4)\n";
        let source = StaticSource::parse("recorded", text).unwrap();

        assert_eq!(source.name(), "recorded");
        assert_eq!(source.len(), 4);
        assert_eq!(source.query(&Query::SizeOf("sysz_op_mem")), Some(24));
        assert_eq!(source.query(&Query::OffsetOf("sysz_op_mem", "disp")), Some(16));
        assert_eq!(source.query(&Query::OffsetOf("cs_sysz", "op_count")), Some(3));
        assert_eq!(source.query(&Query::AlignOf("sysz_op_mem")), None);
    }

    const CAPSTONE_TEST_OUTPUT: &str = "systemz.h\n\
        [*] sysz_op_mem: 24\n\
        [*] cs_sysz_op: 32\n\
        [*] cs_sysz: 200\n\
        cs_sysz_op: 32\n\
        cs_sysz_op\toffset\tsize\n\
        type:\t\t0\t4\n\
        union.reg:\t8\t4\n\
        union.imm:\t8\t8\n\
        union.mem:\t8\t24\n";

    #[test]
    fn parse_capstone_test_output() {
        let source = StaticSource::parse("capstone", CAPSTONE_TEST_OUTPUT).unwrap();

        assert_eq!(source.query(&Query::SizeOf("sysz_op_mem")), Some(24));
        assert_eq!(source.query(&Query::SizeOf("cs_sysz_op")), Some(32));
        assert_eq!(source.query(&Query::SizeOf("cs_sysz")), Some(200));
        assert_eq!(source.query(&Query::OffsetOf("cs_sysz_op", "type")), Some(0));
        assert_eq!(source.query(&Query::FieldSize("cs_sysz_op", "type")), Some(4));
        assert_eq!(source.query(&Query::OffsetOf("cs_sysz_op", "reg")), Some(8));
        assert_eq!(source.query(&Query::FieldSize("cs_sysz_op", "imm")), Some(8));
        assert_eq!(source.query(&Query::OffsetOf("cs_sysz_op", "mem")), Some(8));
        assert_eq!(source.query(&Query::FieldSize("cs_sysz_op", "mem")), Some(24));
        assert_eq!(source.query(&Query::AlignOf("cs_sysz_op")), None);
        assert_eq!(source.len(), 3 + 4 * 2);
    }

    #[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
    #[test]
    fn capstone_test_output_agrees_with_rust() {
        let source = StaticSource::parse("capstone", CAPSTONE_TEST_OUTPUT).unwrap();
        let rust = RustLayouts(capstone::sysz::LAYOUTS);

        for layout in capstone::sysz::LAYOUTS {
            for query in Query::all(layout) {
                if let Some(value) = source.query(&query) {
                    assert_eq!(rust.query(&query), Some(value), "{}", query);
                }
            }
        }
    }

    #[test]
    fn field_rows_need_a_table() {
        let err = StaticSource::parse("bad", "union.reg:\t8\t4\n").err().unwrap();
        assert_eq!(
            err.to_string(),
            "line 1: field `union.reg` is outside of an offset table"
        );
    }

    #[test]
    fn later_values_win() {
        let text = "sizeof(cs_sysz) = 200\n[*] cs_sysz: 196\n";
        let source = StaticSource::parse("dup", text).unwrap();
        assert_eq!(source.len(), 1);
        assert_eq!(source.query(&Query::SizeOf("cs_sysz")), Some(196));
    }

    #[test]
    fn whitespace_in_names_is_ignored() {
        let source = StaticSource::parse("ws", "offsetof(cs_sysz,cc) = 0\n").unwrap();
        assert_eq!(source.query(&Query::OffsetOf("cs_sysz", "cc")), Some(0));

        let mut source = StaticSource::new("ws");
        assert_eq!(source.insert("fieldsize( cs_sysz ,  op_count )", 1), None);
        assert_eq!(source.insert("fieldsize(cs_sysz, op_count)", 1), Some(1));
        assert_eq!(source.query(&Query::FieldSize("cs_sysz", "op_count")), Some(1));
    }

    #[test]
    fn parse_errors_name_the_line() {
        let err = StaticSource::parse("bad", "sizeof(cs_sysz) = 200\nsizeof(cs_sysz_op)\n")
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "line 2: expected `name = value`");

        let err = StaticSource::parse("bad", "sizeof(cs_sysz) = big\n").err().unwrap();
        assert_eq!(
            err.to_string(),
            "line 1: invalid value `big` for sizeof(cs_sysz)"
        );
        assert!(err.source().is_some());

        let err = StaticSource::parse("bad", " = 3\n").err().unwrap();
        assert_eq!(err.to_string(), "line 1: missing name");
    }
}
