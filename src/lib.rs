pub mod check;
pub mod error;
pub mod source;
pub mod sysz;

pub use capstone::{FieldLayout, StructLayout};
pub use check::{Check, Report, Status, StructReport};
pub use error::Error;
pub use source::{CompilerProbe, LayoutSource, Query, RustLayouts, StaticSource};
