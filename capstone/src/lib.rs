#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod macros;
pub mod arch;
pub mod layout;
mod sys;

#[cfg(feature = "systemz")]
pub use arch::sysz;
pub use layout::{FieldLayout, StructLayout};

/// Looks up a value computed by the C compiler for the capstone headers this
/// crate was built against, such as `sizeof(cs_sysz)` or
/// `offsetof(sysz_op_mem, disp)`. Returns `None` for names the probe does not know.
pub fn probe(name: &str) -> Option<usize> {
    sys::get_value(name)
}
