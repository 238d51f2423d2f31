#[cfg(feature = "systemz")]
pub mod sysz;
