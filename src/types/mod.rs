mod arch;
pub mod config;

pub use arch::Architecture;
