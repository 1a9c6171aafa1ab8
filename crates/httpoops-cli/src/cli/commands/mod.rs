//! CLI command handlers. Each command is in its own file.

mod policy;
pub(crate) mod probe;

pub use policy::run_policy;
pub use probe::{run_probe, ProbeArgs};
