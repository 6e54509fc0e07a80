// Container runtime access: typed operations, blocking CLI invocation,
// cancellation.

pub mod commands;
pub mod engine;
pub mod types;

pub use engine::{CliEngine, ContainerEngine, ensure_available, user_args};
pub use types::{CancelToken, CreateSpec, MountSpec};
