// Fleet lifecycle: provisioning, polling, and the watch loop.

pub mod poll;
pub mod provision;
pub mod types;
pub mod watch;

pub use poll::{poll_fleet, poll_instance};
pub use provision::{ArchiveSummary, archive_previous_results, provision};
pub use types::{InstanceStatus, instance_name};
pub use watch::run_fleet;
