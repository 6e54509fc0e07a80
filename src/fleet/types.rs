/// Deterministic instance name. The fleet keeps no registry: every component
/// recomputes names from the image tag and the index range.
pub fn instance_name(image: &str, index: usize) -> String {
    format!("{image}-{index}")
}

/// What one poll of one instance observed.
///
/// `Unreachable` is kept distinct from `Faulted` so the reporter can flag the
/// conservative reading, but both render as faulted in the status table: a
/// dead instance must never read as healthy and bug-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceStatus {
    Clean,
    Faulted,
    Unreachable,
}

impl InstanceStatus {
    pub fn shows_fault(&self) -> bool {
        !matches!(self, InstanceStatus::Clean)
    }
}
