use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation token backed by an `AtomicBool`.
///
/// SIGINT sets it; the watch loop observes it between cycles and performs
/// teardown itself, so no container is ever killed from inside a signal
/// handler.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Bind mount of a host results folder into an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountSpec {
    pub host_dir: PathBuf,
    pub container_dir: String,
}

/// Everything needed to launch one detached, self-removing instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSpec {
    pub name: String,
    pub image: String,
    pub mount: Option<MountSpec>,
    pub extra_args: Vec<String>,
    pub map_user: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_starts_uncancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancel_is_idempotent() {
        let token = CancelToken::new();
        token.cancel();
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_across_clones_and_threads() {
        let a = CancelToken::new();
        let b = a.clone();
        let handle = std::thread::spawn(move || b.cancel());
        handle.join().expect("join");
        assert!(a.is_cancelled());
    }
}
