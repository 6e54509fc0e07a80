//! SIGINT wiring. The handler only cancels a process-global token; all
//! teardown happens in the main control flow once the watch loop observes
//! the cancellation.

use std::sync::OnceLock;

use anyhow::{Result, bail};

use crate::docker::CancelToken;

static INSTALLED: OnceLock<CancelToken> = OnceLock::new();

/// Install an interrupt handler that cancels the given token. May only be
/// called once per process.
pub fn install(token: &CancelToken) -> Result<()> {
    if INSTALLED.set(token.clone()).is_err() {
        bail!("interrupt handler already installed");
    }

    #[cfg(unix)]
    {
        let handler = on_interrupt as extern "C" fn(libc::c_int);
        // SAFETY: the handler only performs an atomic store via the token,
        // which is async-signal-safe.
        let previous = unsafe { libc::signal(libc::SIGINT, handler as libc::sighandler_t) };
        if previous == libc::SIG_ERR {
            bail!("failed to install SIGINT handler");
        }
    }

    Ok(())
}

#[cfg(unix)]
extern "C" fn on_interrupt(_signum: libc::c_int) {
    if let Some(token) = INSTALLED.get() {
        token.cancel();
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn sigint_cancels_the_installed_token() {
        let token = CancelToken::new();
        install(&token).expect("install");

        // SAFETY: raise() delivers SIGINT to this process; the handler
        // installed above catches it, so the test harness survives.
        unsafe { libc::raise(libc::SIGINT) };

        assert!(token.is_cancelled());
        // A second install must be rejected; the global token is fixed.
        assert!(install(&CancelToken::new()).is_err());
    }
}
