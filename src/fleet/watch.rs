use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::{Config, ImageChoice};
use crate::docker::{CancelToken, ContainerEngine};
use crate::report;

use super::poll::poll_fleet;
use super::provision::provision;

/// Granularity at which sleeps observe the cancellation token.
const CANCEL_POLL: Duration = Duration::from_millis(200);

/// Sleep for the given duration, waking early if cancellation is signalled.
fn sleep_cancellable(total: Duration, cancel: &CancelToken) {
    let deadline = Instant::now() + total;
    while !cancel.is_cancelled() {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }
        std::thread::sleep(remaining.min(CANCEL_POLL));
    }
}

/// Provision the fleet, then cycle (sleep, poll all instances, print) until
/// cancelled, then tear everything down. The whole lifecycle of one `run`
/// invocation.
pub fn run_fleet(
    cfg: &Config,
    choice: ImageChoice,
    instances_override: Option<usize>,
    engine: &dyn ContainerEngine,
    base: &std::path::Path,
    cancel: &CancelToken,
    out: &mut dyn Write,
) -> Result<()> {
    let image = cfg.image_tag(choice);
    let instances = instances_override.unwrap_or(cfg.instances);

    writeln!(out, "\nStarting instances...")?;
    let names = provision(cfg, image, instances, engine, base, out)?;

    // Give the database servers time to come up before the first poll.
    sleep_cancellable(Duration::from_secs(cfg.warmup_secs), cancel);

    if !cancel.is_cancelled() {
        writeln!(out, "\nWatching...")?;
    }

    let start = Instant::now();
    while !cancel.is_cancelled() {
        sleep_cancellable(Duration::from_secs(cfg.poll_interval_secs), cancel);
        if cancel.is_cancelled() {
            break;
        }
        let statuses = poll_fleet(engine, &names, &cfg.evidence_path);
        report::print_cycle(out, start.elapsed(), &names, &statuses)?;
    }

    teardown(engine, out)
}

/// Best-effort global teardown. Failures are reported, not propagated: the
/// interrupt path must still exit successfully.
fn teardown(engine: &dyn ContainerEngine, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\n\nKilling all containers...")?;
    match engine.kill_all() {
        Ok(ids) => writeln!(out, "killed {} container(s)", ids.len())?,
        Err(e) => writeln!(out, "warning: teardown failed: {e:#}")?,
    }
    Ok(())
}
