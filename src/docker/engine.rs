use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};

use super::commands;
use super::types::CreateSpec;

/// The container operations the fleet needs. One blocking call per
/// operation, no timeouts; a hung runtime stalls the loop, which is the
/// accepted trade-off for an attended tool.
///
/// Tests substitute an in-memory implementation instead of a real runtime.
pub trait ContainerEngine {
    /// Launch one detached, self-removing instance.
    fn create(&self, spec: &CreateSpec) -> Result<()>;

    /// Listing of the instance's working directory. Errors and empty output
    /// both mean the instance is not usefully reachable.
    fn list_top_level(&self, name: &str) -> Result<String>;

    /// Listing of a directory inside the instance.
    fn list_subdir(&self, name: &str, path: &str) -> Result<String>;

    /// Kill every running container on the host, returning the ids that were
    /// signalled. Deliberately blunt: this is a fleet-fuzzing tool, not a
    /// multi-tenant-safe service.
    fn kill_all(&self) -> Result<Vec<String>>;
}

/// Real engine: shells out to the configured runtime binary.
#[derive(Debug, Clone)]
pub struct CliEngine {
    runtime: String,
}

impl CliEngine {
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
        }
    }

    /// Run one runtime invocation to completion and return its stdout.
    fn output(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.runtime)
            .args(args)
            .output()
            .with_context(|| format!("failed to invoke `{}`", self.runtime))?;
        if !output.status.success() {
            bail!(
                "`{} {}` failed ({}): {}",
                self.runtime,
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Build an image from its recipe, streaming output to the operator.
    /// Returns the runtime's exit status unmodified.
    pub fn build_image(&self, tag: &str, recipe: &std::path::Path) -> Result<std::process::ExitStatus> {
        Command::new(&self.runtime)
            .args(commands::build_args(tag, recipe))
            .status()
            .with_context(|| format!("failed to invoke `{}`", self.runtime))
    }
}

impl ContainerEngine for CliEngine {
    fn create(&self, spec: &CreateSpec) -> Result<()> {
        self.output(&commands::create_args(spec))?;
        Ok(())
    }

    fn list_top_level(&self, name: &str) -> Result<String> {
        self.output(&commands::list_args(name, None))
    }

    fn list_subdir(&self, name: &str, path: &str) -> Result<String> {
        self.output(&commands::list_args(name, Some(path)))
    }

    fn kill_all(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .output(&commands::ps_quiet_args())?
            .lines()
            .map(str::to_string)
            .filter(|id| !id.is_empty())
            .collect();
        if ids.is_empty() {
            return Ok(ids);
        }
        self.output(&commands::kill_args(&ids))?;
        Ok(ids)
    }
}

/// Verify that the runtime daemon is reachable before provisioning anything.
pub fn ensure_available(runtime: &str) -> Result<()> {
    let status = Command::new(runtime)
        .args(["version", "--format", "{{.Server.Version}}"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to invoke `{runtime}` — is it installed and on PATH?"))?;

    if !status.success() {
        bail!("{runtime} daemon is not running (exit {})", status);
    }
    Ok(())
}

/// Returns `["--user", "uid:gid"]` on Unix so instances write evidence files
/// as the invoking user. Empty on other platforms.
pub fn user_args() -> Vec<String> {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() and getegid() are simple POSIX getters that always succeed and have no side effects.
        let uid = unsafe { libc::geteuid() };
        let gid = unsafe { libc::getegid() };
        vec!["--user".into(), format!("{uid}:{gid}")]
    }

    #[cfg(not(unix))]
    {
        Vec::new()
    }
}
