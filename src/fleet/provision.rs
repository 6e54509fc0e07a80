use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::config::Config;
use crate::docker::{ContainerEngine, CreateSpec, MountSpec};

use super::types::instance_name;

/// What the archive step relocated, for the operator's benefit.
#[derive(Debug, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub relocated_files: usize,
    pub destination: PathBuf,
}

/// Move a previous run's results out of the way before they could be
/// overwritten. Contents of the results directory are relocated into the
/// archive directory (creating it if needed) and the emptied results
/// directory is removed. Nothing is ever deleted; a name collision in the
/// archive gets a numeric suffix.
pub fn archive_previous_results(base: &Path, cfg: &Config) -> Result<Option<ArchiveSummary>> {
    let results = base.join(&cfg.results_dir);
    if !results.exists() {
        return Ok(None);
    }
    let archive = base.join(&cfg.archive_dir);
    std::fs::create_dir_all(&archive)
        .with_context(|| format!("failed to create {}", archive.display()))?;

    let relocated_files = WalkDir::new(&results)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count();

    for entry in std::fs::read_dir(&results)
        .with_context(|| format!("failed to read {}", results.display()))?
    {
        let entry = entry?;
        let target = unique_destination(&archive, &entry.file_name().to_string_lossy());
        std::fs::rename(entry.path(), &target).with_context(|| {
            format!(
                "failed to move {} to {}",
                entry.path().display(),
                target.display()
            )
        })?;
    }
    std::fs::remove_dir(&results)
        .with_context(|| format!("failed to remove {}", results.display()))?;

    Ok(Some(ArchiveSummary {
        relocated_files,
        destination: archive,
    }))
}

/// First free destination under the archive for the given entry name.
fn unique_destination(archive: &Path, name: &str) -> PathBuf {
    let mut target = archive.join(name);
    let mut suffix = 0usize;
    while target.exists() {
        suffix += 1;
        target = archive.join(format!("{name}-{suffix}"));
    }
    target
}

/// Shell-style split of the operator's extra run arguments.
pub(crate) fn extra_run_args(cfg: &Config) -> Result<Vec<String>> {
    match &cfg.extra_run_args {
        None => Ok(Vec::new()),
        Some(raw) => shell_words::split(raw)
            .with_context(|| format!("failed to parse extra_run_args `{raw}`")),
    }
}

/// Ensure exactly N instances of the image are launched: archive prior
/// results, create one fresh results folder per index, and start each
/// instance detached with its folder mounted at the evidence path.
///
/// A launch failure is reported and skipped; there is no rollback. The
/// instance will read as faulted in the status table until the operator
/// intervenes.
pub fn provision(
    cfg: &Config,
    image: &str,
    instances: usize,
    engine: &dyn ContainerEngine,
    base: &Path,
    out: &mut dyn Write,
) -> Result<Vec<String>> {
    if let Some(summary) = archive_previous_results(base, cfg)? {
        writeln!(
            out,
            "moved {} result files from a previous run to {}",
            summary.relocated_files,
            summary.destination.display()
        )?;
    }

    let extra_args = extra_run_args(cfg)?;
    let results_root = base.join(&cfg.results_dir);
    let mut names = Vec::with_capacity(instances);

    for index in 0..instances {
        let name = instance_name(image, index);
        let host_dir = results_root.join(&name);
        std::fs::create_dir_all(&host_dir)
            .with_context(|| format!("failed to create {}", host_dir.display()))?;

        let spec = CreateSpec {
            name: name.clone(),
            image: image.to_string(),
            mount: Some(MountSpec {
                host_dir,
                container_dir: cfg.evidence_path.clone(),
            }),
            extra_args: extra_args.clone(),
            map_user: cfg.map_user,
        };
        if let Err(e) = engine.create(&spec) {
            writeln!(out, "warning: failed to start instance {name}: {e:#}")?;
        }
        names.push(name);
    }

    Ok(names)
}
