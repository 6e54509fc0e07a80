//! Command-line surface: `build <image>` and `run <image> [--instances N]`.

use anyhow::{Context, Result, bail};

use crate::config::{self, Config, ImageChoice};
use crate::docker::{CancelToken, CliEngine, ensure_available};
use crate::{fleet, signal};

const USAGE: &str = "usage:
  txfleet build <mysql|mariadb>
  txfleet run <mysql|mariadb> [--instances N]";

#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Build {
        image: ImageChoice,
    },
    Run {
        image: ImageChoice,
        instances: Option<usize>,
    },
}

/// Parse the arguments following the program name.
pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Invocation> {
    let command = match args.next() {
        Some(command) => command,
        None => bail!("missing command\n{USAGE}"),
    };
    let image_arg = match args.next() {
        Some(image) => image,
        None => bail!("missing image choice\n{USAGE}"),
    };
    let image = ImageChoice::parse(&image_arg)
        .with_context(|| format!("unsupported image `{image_arg}`\n{USAGE}"))?;

    match command.as_str() {
        "build" => {
            if let Some(extra) = args.next() {
                bail!("unexpected argument `{extra}`\n{USAGE}");
            }
            Ok(Invocation::Build { image })
        }
        "run" => {
            let mut instances = None;
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--instances" => {
                        let value = args
                            .next()
                            .with_context(|| format!("--instances needs a value\n{USAGE}"))?;
                        let count: usize = value
                            .parse()
                            .with_context(|| format!("invalid instance count `{value}`"))?;
                        if count == 0 {
                            bail!("--instances must be at least 1");
                        }
                        instances = Some(count);
                    }
                    other => bail!("unexpected argument `{other}`\n{USAGE}"),
                }
            }
            Ok(Invocation::Run { image, instances })
        }
        other => bail!("unknown command `{other}`\n{USAGE}"),
    }
}

/// Execute a parsed invocation in the current directory.
pub fn run(invocation: Invocation) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let cfg = config::load(&cwd)?;

    match invocation {
        Invocation::Build { image } => build(&cfg, image),
        Invocation::Run { image, instances } => {
            ensure_available(&cfg.runtime)?;
            let engine = CliEngine::new(cfg.runtime.clone());
            let cancel = CancelToken::new();
            signal::install(&cancel)?;
            let mut stdout = std::io::stdout();
            fleet::run_fleet(&cfg, image, instances, &engine, &cwd, &cancel, &mut stdout)
        }
    }
}

/// Build the chosen image from its recipe. The recipe must exist before any
/// work starts; a failing build propagates the runtime's own exit code.
fn build(cfg: &Config, image: ImageChoice) -> Result<()> {
    let recipe = cfg.recipe_path(image);
    if !recipe.exists() {
        bail!("build recipe {} not found", recipe.display());
    }
    let engine = CliEngine::new(cfg.runtime.clone());
    let status = engine.build_image(cfg.image_tag(image), &recipe)?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
