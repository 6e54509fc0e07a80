use serde::{Deserialize, Serialize};

/// The two database engines the fuzzing images are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageChoice {
    Mysql,
    Mariadb,
}

impl ImageChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageChoice::Mysql => "mysql",
            ImageChoice::Mariadb => "mariadb",
        }
    }

    /// Parse a CLI argument. The set is closed; anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "mysql" => Some(ImageChoice::Mysql),
            "mariadb" => Some(ImageChoice::Mariadb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Container runtime binary. Podman works too as long as it speaks the
    /// same run/exec/ps/kill surface.
    pub runtime: String,
    pub instances: usize,
    pub poll_interval_secs: u64,
    /// Grace period between provisioning and the first poll cycle, so the
    /// database servers inside the instances have time to come up.
    pub warmup_secs: u64,
    pub mysql_image: String,
    pub mariadb_image: String,
    pub results_dir: String,
    pub archive_dir: String,
    /// Path inside the instance where the workload records fault evidence.
    /// Doubles as the bind-mount target for the per-instance results folder.
    pub evidence_path: String,
    /// Extra arguments appended to the `run` invocation, split shell-style.
    pub extra_run_args: Option<String>,
    /// Pass `--user uid:gid` so evidence files land owned by the invoking
    /// user. Off by default: most database images insist on starting as root.
    pub map_user: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            instances: 4,
            poll_interval_secs: 30,
            warmup_secs: 10,
            mysql_image: "txcheck-my-sql-container".to_string(),
            mariadb_image: "txcheck-mariadb-container".to_string(),
            results_dir: "all_found_bugs".to_string(),
            archive_dir: "all_found_bugs_old".to_string(),
            evidence_path: "/txcheck/found_bugs".to_string(),
            extra_run_args: None,
            map_user: false,
        }
    }
}

impl Config {
    /// Image tag for the chosen engine.
    pub fn image_tag(&self, choice: ImageChoice) -> &str {
        match choice {
            ImageChoice::Mysql => &self.mysql_image,
            ImageChoice::Mariadb => &self.mariadb_image,
        }
    }

    /// Conventional location of the per-engine build recipe.
    pub fn recipe_path(&self, choice: ImageChoice) -> std::path::PathBuf {
        std::path::Path::new("script")
            .join(choice.as_str())
            .join("Dockerfile")
    }
}
