use std::path::Path;

use super::engine::user_args;
use super::types::CreateSpec;

/// Arguments for launching one instance: detached, self-removing, named,
/// with the results folder mounted where the workload expects it.
pub fn create_args(spec: &CreateSpec) -> Vec<String> {
    let mut args = vec![
        "run".into(),
        "-d".into(),
        "--rm".into(),
        "--name".into(),
        spec.name.clone(),
    ];
    if let Some(mount) = &spec.mount {
        args.push("-v".into());
        args.push(format!(
            "{}:{}",
            mount.host_dir.display(),
            mount.container_dir
        ));
    }
    if spec.map_user {
        args.extend(user_args());
    }
    args.extend(spec.extra_args.iter().cloned());
    args.push(spec.image.clone());
    args
}

/// Arguments for listing a directory inside a running instance. With no
/// subdir this lists the workload's working directory, which is the
/// reachability probe: a live instance always has files there.
pub fn list_args(name: &str, subdir: Option<&str>) -> Vec<String> {
    let mut args = vec!["exec".into(), name.to_string(), "ls".into()];
    if let Some(path) = subdir {
        args.push(path.to_string());
    }
    args
}

/// Arguments for listing the ids of every running container on the host.
pub fn ps_quiet_args() -> Vec<String> {
    vec!["ps".into(), "-q".into()]
}

/// Arguments for killing the given containers.
pub fn kill_args(ids: &[String]) -> Vec<String> {
    let mut args = vec!["kill".into()];
    args.extend(ids.iter().cloned());
    args
}

/// Arguments for building an image from its recipe, in the current directory.
pub fn build_args(tag: &str, recipe: &Path) -> Vec<String> {
    vec![
        "build".into(),
        "-t".into(),
        tag.to_string(),
        "-f".into(),
        recipe.display().to_string(),
        ".".into(),
    ]
}
