use crate::docker::ContainerEngine;

use super::types::InstanceStatus;

/// Check one instance for fault evidence.
///
/// The top-level listing doubles as a reachability probe: an error or empty
/// output means the instance is stopped, crashed, or never started, and the
/// conservative reading is faulted rather than clean. A reachable instance
/// is faulted exactly when its evidence directory lists anything; a missing
/// evidence directory reads as clean, matching the workload's behavior of
/// creating it only once it has something to record.
pub fn poll_instance(
    engine: &dyn ContainerEngine,
    name: &str,
    evidence_path: &str,
) -> InstanceStatus {
    match engine.list_top_level(name) {
        Err(_) => InstanceStatus::Unreachable,
        Ok(listing) if listing.trim().is_empty() => InstanceStatus::Unreachable,
        Ok(_) => match engine.list_subdir(name, evidence_path) {
            Ok(listing) if !listing.trim().is_empty() => InstanceStatus::Faulted,
            _ => InstanceStatus::Clean,
        },
    }
}

/// Poll every instance in order. Strictly sequential; one snapshot per cycle.
pub fn poll_fleet(
    engine: &dyn ContainerEngine,
    names: &[String],
    evidence_path: &str,
) -> Vec<InstanceStatus> {
    names
        .iter()
        .map(|name| poll_instance(engine, name, evidence_path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::CreateSpec;
    use anyhow::{Result, bail};
    use std::collections::HashMap;

    /// Fixed per-instance listings; a missing entry behaves like a dead
    /// instance.
    struct ListingEngine {
        top_level: HashMap<String, String>,
        evidence: HashMap<String, String>,
    }

    impl ContainerEngine for ListingEngine {
        fn create(&self, _spec: &CreateSpec) -> Result<()> {
            Ok(())
        }

        fn list_top_level(&self, name: &str) -> Result<String> {
            match self.top_level.get(name) {
                Some(listing) => Ok(listing.clone()),
                None => bail!("no such container: {name}"),
            }
        }

        fn list_subdir(&self, name: &str, _path: &str) -> Result<String> {
            match self.evidence.get(name) {
                Some(listing) => Ok(listing.clone()),
                None => bail!("ls: cannot access"),
            }
        }

        fn kill_all(&self) -> Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn empty_evidence_dir_reads_clean() {
        let engine = ListingEngine {
            top_level: HashMap::from([("i-0".into(), "bin\nfound_bugs\n".into())]),
            evidence: HashMap::from([("i-0".into(), "".into())]),
        };
        assert_eq!(poll_instance(&engine, "i-0", "found_bugs"), InstanceStatus::Clean);
    }

    #[test]
    fn any_evidence_file_reads_faulted() {
        let engine = ListingEngine {
            top_level: HashMap::from([("i-0".into(), "bin\nfound_bugs\n".into())]),
            evidence: HashMap::from([("i-0".into(), "bug_20.sql\n".into())]),
        };
        assert_eq!(
            poll_instance(&engine, "i-0", "found_bugs"),
            InstanceStatus::Faulted
        );
    }

    #[test]
    fn missing_evidence_dir_reads_clean() {
        // The subdir query failing is indistinguishable from "not created
        // yet" and must not be treated as a fault.
        let engine = ListingEngine {
            top_level: HashMap::from([("i-0".into(), "bin\n".into())]),
            evidence: HashMap::new(),
        };
        assert_eq!(poll_instance(&engine, "i-0", "found_bugs"), InstanceStatus::Clean);
    }

    #[test]
    fn unreachable_instance_reads_unreachable() {
        let engine = ListingEngine {
            top_level: HashMap::new(),
            evidence: HashMap::new(),
        };
        let status = poll_instance(&engine, "i-0", "found_bugs");
        assert_eq!(status, InstanceStatus::Unreachable);
        assert!(status.shows_fault());
    }

    #[test]
    fn empty_top_level_reads_unreachable() {
        let engine = ListingEngine {
            top_level: HashMap::from([("i-0".into(), "  \n".into())]),
            evidence: HashMap::from([("i-0".into(), "".into())]),
        };
        assert_eq!(
            poll_instance(&engine, "i-0", "found_bugs"),
            InstanceStatus::Unreachable
        );
    }

    #[test]
    fn poll_fleet_preserves_instance_order() {
        let engine = ListingEngine {
            top_level: HashMap::from([
                ("i-0".into(), "bin\n".into()),
                ("i-1".into(), "bin\n".into()),
            ]),
            evidence: HashMap::from([
                ("i-0".into(), "".into()),
                ("i-1".into(), "bug.sql\n".into()),
            ]),
        };
        let names = vec!["i-0".to_string(), "i-1".to_string(), "i-2".to_string()];
        assert_eq!(
            poll_fleet(&engine, &names, "found_bugs"),
            vec![
                InstanceStatus::Clean,
                InstanceStatus::Faulted,
                InstanceStatus::Unreachable,
            ]
        );
    }
}
