//! Option validation for mutating commands.
//!
//! Runs before the environment file is read or the catalog is contacted.
//! A validated plan can only express one mtime source and one replica
//! target, so conflicting combinations never reach the catalog.

use thiserror::Error;

use crate::catalog::{MtimeSource, ReplicaTarget, TouchOptions};
use crate::cli::args::TouchArgs;
use crate::error::Result;
use crate::path::LogicalPath;
use crate::session::SessionContext;

/// A rejected option combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("--seconds-since-epoch and --reference are mutually exclusive.")]
    MtimeSourceConflict,

    #[error("--leaf-resource-name and --replica-number are mutually exclusive.")]
    ReplicaTargetConflict,
}

/// Where the new mtime comes from, before path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtimeSpec {
    SecondsSinceEpoch(i64),
    Reference(String),
}

/// A touch request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchPlan {
    pub logical_path: String,
    pub mtime: Option<MtimeSpec>,
    pub replica: Option<ReplicaTarget>,
}

impl TouchPlan {
    /// Resolve the target and reference paths against the session.
    pub fn resolve(&self, context: &SessionContext) -> Result<(LogicalPath, TouchOptions)> {
        let target = context.resolve(&self.logical_path)?;
        let mtime = match &self.mtime {
            Some(MtimeSpec::SecondsSinceEpoch(seconds)) => {
                Some(MtimeSource::SecondsSinceEpoch(*seconds))
            }
            Some(MtimeSpec::Reference(raw)) => Some(MtimeSource::Reference(context.resolve(raw)?)),
            None => None,
        };
        let options = TouchOptions {
            mtime,
            replica: self.replica.clone(),
        };
        Ok((target, options))
    }
}

/// Check the touch options for conflicts.
///
/// Supplying an option counts even when its value is zero or empty:
/// `--replica-number 0` conflicts with `--leaf-resource-name`.
pub fn validate_touch(args: &TouchArgs) -> std::result::Result<TouchPlan, ValidationError> {
    let mtime = match (args.seconds_since_epoch, &args.reference) {
        (Some(_), Some(_)) => return Err(ValidationError::MtimeSourceConflict),
        (Some(seconds), None) => Some(MtimeSpec::SecondsSinceEpoch(seconds)),
        (None, Some(reference)) => Some(MtimeSpec::Reference(reference.clone())),
        (None, None) => None,
    };

    let replica = match (&args.leaf_resource_name, args.replica_number) {
        (Some(_), Some(_)) => return Err(ValidationError::ReplicaTargetConflict),
        (Some(name), None) => Some(ReplicaTarget::LeafResource(name.clone())),
        (None, Some(number)) => Some(ReplicaTarget::ReplicaNumber(number)),
        (None, None) => None,
    };

    Ok(TouchPlan {
        logical_path: args.logical_path.clone(),
        mtime,
        replica,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IrodsEnvironment;
    use crate::session::WorkingDirectoryStore;
    use tempfile::TempDir;

    fn args(path: &str) -> TouchArgs {
        TouchArgs {
            logical_path: path.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn plain_touch_has_no_options() {
        let plan = validate_touch(&args("newfile")).unwrap();
        assert_eq!(plan.mtime, None);
        assert_eq!(plan.replica, None);
    }

    #[test]
    fn seconds_and_reference_conflict() {
        let mut args = args("nopes");
        args.seconds_since_epoch = Some(345);
        args.reference = Some("nopes".to_string());
        let err = validate_touch(&args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--seconds-since-epoch and --reference are mutually exclusive."
        );
    }

    #[test]
    fn zero_seconds_still_counts() {
        let mut args = args("x");
        args.seconds_since_epoch = Some(0);
        args.reference = Some("y".to_string());
        assert_eq!(
            validate_touch(&args),
            Err(ValidationError::MtimeSourceConflict)
        );
    }

    #[test]
    fn zero_replica_number_conflicts_with_resource() {
        let mut args = args("x");
        args.leaf_resource_name = Some("demoResc".to_string());
        args.replica_number = Some(0);
        let err = validate_touch(&args).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--leaf-resource-name and --replica-number are mutually exclusive."
        );
    }

    #[test]
    fn mtime_conflict_is_reported_first() {
        let args = TouchArgs {
            logical_path: "x".to_string(),
            seconds_since_epoch: Some(1),
            reference: Some("y".to_string()),
            leaf_resource_name: Some("r".to_string()),
            replica_number: Some(1),
        };
        assert_eq!(
            validate_touch(&args),
            Err(ValidationError::MtimeSourceConflict)
        );
    }

    #[test]
    fn single_options_become_typed() {
        let mut args = args("x");
        args.reference = Some("other".to_string());
        args.replica_number = Some(0);
        let plan = validate_touch(&args).unwrap();
        assert_eq!(plan.mtime, Some(MtimeSpec::Reference("other".to_string())));
        assert_eq!(plan.replica, Some(ReplicaTarget::ReplicaNumber(0)));
    }

    #[test]
    fn resolve_makes_paths_absolute() {
        let temp = TempDir::new().unwrap();
        let environment = IrodsEnvironment::parse(
            r#"{"irods_user_name": "rods", "irods_zone_name": "tempZone"}"#,
        )
        .unwrap();
        let context = SessionContext::new(
            environment,
            WorkingDirectoryStore::in_dir(&temp.path().join(".irods"), 1),
        );

        let mut args = args("target");
        args.reference = Some("/tempZone/home/rods/source".to_string());
        let (target, options) = validate_touch(&args).unwrap().resolve(&context).unwrap();
        assert_eq!(target.as_str(), "/tempZone/home/rods/target");
        assert_eq!(
            options.mtime,
            Some(MtimeSource::Reference(
                LogicalPath::new("/tempZone/home/rods/source").unwrap()
            ))
        );
    }
}
