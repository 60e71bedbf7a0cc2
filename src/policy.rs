//! Common contract of the policies attached to a cluster.

use std::fmt::{Display, Formatter};
use dyn_clone::{clone_trait_object, DynClone};
use erased_serde::serialize_trait_object;
use serde::{Deserialize, Serialize};
use crate::action::{Action, ActionKind};
use crate::error::Result;

/// Profile type wildcard.
pub const ANY_PROFILE_TYPE: &str = "ANY";

/// When a policy is checked relative to the action it is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerPoint {
    Before,
    After,
}

impl Display for TriggerPoint {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            TriggerPoint::Before => write!(f, "BEFORE"),
            TriggerPoint::After => write!(f, "AFTER"),
        }
    }
}

/// A policy annotates actions with decisions through their data payload.
///
/// Policies attached to the same trigger point run in ascending `priority`.
pub trait Policy: DynClone + erased_serde::Serialize {
    fn name(&self) -> &str;

    fn policy_type(&self) -> &'static str;

    fn version(&self) -> &'static str;

    fn priority(&self) -> u32;

    /// Trigger points and action kinds this policy is interested in.
    fn targets(&self) -> &'static [(TriggerPoint, ActionKind)];

    fn profile_types(&self) -> &'static [&'static str] {
        &[ANY_PROFILE_TYPE]
    }

    fn pre_op(&mut self, cluster_id: &str, action: &mut Action) -> Result<()>;

    fn post_op(&mut self, _cluster_id: &str, _action: &mut Action) -> Result<()> {
        Ok(())
    }

    fn applies_to(&self, point: TriggerPoint, kind: ActionKind) -> bool {
        self.targets().contains(&(point, kind))
    }
}

clone_trait_object!(Policy);
serialize_trait_object!(Policy);
