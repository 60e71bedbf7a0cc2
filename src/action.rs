//! Cluster actions and the decision payload policies exchange through them.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::node::NodeId;

/// Kind of cluster mutation an action requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "CLUSTER_SCALE_IN")]
    ScaleIn,
    #[serde(rename = "CLUSTER_SCALE_OUT")]
    ScaleOut,
    #[serde(rename = "CLUSTER_DEL_NODES")]
    DelNodes,
    #[serde(rename = "CLUSTER_ADD_NODES")]
    AddNodes,
    #[serde(rename = "CLUSTER_RESIZE")]
    Resize,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            ActionKind::ScaleIn => write!(f, "CLUSTER_SCALE_IN"),
            ActionKind::ScaleOut => write!(f, "CLUSTER_SCALE_OUT"),
            ActionKind::DelNodes => write!(f, "CLUSTER_DEL_NODES"),
            ActionKind::AddNodes => write!(f, "CLUSTER_ADD_NODES"),
            ActionKind::Resize => write!(f, "CLUSTER_RESIZE"),
        }
    }
}

/// Caller identity carried along with an action. Opaque to the policies.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: Option<String>,
    pub project_id: Option<String>,
    pub is_admin: bool,
}

impl RequestContext {
    pub fn admin() -> Self {
        Self {
            is_admin: true,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    ExactCapacity,
    ChangeInCapacity,
    ChangeInPercentage,
}

/// Resize request parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResizeParams {
    pub adjustment_type: Option<AdjustmentType>,
    /// Meaning depends on `adjustment_type`.
    pub number: Option<f64>,
    pub min_size: Option<i64>,
    pub max_size: Option<i64>,
    pub min_step: Option<i64>,
    #[serde(default)]
    pub strict: bool,
}

/// Parameters the action was requested with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionInputs {
    pub count: Option<usize>,
    #[serde(default)]
    pub candidates: Vec<NodeId>,
    #[serde(default)]
    pub resize: ResizeParams,
}

/// Outcome of a policy check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "CHECK_OK")]
    Ok,
    #[serde(rename = "CHECK_ERROR")]
    Error,
}

impl Display for CheckStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "CHECK_OK"),
            CheckStatus::Error => write!(f, "CHECK_ERROR"),
        }
    }
}

/// Which nodes to remove, and how.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletionDecision {
    pub count: usize,
    /// Deletion order, first entry goes first.
    #[serde(default)]
    pub candidates: Vec<NodeId>,
    #[serde(default)]
    pub destroy_after_deletion: bool,
    /// Seconds to wait before the real deletion.
    #[serde(default)]
    pub grace_period: u64,
    #[serde(default)]
    pub reduce_desired_capacity: bool,
    /// Victims per availability zone, written by a placement-aware policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<BTreeMap<String, usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeMap<String, usize>>,
}

impl DeletionDecision {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }
}

/// How many nodes to add.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CreationDecision {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zones: Option<BTreeMap<String, usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeMap<String, usize>>,
}

/// A decision record owned by one policy namespace.
#[derive(Clone, Debug, PartialEq)]
pub enum PolicyDecision {
    Deletion(DeletionDecision),
    Creation(CreationDecision),
}

/// Scratch space shared by the policies attached to an action.
///
/// Each policy writes only its own decision namespace and leaves the others
/// untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deletion: Option<DeletionDecision>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creation: Option<CreationDecision>,
}

impl ActionData {
    pub fn deletion(&self) -> Option<&DeletionDecision> {
        self.deletion.as_ref()
    }

    pub fn creation(&self) -> Option<&CreationDecision> {
        self.creation.as_ref()
    }

    /// Stores a decision under its namespace, replacing the previous one.
    pub fn record(&mut self, decision: PolicyDecision) {
        match decision {
            PolicyDecision::Deletion(deletion) => self.deletion = Some(deletion),
            PolicyDecision::Creation(creation) => self.creation = Some(creation),
        }
    }

    /// Removes the deletion decision and returns it, so it can be refined and
    /// recorded again.
    pub fn take_deletion(&mut self) -> Option<DeletionDecision> {
        self.deletion.take()
    }

    pub fn set_check(&mut self, status: CheckStatus, reason: impl Into<String>) {
        self.status = Some(status);
        self.reason = Some(reason.into());
    }

    pub fn is_check_error(&self) -> bool {
        self.status == Some(CheckStatus::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub kind: ActionKind,
    pub cluster_id: String,
    pub inputs: ActionInputs,
    pub data: ActionData,
    pub context: RequestContext,
}

impl Action {
    pub fn new(id: impl Into<String>, kind: ActionKind, cluster_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            cluster_id: cluster_id.into(),
            inputs: ActionInputs::default(),
            data: ActionData::default(),
            context: RequestContext::admin(),
        }
    }

    pub fn with_inputs(mut self, inputs: ActionInputs) -> Self {
        self.inputs = inputs;
        self
    }
}
