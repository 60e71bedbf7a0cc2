//! Representation of a cluster node

use std::fmt::{Display, Formatter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque node identifier, unique within a cluster.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Node lifecycle status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    Init,
    Active,
    Error,
    Warning,
    Creating,
    Updating,
    Deleting,
    Recovering,
    Operating,
}

impl Display for NodeStatus {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            NodeStatus::Init => write!(f, "INIT"),
            NodeStatus::Active => write!(f, "ACTIVE"),
            NodeStatus::Error => write!(f, "ERROR"),
            NodeStatus::Warning => write!(f, "WARNING"),
            NodeStatus::Creating => write!(f, "CREATING"),
            NodeStatus::Updating => write!(f, "UPDATING"),
            NodeStatus::Deleting => write!(f, "DELETING"),
            NodeStatus::Recovering => write!(f, "RECOVERING"),
            NodeStatus::Operating => write!(f, "OPERATING"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub cluster_id: String,
    pub created_at: DateTime<Utc>,
    pub profile_id: String,
    pub profile_created_at: DateTime<Utc>,
    /// Availability zone the node was placed in, if known.
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub status: NodeStatus,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        cluster_id: impl Into<String>,
        created_at: DateTime<Utc>,
        profile_id: impl Into<String>,
        profile_created_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.0.clone(),
            id,
            cluster_id: cluster_id.into(),
            created_at,
            profile_id: profile_id.into(),
            profile_created_at,
            zone: None,
            region: None,
            status: NodeStatus::Active,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    /// Only active nodes can be picked as deletion victims.
    pub fn is_eligible(&self) -> bool {
        self.status == NodeStatus::Active
    }
}
