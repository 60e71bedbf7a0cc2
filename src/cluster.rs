//! Read-only view over a cluster and its member nodes.

use serde::{Deserialize, Serialize};
use crate::action::RequestContext;
use crate::error::Result;
use crate::node::Node;
use crate::store::ClusterStore;

/// Persisted cluster properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClusterRecord {
    pub id: String,
    pub name: String,
    pub profile_id: String,
    pub desired_capacity: i64,
    pub min_size: i64,
    /// Negative means the cluster size is unbounded.
    pub max_size: i64,
}

impl ClusterRecord {
    pub fn new(id: impl Into<String>, desired_capacity: i64, min_size: i64, max_size: i64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            profile_id: String::default(),
            desired_capacity,
            min_size,
            max_size,
        }
    }
}

/// Where to take the cluster record from when loading a view.
pub enum ClusterSource<'a> {
    /// Look the record up in the store.
    Id(&'a str),
    /// Record already fetched by the caller.
    Record(ClusterRecord),
}

/// Snapshot of a cluster taken for a single decision.
#[derive(Clone, Debug)]
pub struct Cluster {
    pub record: ClusterRecord,
    members: Vec<Node>,
}

impl Cluster {
    pub fn new(record: ClusterRecord, members: Vec<Node>) -> Self {
        Self { record, members }
    }

    pub fn load<S: ClusterStore + ?Sized>(store: &S, ctx: &RequestContext,
                                          source: ClusterSource) -> Result<Self> {
        let record = match source {
            ClusterSource::Id(cluster_id) => store.get_cluster(ctx, cluster_id)?,
            ClusterSource::Record(record) => record,
        };
        let members = store.cluster_nodes(ctx, &record.id)?;
        Ok(Self::new(record, members))
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    /// Nodes eligible for deletion.
    pub fn nodes(&self) -> Vec<&Node> {
        self.members.iter().filter(|node| node.is_eligible()).collect()
    }

    pub fn nodes_by_zone(&self, zone: &str) -> Vec<&Node> {
        self.members
            .iter()
            .filter(|node| node.is_eligible() && node.zone.as_deref() == Some(zone))
            .collect()
    }

    pub fn nodes_by_region(&self, region: &str) -> Vec<&Node> {
        self.members
            .iter()
            .filter(|node| node.is_eligible() && node.region.as_deref() == Some(region))
            .collect()
    }
}
