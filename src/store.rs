//! Persistence contracts used by the policies, and an in-memory implementation.

use std::collections::{BTreeMap, HashMap};
use log::debug;
use crate::action::{Action, ActionData, RequestContext};
use crate::cluster::ClusterRecord;
use crate::error::{Error, Result};
use crate::node::{Node, NodeId};

/// Read access to cluster records and membership.
pub trait ClusterStore {
    /// Fails with `ClusterNotFound` for unknown ids.
    fn get_cluster(&self, ctx: &RequestContext, cluster_id: &str) -> Result<ClusterRecord>;

    /// All member nodes of the cluster, regardless of status.
    fn cluster_nodes(&self, ctx: &RequestContext, cluster_id: &str) -> Result<Vec<Node>>;

    fn node_count(&self, ctx: &RequestContext, cluster_id: &str) -> Result<usize> {
        Ok(self.cluster_nodes(ctx, cluster_id)?.len())
    }
}

/// Durable storage of action data.
pub trait ActionStore {
    fn store_action(&mut self, ctx: &RequestContext, action: &Action) -> Result<()>;
}

pub trait Store: ClusterStore + ActionStore {}

impl<T: ClusterStore + ActionStore> Store for T {}

/// Keeps clusters and nodes in ordered maps and action data as JSON snapshots.
#[derive(Default)]
pub struct InMemoryStore {
    clusters: BTreeMap<String, ClusterRecord>,
    nodes: BTreeMap<NodeId, Node>,
    actions: HashMap<String, serde_json::Value>,
    store_count: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_cluster(&mut self, record: ClusterRecord) {
        self.clusters.insert(record.id.clone(), record);
    }

    pub fn add_node(&mut self, node: Node) -> Result<()> {
        if !self.clusters.contains_key(&node.cluster_id) {
            return Err(Error::ClusterNotFound { cluster: node.cluster_id });
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Reads back the last persisted data of an action.
    pub fn action_data(&self, action_id: &str) -> Result<ActionData> {
        let raw = self
            .actions
            .get(action_id)
            .ok_or_else(|| Error::ActionNotFound { action: action_id.to_string() })?;
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// Number of times any action has been persisted.
    pub fn store_count(&self) -> usize {
        self.store_count
    }
}

impl ClusterStore for InMemoryStore {
    fn get_cluster(&self, _ctx: &RequestContext, cluster_id: &str) -> Result<ClusterRecord> {
        self.clusters
            .get(cluster_id)
            .cloned()
            .ok_or_else(|| Error::ClusterNotFound { cluster: cluster_id.to_string() })
    }

    fn cluster_nodes(&self, _ctx: &RequestContext, cluster_id: &str) -> Result<Vec<Node>> {
        if !self.clusters.contains_key(cluster_id) {
            return Err(Error::ClusterNotFound { cluster: cluster_id.to_string() });
        }
        Ok(self
            .nodes
            .values()
            .filter(|node| node.cluster_id == cluster_id)
            .cloned()
            .collect())
    }
}

impl ActionStore for InMemoryStore {
    fn store_action(&mut self, _ctx: &RequestContext, action: &Action) -> Result<()> {
        let snapshot = serde_json::to_value(&action.data)?;
        debug!("Storing data of action {}: {}", action.id, snapshot);
        self.actions.insert(action.id.clone(), snapshot);
        self.store_count += 1;
        Ok(())
    }
}
