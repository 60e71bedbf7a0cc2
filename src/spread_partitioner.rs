//! Victim selection spread across availability zones or regions.

use std::collections::BTreeMap;
use log::debug;
use crate::cluster::Cluster;
use crate::node::{Node, NodeId};
use crate::ranking_algorithm::RankingAlgorithm;

/// Placement label used to partition the cluster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Partition {
    Zone,
    Region,
}

impl Partition {
    fn members<'a>(&self, cluster: &'a Cluster, label: &str) -> Vec<&'a Node> {
        match self {
            Partition::Zone => cluster.nodes_by_zone(label),
            Partition::Region => cluster.nodes_by_region(label),
        }
    }
}

/// Ranks every partition separately and concatenates the victims, partitions
/// in ascending label order.
///
/// A partition with fewer nodes than requested gives up all of them; the
/// deficit is not moved to other partitions.
pub fn victims_by_partition(cluster: &Cluster, partition: Partition, spread: &BTreeMap<String, usize>,
                            algorithm: &dyn RankingAlgorithm) -> Vec<NodeId> {
    let mut victims = Vec::default();
    for (label, count) in spread {
        let nodes = partition.members(cluster, label);
        if nodes.len() < *count {
            debug!("{:?} {} of cluster {} has {} nodes, {} requested",
                   partition, label, cluster.id(), nodes.len(), count);
        }
        victims.extend(algorithm.select(&nodes, *count));
    }
    victims
}
