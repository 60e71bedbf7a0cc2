use crate::node::{Node, NodeId};
use crate::ranking_algorithm::RankingAlgorithm;

/// Removes nodes built from the oldest profile first.
#[derive(Clone, Debug, Default)]
pub struct ProfileAgeRankingAlgorithm;

impl ProfileAgeRankingAlgorithm {
    pub fn new() -> Self {
        Default::default()
    }
}

impl RankingAlgorithm for ProfileAgeRankingAlgorithm {
    fn select(&self, nodes: &[&Node], count: usize) -> Vec<NodeId> {
        nodes_by_profile_age(nodes, count)
    }
}

pub fn nodes_by_profile_age(nodes: &[&Node], count: usize) -> Vec<NodeId> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| {
        a.profile_created_at
            .cmp(&b.profile_created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted.into_iter().take(count).map(|node| node.id.clone()).collect()
}
