use std::cmp::Ordering;
use crate::node::{Node, NodeId};
use crate::ranking_algorithm::RankingAlgorithm;

/// Ranks nodes by creation time.
#[derive(Clone, Debug)]
pub struct AgeRankingAlgorithm {
    ascending: bool,
}

impl AgeRankingAlgorithm {
    /// `ascending` puts the oldest nodes first.
    pub fn new(ascending: bool) -> Self {
        Self { ascending }
    }
}

impl RankingAlgorithm for AgeRankingAlgorithm {
    fn select(&self, nodes: &[&Node], count: usize) -> Vec<NodeId> {
        nodes_by_age(nodes, count, self.ascending)
    }
}

/// Sorts by creation time and takes the first `count` nodes. Equal timestamps
/// keep ascending id order in both directions.
pub fn nodes_by_age(nodes: &[&Node], count: usize, ascending: bool) -> Vec<NodeId> {
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| {
        let by_time = if ascending {
            a.created_at.cmp(&b.created_at)
        } else {
            b.created_at.cmp(&a.created_at)
        };
        match by_time {
            Ordering::Equal => a.id.cmp(&b.id),
            ordering => ordering,
        }
    });
    sorted.into_iter().take(count).map(|node| node.id.clone()).collect()
}
