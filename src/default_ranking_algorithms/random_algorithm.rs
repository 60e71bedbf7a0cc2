use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::node::{Node, NodeId};
use crate::ranking_algorithm::RankingAlgorithm;

/// Samples victims uniformly without replacement.
///
/// With a seed every call starts from the same generator state, so the same
/// node set always yields the same victims.
#[derive(Clone, Debug, Default)]
pub struct RandomRankingAlgorithm {
    seed: Option<u64>,
}

impl RandomRankingAlgorithm {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

impl RankingAlgorithm for RandomRankingAlgorithm {
    fn select(&self, nodes: &[&Node], count: usize) -> Vec<NodeId> {
        match self.seed {
            Some(seed) => nodes_by_random(nodes, count, &mut StdRng::seed_from_u64(seed)),
            None => nodes_by_random(nodes, count, &mut rand::thread_rng()),
        }
    }
}

pub fn nodes_by_random<R: Rng + ?Sized>(nodes: &[&Node], count: usize, rng: &mut R) -> Vec<NodeId> {
    // Sampling depends on input order; sort so equal sets give equal samples.
    let mut sorted = nodes.to_vec();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted
        .choose_multiple(rng, count)
        .map(|node| node.id.clone())
        .collect()
}
