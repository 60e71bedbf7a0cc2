use std::fmt::{Display, Formatter};
use dyn_clone::{clone_trait_object, DynClone};
use serde::{Deserialize, Serialize};
use crate::default_ranking_algorithms::age_algorithm::AgeRankingAlgorithm;
use crate::default_ranking_algorithms::profile_age_algorithm::ProfileAgeRankingAlgorithm;
use crate::default_ranking_algorithms::random_algorithm::RandomRankingAlgorithm;
use crate::node::{Node, NodeId};

pub trait RankingAlgorithm: DynClone {
    /// Picks at most `count` victims out of `nodes`, returns their ids in deletion order.
    fn select(&self, nodes: &[&Node], count: usize) -> Vec<NodeId>;}

clone_trait_object!(RankingAlgorithm);

/// Criteria used in selecting candidates for deletion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Criteria {
    OldestFirst,
    OldestProfileFirst,
    YoungestFirst,
    #[default]
    Random,
}

impl Criteria {
    pub const ALL: [Criteria; 4] = [
        Criteria::OldestFirst,
        Criteria::OldestProfileFirst,
        Criteria::YoungestFirst,
        Criteria::Random,
    ];

    /// Ranking algorithm implementing these criteria.
    pub fn ranking_algorithm(&self, random_seed: Option<u64>) -> Box<dyn RankingAlgorithm> {
        match self {
            Criteria::OldestFirst => Box::new(AgeRankingAlgorithm::new(true)),
            Criteria::OldestProfileFirst => Box::new(ProfileAgeRankingAlgorithm::new()),
            Criteria::YoungestFirst => Box::new(AgeRankingAlgorithm::new(false)),
            Criteria::Random => Box::new(RandomRankingAlgorithm::new(random_seed)),
        }
    }
}

impl Display for Criteria {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Criteria::OldestFirst => write!(f, "OLDEST_FIRST"),
            Criteria::OldestProfileFirst => write!(f, "OLDEST_PROFILE_FIRST"),
            Criteria::YoungestFirst => write!(f, "YOUNGEST_FIRST"),
            Criteria::Random => write!(f, "RANDOM"),
        }
    }
}
