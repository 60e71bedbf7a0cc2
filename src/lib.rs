//! Cluster deletion-policy engine.
//!
//! Policies attached to a cluster inspect the actions that mutate it and
//! annotate them with decisions. The deletion policy picks which nodes go
//! away when a cluster shrinks:
//! - ranking algorithms order candidate nodes by age, profile age or at random
//! - the spread partitioner distributes victims over zones or regions
//! - the decision is written to the action data for the executor

pub mod action;
pub mod cluster;
pub mod deletion_policy;
pub mod engine_config;
pub mod error;
pub mod node;
pub mod policy;
pub mod policy_pipeline;
pub mod policy_spec;
pub mod ranking_algorithm;
pub mod resize_resolver;
pub mod spread_partitioner;
pub mod store;

pub mod default_ranking_algorithms {
    pub mod age_algorithm;
    pub mod profile_age_algorithm;
    pub mod random_algorithm;
}

pub mod default_resize_resolvers {
    pub mod capacity_resolver;
}

pub use action::{Action, ActionData, ActionInputs, ActionKind, CheckStatus, DeletionDecision};
pub use cluster::{Cluster, ClusterRecord};
pub use deletion_policy::DeletionPolicy;
pub use engine_config::EngineConfig;
pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeStatus};
pub use policy::{Policy, TriggerPoint};
pub use policy_pipeline::PolicyPipeline;
pub use policy_spec::PolicySpec;
pub use ranking_algorithm::Criteria;
pub use store::{InMemoryStore, Store};
