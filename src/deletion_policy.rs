//! Policy for choosing victim node(s) from a cluster for deletion.
//!
//! The policy is checked before nodes are removed from a cluster and yields an
//! ordered list of candidates based on the configured criteria. Decisions are
//! taken, in order of precedence, from:
//!
//! 1. nodes explicitly named by the action,
//! 2. a deletion decision left by an earlier policy, possibly broken down by
//!    zone or region,
//! 3. the action itself: the requested count of a scale-in, or the outcome of
//!    resize parameter resolution.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use log::{debug, error, info};
use serde::Serialize;
use crate::action::{Action, ActionKind, CheckStatus, DeletionDecision, PolicyDecision};
use crate::cluster::{Cluster, ClusterSource};
use crate::default_resize_resolvers::capacity_resolver::CapacityResizeResolver;
use crate::engine_config::EngineConfig;
use crate::error::Result;
use crate::node::NodeId;
use crate::policy::{Policy, TriggerPoint};
use crate::policy_spec::PolicySpec;
use crate::ranking_algorithm::{Criteria, RankingAlgorithm};
use crate::resize_resolver::ResizeResolver;
use crate::spread_partitioner::{victims_by_partition, Partition};
use crate::store::Store;

pub const POLICY_TYPE: &str = "cluster.policy.deletion";
pub const VERSION: &str = "1.0";
pub const PRIORITY: u32 = 400;

pub const CRITERIA: &str = "criteria";
pub const DESTROY_AFTER_DELETION: &str = "destroy_after_deletion";
pub const GRACE_PERIOD: &str = "grace_period";
pub const REDUCE_DESIRED_CAPACITY: &str = "reduce_desired_capacity";

const KEYS: [&str; 4] = [CRITERIA, DESTROY_AFTER_DELETION, GRACE_PERIOD, REDUCE_DESIRED_CAPACITY];

const TARGETS: [(TriggerPoint, ActionKind); 3] = [
    (TriggerPoint::Before, ActionKind::ScaleIn),
    (TriggerPoint::Before, ActionKind::DelNodes),
    (TriggerPoint::Before, ActionKind::Resize),
];

#[derive(Clone, Serialize)]
pub struct DeletionPolicy {
    name: String,
    pub criteria: Criteria,
    /// Whether a node is destroyed, not only removed from the cluster.
    pub destroy_after_deletion: bool,
    /// Seconds before the real deletion happens.
    pub grace_period: u64,
    pub reduce_desired_capacity: bool,

    #[serde(skip)]
    ranking_algorithm: Box<dyn RankingAlgorithm>,
    #[serde(skip)]
    resize_resolver: Box<dyn ResizeResolver>,
    #[serde(skip)]
    store: Rc<RefCell<dyn Store>>,
}

impl DeletionPolicy {
    /// Builds the policy from a validated spec. Fails on unknown properties or
    /// values outside of their allowed range.
    pub fn new(name: impl Into<String>, spec: &PolicySpec, store: Rc<RefCell<dyn Store>>,
               config: &EngineConfig) -> Result<Self> {
        spec.check_type(POLICY_TYPE, VERSION)?;
        spec.check_keys(&KEYS)?;

        let criteria = spec.property::<Criteria>(CRITERIA)?.unwrap_or_default();
        Ok(Self {
            name: name.into(),
            criteria,
            destroy_after_deletion: spec.property(DESTROY_AFTER_DELETION)?.unwrap_or(true),
            grace_period: spec.property(GRACE_PERIOD)?.unwrap_or(0),
            reduce_desired_capacity: spec.property(REDUCE_DESIRED_CAPACITY)?.unwrap_or(false),
            ranking_algorithm: criteria.ranking_algorithm(config.random_seed),
            resize_resolver: Box::new(CapacityResizeResolver::from_config(config)),
            store,
        })
    }

    pub fn with_resize_resolver(mut self, resize_resolver: Box<dyn ResizeResolver>) -> Self {
        self.resize_resolver = resize_resolver;
        self
    }

    /// Records the victims on the action and persists it.
    fn update_action(&self, action: &mut Action, victims: Vec<NodeId>) -> Result<()> {
        let mut deletion = action.data.take_deletion().unwrap_or_default();
        deletion.count = victims.len();
        deletion.candidates = victims;
        deletion.destroy_after_deletion = self.destroy_after_deletion;
        deletion.grace_period = self.grace_period;
        deletion.reduce_desired_capacity = self.reduce_desired_capacity;
        info!("Policy {} ({}): {} candidate(s) for action {}: {:?}",
              self.name, self.criteria, deletion.count, action.id, deletion.candidates);

        action.data.record(PolicyDecision::Deletion(deletion));
        action.data.set_check(CheckStatus::Ok, "Candidates generated");
        self.store.borrow_mut().store_action(&action.context, action)
    }
}

/// Spread breakdown carried by an earlier decision, regions first.
fn spread_of(deletion: &DeletionDecision) -> Option<(Partition, BTreeMap<String, usize>)> {
    match (&deletion.regions, &deletion.zones) {
        (Some(regions), _) if !regions.is_empty() => Some((Partition::Region, regions.clone())),
        (_, Some(zones)) if !zones.is_empty() => Some((Partition::Zone, zones.clone())),
        _ => None,
    }
}

impl Policy for DeletionPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn policy_type(&self) -> &'static str {
        POLICY_TYPE
    }

    fn version(&self) -> &'static str {
        VERSION
    }

    fn priority(&self) -> u32 {
        PRIORITY
    }

    fn targets(&self) -> &'static [(TriggerPoint, ActionKind)] {
        &TARGETS
    }

    /// Chooses victims that can be deleted.
    fn pre_op(&mut self, cluster_id: &str, action: &mut Action) -> Result<()> {
        if !action.inputs.candidates.is_empty() {
            debug!("Action {} names its candidates", action.id);
            let victims = action.inputs.candidates.clone();
            return self.update_action(action, victims);
        }

        let mut record = None;
        let prior = action.data.deletion().map(|deletion| (deletion.count, spread_of(deletion)));
        let (count, spread) = match prior {
            Some(prior) => prior,
            None => match action.kind {
                ActionKind::ScaleIn => (action.inputs.count.unwrap_or(1), None),
                ActionKind::Resize => {
                    let (cluster, current_size) = {
                        let store = self.store.borrow();
                        (store.get_cluster(&action.context, cluster_id)?,
                         store.node_count(&action.context, cluster_id)?)
                    };
                    let (status, reason) =
                        self.resize_resolver.parse_resize_params(action, &cluster, current_size);
                    if status == CheckStatus::Error {
                        error!("{}", reason);
                        action.data.set_check(CheckStatus::Error, reason);
                        return Ok(());
                    }
                    let count = match action.data.deletion() {
                        Some(deletion) => deletion.count,
                        // Growing or unchanged cluster, nothing to pick.
                        None => return Ok(()),
                    };
                    record = Some(cluster);
                    (count, None)
                }
                _ => {
                    debug!("No deletion decision derivable for action {} ({})", action.id, action.kind);
                    return Ok(());
                }
            },
        };

        let cluster = {
            let source = match record {
                Some(record) => ClusterSource::Record(record),
                None => ClusterSource::Id(cluster_id),
            };
            Cluster::load(&*self.store.borrow(), &action.context, source)?
        };

        let victims = match spread {
            Some((partition, spread)) => {
                victims_by_partition(&cluster, partition, &spread, self.ranking_algorithm.as_ref())
            }
            None => {
                let nodes = cluster.nodes();
                let count = count.min(nodes.len());
                self.ranking_algorithm.select(&nodes, count)
            }
        };
        self.update_action(action, victims)
    }
}
