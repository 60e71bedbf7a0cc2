mod common;

use std::collections::BTreeMap;
use serde::Serialize;
use cluster_policy::action::PolicyDecision;
use cluster_policy::{Action, ActionInputs, ActionKind, CheckStatus, DeletionDecision, NodeId, Policy,
                     PolicyPipeline, Result, TriggerPoint};
use common::{deletion_policy, node, store_with, CLUSTER_ID};

const BEFORE_SCALE_IN: [(TriggerPoint, ActionKind); 1] = [(TriggerPoint::Before, ActionKind::ScaleIn)];

/// Spreads every scale-in over the given zones.
#[derive(Clone, Serialize)]
struct ZoneBalancePolicy {
    zones: BTreeMap<String, usize>,
}

impl Policy for ZoneBalancePolicy {
    fn name(&self) -> &str {
        "zone-balance"
    }

    fn policy_type(&self) -> &'static str {
        "cluster.policy.zone_placement"
    }

    fn version(&self) -> &'static str {
        "1.0"
    }

    fn priority(&self) -> u32 {
        300
    }

    fn targets(&self) -> &'static [(TriggerPoint, ActionKind)] {
        &BEFORE_SCALE_IN
    }

    fn pre_op(&mut self, _cluster_id: &str, action: &mut Action) -> Result<()> {
        action.data.record(PolicyDecision::Deletion(DeletionDecision {
            count: self.zones.values().sum(),
            zones: Some(self.zones.clone()),
            ..Default::default()
        }));
        action.data.set_check(CheckStatus::Ok, "Zones balanced");
        Ok(())
    }
}

#[derive(Clone, Serialize)]
struct RejectingPolicy;

impl Policy for RejectingPolicy {
    fn name(&self) -> &str {
        "reject"
    }

    fn policy_type(&self) -> &'static str {
        "cluster.policy.reject"
    }

    fn version(&self) -> &'static str {
        "1.0"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn targets(&self) -> &'static [(TriggerPoint, ActionKind)] {
        &BEFORE_SCALE_IN
    }

    fn pre_op(&mut self, _cluster_id: &str, action: &mut Action) -> Result<()> {
        action.data.set_check(CheckStatus::Error, "cluster is locked");
        Ok(())
    }
}

fn scale_in(count: usize) -> Action {
    Action::new("action-1", ActionKind::ScaleIn, CLUSTER_ID).with_inputs(ActionInputs {
        count: Some(count),
        ..Default::default()
    })
}

#[test]
fn test_policies_run_by_priority() {
    let store = store_with(vec![
        node("a1", 1, 1).with_zone("A"),
        node("a2", 2, 1).with_zone("A"),
        node("b1", 3, 1).with_zone("B"),
    ]);
    let mut pipeline = PolicyPipeline::new();
    // Attached out of order on purpose.
    pipeline.attach(Box::new(deletion_policy("OLDEST_FIRST", &store)));
    pipeline.attach(Box::new(ZoneBalancePolicy {
        zones: BTreeMap::from([(String::from("A"), 1), (String::from("B"), 1)]),
    }));

    let priorities: Vec<u32> = pipeline.policies().map(|policy| policy.priority()).collect();
    assert_eq!(priorities, vec![300, 400]);

    let mut action = scale_in(3);
    pipeline.pre_op(&mut action).unwrap();

    let deletion = action.data.deletion().unwrap();
    assert_eq!(deletion.candidates, vec![NodeId::from("a1"), NodeId::from("b1")]);
    assert_eq!(deletion.count, 2);
    assert_eq!(store.borrow().action_data("action-1").unwrap(), action.data);
}

#[test]
fn test_pipeline_halts_on_check_error() {
    let store = store_with(vec![node("n1", 1, 1)]);
    let mut pipeline = PolicyPipeline::new();
    pipeline.attach(Box::new(deletion_policy("OLDEST_FIRST", &store)));
    pipeline.attach(Box::new(RejectingPolicy));

    let mut action = scale_in(1);
    pipeline.pre_op(&mut action).unwrap();

    assert_eq!(action.data.status, Some(CheckStatus::Error));
    assert_eq!(action.data.reason.as_deref(), Some("cluster is locked"));
    assert!(action.data.deletion().is_none());
    assert_eq!(store.borrow().store_count(), 0);
}

#[test]
fn test_policies_skip_untargeted_actions() {
    let store = store_with(vec![node("n1", 1, 1)]);
    let mut pipeline = PolicyPipeline::new();
    pipeline.attach(Box::new(deletion_policy("OLDEST_FIRST", &store)));

    let mut scale_out = Action::new("action-2", ActionKind::ScaleOut, CLUSTER_ID);
    pipeline.pre_op(&mut scale_out).unwrap();
    assert_eq!(scale_out.data, Default::default());

    let mut after = scale_in(1);
    pipeline.post_op(&mut after).unwrap();
    assert!(after.data.deletion().is_none());
}

#[test]
fn test_detach() {
    let store = store_with(vec![]);
    let mut pipeline = PolicyPipeline::new();
    pipeline.attach(Box::new(deletion_policy("RANDOM", &store)));
    pipeline.attach(Box::new(RejectingPolicy));

    assert_eq!(pipeline.len(), 2);
    assert_eq!(pipeline.detach("reject").map(|policy| policy.priority()), Some(100));
    assert!(pipeline.detach("reject").is_none());
    assert_eq!(pipeline.len(), 1);
}
