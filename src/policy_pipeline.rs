//! Runs the policies attached to a cluster around its actions.

use log::{debug, warn};
use crate::action::Action;
use crate::error::Result;
use crate::policy::{Policy, TriggerPoint};

#[derive(Clone, Default)]
pub struct PolicyPipeline {
    policies: Vec<Box<dyn Policy>>,
}

impl PolicyPipeline {
    pub fn new() -> Self {
        Default::default()
    }

    /// Attaches a policy keeping ascending priority order. Policies of equal
    /// priority run in attachment order.
    pub fn attach(&mut self, policy: Box<dyn Policy>) {
        let position = self
            .policies
            .partition_point(|attached| attached.priority() <= policy.priority());
        self.policies.insert(position, policy);
    }

    pub fn detach(&mut self, name: &str) -> Option<Box<dyn Policy>> {
        let position = self.policies.iter().position(|policy| policy.name() == name)?;
        Some(self.policies.remove(position))
    }

    pub fn policies(&self) -> impl Iterator<Item = &dyn Policy> {
        self.policies.iter().map(|policy| policy.as_ref())
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Checks every policy targeting `point` for the action's kind. Stops at
    /// the first policy that leaves the action in `CHECK_ERROR`.
    pub fn check(&mut self, point: TriggerPoint, action: &mut Action) -> Result<()> {
        let cluster_id = action.cluster_id.clone();
        for policy in self.policies.iter_mut() {
            if !policy.applies_to(point, action.kind) {
                continue;
            }
            debug!("Checking policy {} {} action {}", policy.name(), point, action.id);
            match point {
                TriggerPoint::Before => policy.pre_op(&cluster_id, action)?,
                TriggerPoint::After => policy.post_op(&cluster_id, action)?,
            }
            if action.data.is_check_error() {
                warn!("Policy {} failed action {}: {}", policy.name(), action.id,
                      action.data.reason.as_deref().unwrap_or_default());
                break;
            }
        }
        Ok(())
    }

    pub fn pre_op(&mut self, action: &mut Action) -> Result<()> {
        self.check(TriggerPoint::Before, action)
    }

    pub fn post_op(&mut self, action: &mut Action) -> Result<()> {
        self.check(TriggerPoint::After, action)
    }
}
