use dyn_clone::{clone_trait_object, DynClone};
use crate::action::{Action, CheckStatus};
use crate::cluster::ClusterRecord;

pub trait ResizeResolver: DynClone {
    /// Validates the resize inputs of `action` against the cluster and records
    /// the resulting `deletion` or `creation` count on the action data.
    /// Returns the check status with a human readable reason.
    fn parse_resize_params(&self, action: &mut Action, cluster: &ClusterRecord,
                           current_size: usize) -> (CheckStatus, String);
}

clone_trait_object!(ResizeResolver);
