use log::debug;
use crate::action::{Action, AdjustmentType, CheckStatus, CreationDecision, DeletionDecision, PolicyDecision,
                    ResizeParams};
use crate::cluster::ClusterRecord;
use crate::engine_config::EngineConfig;
use crate::resize_resolver::ResizeResolver;

/// Turns resize inputs into a target capacity, checks it against the size
/// limits and records how many nodes to remove or add.
#[derive(Clone, Debug)]
pub struct CapacityResizeResolver {
    max_nodes_per_cluster: i64,
}

impl CapacityResizeResolver {
    pub fn new(max_nodes_per_cluster: i64) -> Self {
        Self { max_nodes_per_cluster }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.max_nodes_per_cluster)
    }

    /// Error message for the first violated size limit, if any. Without a
    /// `desired` capacity only the new size bounds are validated.
    pub fn check_size_params(&self, cluster: &ClusterRecord, desired: Option<i64>, min_size: Option<i64>,
                             max_size: Option<i64>) -> Option<String> {
        if let Some(desired) = desired {
            match min_size {
                Some(min_size) if desired < min_size => {
                    return Some(format!("The target capacity ({}) is less than the specified min_size ({}).",
                                        desired, min_size));
                }
                None if desired < cluster.min_size => {
                    return Some(format!("The target capacity ({}) is less than the cluster's min_size ({}).",
                                        desired, cluster.min_size));
                }
                _ => {}
            }
            match max_size {
                Some(max_size) if max_size >= 0 && desired > max_size => {
                    return Some(format!("The target capacity ({}) is greater than the specified max_size ({}).",
                                        desired, max_size));
                }
                None if cluster.max_size >= 0 && desired > cluster.max_size => {
                    return Some(format!("The target capacity ({}) is greater than the cluster's max_size ({}).",
                                        desired, cluster.max_size));
                }
                _ => {}
            }
            if desired > self.max_nodes_per_cluster {
                return Some(format!("The target capacity ({}) is greater than the maximum number of nodes \
                                     allowed per cluster ({}).", desired, self.max_nodes_per_cluster));
            }
        }

        if let Some(min_size) = min_size {
            match max_size {
                Some(max_size) if max_size >= 0 && min_size > max_size => {
                    return Some(format!("The specified min_size ({}) is greater than the specified \
                                         max_size ({}).", min_size, max_size));
                }
                None if cluster.max_size >= 0 && min_size > cluster.max_size => {
                    return Some(format!("The specified min_size ({}) is greater than the current max_size \
                                         ({}) of the cluster.", min_size, cluster.max_size));
                }
                _ => {}
            }
        }
        if let Some(max_size) = max_size {
            if min_size.is_none() && max_size >= 0 && max_size < cluster.min_size {
                return Some(format!("The specified max_size ({}) is less than the current min_size ({}) \
                                     of the cluster.", max_size, cluster.min_size));
            }
            if max_size > self.max_nodes_per_cluster {
                return Some(format!("The specified max_size ({}) is greater than the maximum number of \
                                     nodes allowed per cluster ({}).", max_size, self.max_nodes_per_cluster));
            }
        }
        None
    }
}

/// Target capacity after applying an adjustment to `current`, `None` when it
/// does not fit in an `i64`.
pub fn calculate_desired(current: i64, adjustment_type: AdjustmentType, number: f64,
                         min_step: Option<i64>) -> Option<i64> {
    // Float to integer casts saturate.
    match adjustment_type {
        AdjustmentType::ExactCapacity => Some(number as i64),
        AdjustmentType::ChangeInCapacity => current.checked_add(number as i64),
        AdjustmentType::ChangeInPercentage => {
            let delta = number * current as f64 / 100.0;
            // Fractions below one node still move by one node.
            let rounded = (if delta.abs() < 1.0 {
                if delta > 0.0 { delta.ceil() } else { delta.floor() }
            } else {
                delta.trunc()
            }) as i64;
            match min_step {
                Some(min_step) if min_step > rounded.checked_abs()? => {
                    if rounded > 0 { current.checked_add(min_step) } else { current.checked_sub(min_step) }
                }
                _ => current.checked_add(rounded),
            }
        }
    }
}

/// Clamps `desired` into the requested or the cluster's size limits.
pub fn truncate_desired(cluster: &ClusterRecord, desired: i64, min_size: Option<i64>,
                        max_size: Option<i64>) -> i64 {
    let mut desired = desired;
    let min_size = min_size.unwrap_or(cluster.min_size);
    if desired < min_size {
        desired = min_size;
    }
    let max_size = max_size.unwrap_or(cluster.max_size);
    if max_size > -1 && desired > max_size {
        desired = max_size;
    }
    desired
}

impl ResizeResolver for CapacityResizeResolver {
    fn parse_resize_params(&self, action: &mut Action, cluster: &ClusterRecord,
                           current_size: usize) -> (CheckStatus, String) {
        let ResizeParams { adjustment_type, number, min_size, max_size, min_step, strict } =
            action.inputs.resize.clone();
        let current = current_size as i64;

        let desired = match adjustment_type {
            Some(adjustment_type) => {
                let number = match number {
                    Some(number) if number.is_finite() => number,
                    Some(number) => {
                        return (CheckStatus::Error, format!("The number ({}) is not a finite value.", number));
                    }
                    None => {
                        return (CheckStatus::Error,
                                format!("Adjustment type '{:?}' requires a number.", adjustment_type));
                    }
                };
                match calculate_desired(current, adjustment_type, number, min_step) {
                    Some(desired) => Some(desired),
                    None => {
                        return (CheckStatus::Error,
                                format!("The adjustment ({}) yields a target capacity out of range.", number));
                    }
                }
            }
            None => None,
        };
        let desired = if strict {
            desired
        } else {
            desired.map(|desired| truncate_desired(cluster, desired, min_size, max_size))
        };

        if let Some(reason) = self.check_size_params(cluster, desired, min_size, max_size) {
            return (CheckStatus::Error, reason);
        }

        // Without an adjustment only the new bounds can move the capacity.
        let desired = match desired {
            Some(desired) => desired,
            None if strict => current,
            None => truncate_desired(cluster, current, min_size, max_size),
        };
        let count = match current.checked_sub(desired) {
            Some(count) => count,
            None => {
                return (CheckStatus::Error,
                        format!("The target capacity ({}) is out of range.", desired));
            }
        };

        let reason = String::from("Resize params are OK");
        debug!("Resize of cluster {}: {} nodes now, {} desired", cluster.id, current, desired);
        if count > 0 {
            action.data.record(PolicyDecision::Deletion(DeletionDecision::with_count(count as usize)));
        } else {
            action.data.record(PolicyDecision::Creation(CreationDecision {
                count: count.unsigned_abs() as usize,
                ..Default::default()
            }));
        }
        action.data.set_check(CheckStatus::Ok, reason.clone());
        (CheckStatus::Ok, reason)
    }
}
