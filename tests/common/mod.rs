#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use chrono::{DateTime, TimeZone, Utc};
use sugars::{rc, refcell};
use cluster_policy::cluster::ClusterRecord;
use cluster_policy::{DeletionPolicy, EngineConfig, InMemoryStore, Node, PolicySpec};

pub const CLUSTER_ID: &str = "cluster-1";

pub fn name_wrapper(file_name: &str) -> String {
    format!("test-configs/{}", file_name)
}

pub fn ts(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

/// Active node created at `created`, from a profile created at `profile_created`.
pub fn node(id: &str, created: i64, profile_created: i64) -> Node {
    Node::new(id, CLUSTER_ID, ts(created), "profile-1", ts(profile_created))
}

pub fn store_with(nodes: Vec<Node>) -> Rc<RefCell<InMemoryStore>> {
    let store = rc!(refcell!(InMemoryStore::new()));
    store
        .borrow_mut()
        .add_cluster(ClusterRecord::new(CLUSTER_ID, nodes.len() as i64, 0, -1));
    for node in nodes {
        store.borrow_mut().add_node(node).unwrap();
    }
    store
}

pub fn spec(criteria: &str) -> PolicySpec {
    PolicySpec::from_yaml_str(&format!(
        "type: cluster.policy.deletion\nversion: 1.0\nproperties:\n  criteria: {}\n", criteria))
        .unwrap()
}

pub fn deletion_policy(criteria: &str, store: &Rc<RefCell<InMemoryStore>>) -> DeletionPolicy {
    DeletionPolicy::new("deletion", &spec(criteria), store.clone(), &EngineConfig::default()).unwrap()
}
