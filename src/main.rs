use std::collections::BTreeMap;
use std::sync::Arc;

use ch_router::{log, GroupNode, HashRing, Md5Hash, Node, RingError};

fn print_distribution(ring: &HashRing<GroupNode>, keys: &[String]) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for key in keys {
        if let Some(node) = ring.route_node(key) {
            *counts.entry(node.key().to_owned()).or_insert(0) += 1;
        }
    }
    println!("{:?}", counts);
}

fn main() -> Result<(), RingError> {
    log::init_logger();
    let groups = (1..=5).map(|i| Arc::new(GroupNode::new(format!("group{}", i))));
    let mut ring = HashRing::with_nodes(groups, 160, Md5Hash::new())?;

    let keys: Vec<String> = (10_000..20_000).map(|i: u32| i.to_string()).collect();
    print_distribution(&ring, &keys);

    let g6 = Arc::new(GroupNode::new("group6"));
    ring.add_node_default(Arc::clone(&g6));
    print_distribution(&ring, &keys);

    ring.remove_node(&g6);
    print_distribution(&ring, &keys);
    Ok(())
}
