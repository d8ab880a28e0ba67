//! BucketGraph - the frozen bucket graph.
//!
//! Produced once the host has finished configuring the project. Downstream
//! tooling reads it; nothing mutates it.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::{has_path_connecting, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;

use crate::core::bucket::Bucket;
use crate::core::bucket_name::BucketName;

/// The finalized, acyclic bucket graph.
///
/// An edge `child -> parent` means every member of `parent` is a member of
/// `child`.
#[derive(Debug, Clone)]
pub struct BucketGraph {
    graph: DiGraph<BucketName, ()>,
    nodes: HashMap<BucketName, NodeIndex>,
    buckets: BTreeMap<BucketName, Bucket>,
}

/// Serializable view of the graph for IDE generators and publishing.
#[derive(Debug, Serialize)]
pub struct GraphSnapshot<'a> {
    /// Buckets in resolution order
    pub buckets: Vec<&'a Bucket>,
}

impl BucketGraph {
    pub(crate) fn new(
        graph: DiGraph<BucketName, ()>,
        nodes: HashMap<BucketName, NodeIndex>,
        buckets: BTreeMap<BucketName, Bucket>,
    ) -> Self {
        BucketGraph {
            graph,
            nodes,
            buckets,
        }
    }

    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        self.buckets.get(name)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Check if `child` includes every member of `parent`, directly or not.
    pub fn includes(&self, child: &str, parent: &str) -> bool {
        match (self.nodes.get(child), self.nodes.get(parent)) {
            (Some(&c), Some(&p)) => c != p && has_path_connecting(&self.graph, c, p, None),
            _ => false,
        }
    }

    /// Buckets that directly extend `name`.
    pub fn dependents(&self, name: &str) -> Vec<BucketName> {
        let Some(&node) = self.nodes.get(name) else {
            return Vec::new();
        };

        let mut dependents: Vec<_> = self
            .graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect();
        dependents.sort();
        dependents
    }

    /// Buckets in an order where every parent precedes the buckets that
    /// extend it.
    pub fn resolution_order(&self) -> Vec<BucketName> {
        // The graph was checked for cycles before it was frozen
        let mut order: Vec<_> = toposort(&self.graph, None)
            .unwrap_or_default()
            .into_iter()
            .map(|n| self.graph[n].clone())
            .collect();

        // toposort puts children first since edges point at parents
        order.reverse();
        order
    }

    pub fn snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            buckets: self
                .resolution_order()
                .into_iter()
                .filter_map(|name| self.buckets.get(&name))
                .collect(),
        }
    }

    /// Serialize the graph to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }

    /// Serialize the graph to a pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }
}
