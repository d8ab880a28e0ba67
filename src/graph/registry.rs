//! Bucket registry - creation, lookup and deferred configuration.
//!
//! Buckets can be declared lazily and referenced before they exist. A
//! mutation or edge that names a bucket nobody has created yet is parked
//! under that name and applied the moment the bucket is realized. Anything
//! still parked when the graph is finalized is a fatal error.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use crate::core::bucket::Bucket;
use crate::core::bucket_name::BucketName;
use crate::graph::errors::GraphError;
use crate::graph::finalized::BucketGraph;

type Mutation = Box<dyn FnOnce(&mut Bucket)>;

/// All buckets of one project.
#[derive(Default)]
pub struct BucketRegistry {
    /// Realized buckets
    buckets: BTreeMap<BucketName, Bucket>,

    /// Declared but not yet realized
    declared: BTreeSet<BucketName>,

    /// Mutations waiting for their bucket to be realized
    pending: HashMap<BucketName, Vec<Mutation>>,

    /// Edges (child, parent) waiting for an unknown end
    pending_edges: BTreeSet<(BucketName, BucketName)>,
}

impl BucketRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a bucket without realizing it.
    ///
    /// Declaring a name twice is a no-op. Any edge parked on this name
    /// whose other end is known gets wired now.
    pub fn register(&mut self, name: impl Into<BucketName>) -> Result<BucketName, GraphError> {
        let name = name.into();
        if !self.buckets.contains_key(&name) && self.declared.insert(name.clone()) {
            tracing::trace!("declared bucket {}", name);
            self.flush_edges()?;
        }
        Ok(name)
    }

    /// Get a bucket, creating it on first reference.
    pub fn get_or_create(&mut self, name: impl Into<BucketName>) -> Result<&mut Bucket, GraphError> {
        let name = name.into();
        self.realize(&name)?;
        Ok(self
            .buckets
            .entry(name)
            .or_insert_with_key(|name| Bucket::new(name)))
    }

    /// Apply `f` to the bucket now, or as soon as it is realized.
    pub fn configure<F>(&mut self, name: impl Into<BucketName>, f: F)
    where
        F: FnOnce(&mut Bucket) + 'static,
    {
        let name = name.into();
        match self.buckets.get_mut(&name) {
            Some(bucket) => f(bucket),
            None => self.pending.entry(name).or_default().push(Box::new(f)),
        }
    }

    /// Add an edge meaning every member of `parent` is a member of `child`.
    ///
    /// Both buckets are realized if they are known. If either name is
    /// unknown the edge is parked until it is declared. Adding an edge that
    /// already exists changes nothing.
    pub fn extends_from(
        &mut self,
        child: impl Into<BucketName>,
        parent: impl Into<BucketName>,
    ) -> Result<(), GraphError> {
        let child = child.into();
        let parent = parent.into();

        if self.is_known(&child) && self.is_known(&parent) {
            self.realize(&child)?;
            self.realize(&parent)?;
            self.link(&child, &parent)
        } else {
            tracing::debug!("deferring edge {} <- {}", child, parent);
            self.pending_edges.insert((child, parent));
            Ok(())
        }
    }

    /// Get a realized bucket.
    pub fn get(&self, name: &str) -> Option<&Bucket> {
        self.buckets.get(name)
    }

    /// Check if a bucket has been realized.
    pub fn contains(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Check if a bucket is realized or declared.
    pub fn is_known(&self, name: &str) -> bool {
        self.buckets.contains_key(name) || self.declared.contains(name)
    }

    /// Iterate over realized buckets in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.values()
    }

    /// Number of realized buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// All wired edges as (child, parent) pairs.
    pub fn edges(&self) -> BTreeSet<(BucketName, BucketName)> {
        self.buckets
            .values()
            .flat_map(|b| b.extends_from().map(move |p| (b.name().clone(), p.clone())))
            .collect()
    }

    /// Check if `child` includes every member of `parent`, directly or not.
    pub fn includes(&self, child: &str, parent: &str) -> bool {
        self.contains(child) && self.contains(parent) && self.path(child, parent).is_some()
    }

    /// Realize everything, check every edge and freeze the graph.
    pub fn finalize(&mut self) -> Result<BucketGraph, GraphError> {
        let declared: Vec<_> = self.declared.iter().cloned().collect();
        for name in &declared {
            self.realize(name)?;
        }

        if let Some((child, parent)) = self.pending_edges.iter().next() {
            let missing = if self.is_known(child) { parent } else { child };
            let referenced_by = self
                .pending_edges
                .iter()
                .filter_map(|(c, p)| {
                    if c == missing {
                        Some(p.to_string())
                    } else if p == missing {
                        Some(c.to_string())
                    } else {
                        None
                    }
                })
                .collect();

            return Err(GraphError::UnknownBucket {
                bucket: missing.to_string(),
                referenced_by,
            });
        }

        if let Some(name) = self.pending.keys().min() {
            return Err(GraphError::UnknownBucket {
                bucket: name.to_string(),
                referenced_by: Vec::new(),
            });
        }

        // Roles may have changed after an edge was wired
        let edges = self.edges();
        for (child, parent) in &edges {
            self.check_roles(child, parent)?;
        }

        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for name in self.buckets.keys() {
            nodes.insert(name.clone(), graph.add_node(name.clone()));
        }
        for (child, parent) in &edges {
            graph.add_edge(nodes[child], nodes[parent], ());
        }

        if let Err(cycle) = toposort(&graph, None) {
            let start = &graph[cycle.node_id()];
            let buckets = self
                .buckets
                .get(start)
                .and_then(|b| b.extends_from().find_map(|p| self.path(p, start)))
                .map(|path| {
                    std::iter::once(start)
                        .chain(&path)
                        .map(|n| n.to_string())
                        .collect()
                })
                .unwrap_or_else(|| vec![start.to_string()]);

            return Err(GraphError::CycleDetected { buckets });
        }

        Ok(BucketGraph::new(graph, nodes, self.buckets.clone()))
    }

    fn realize(&mut self, name: &BucketName) -> Result<(), GraphError> {
        if self.create(name) {
            self.flush_edges()?;
        }
        Ok(())
    }

    /// Insert the bucket and run its parked mutations. Returns false if it
    /// already existed.
    fn create(&mut self, name: &BucketName) -> bool {
        if self.buckets.contains_key(name) {
            return false;
        }

        self.declared.remove(name);
        let mut bucket = Bucket::new(name);
        for mutation in self.pending.remove(name).unwrap_or_default() {
            mutation(&mut bucket);
        }
        self.buckets.insert(name.clone(), bucket);
        tracing::trace!("realized bucket {}", name);
        true
    }

    fn flush_edges(&mut self) -> Result<(), GraphError> {
        let ready: Vec<_> = self
            .pending_edges
            .iter()
            .filter(|(child, parent)| self.is_known(child) && self.is_known(parent))
            .cloned()
            .collect();

        for edge in ready {
            self.pending_edges.remove(&edge);
            let (child, parent) = edge;
            self.create(&child);
            self.create(&parent);
            self.link(&child, &parent)?;
        }

        Ok(())
    }

    fn link(&mut self, child: &BucketName, parent: &BucketName) -> Result<(), GraphError> {
        if self.buckets[child].directly_extends(parent) {
            return Ok(());
        }

        self.check_roles(child, parent)?;

        if child == parent {
            return Err(GraphError::CycleDetected {
                buckets: vec![child.to_string(), child.to_string()],
            });
        }
        if let Some(path) = self.path(parent, child) {
            let buckets = std::iter::once(child)
                .chain(&path)
                .map(|n| n.to_string())
                .collect();
            return Err(GraphError::CycleDetected { buckets });
        }

        if let Some(bucket) = self.buckets.get_mut(child) {
            bucket.insert_parent(parent.clone());
        }
        Ok(())
    }

    fn check_roles(&self, child: &BucketName, parent: &BucketName) -> Result<(), GraphError> {
        let child_roles = self.buckets[child].roles();
        let parent_roles = self.buckets[parent].roles();

        if child_roles.resolvable && parent_roles.is_consumable_only() {
            return Err(GraphError::IncompatibleRoles {
                child: child.to_string(),
                child_roles,
                parent: parent.to_string(),
                parent_roles,
            });
        }
        Ok(())
    }

    /// Extends-from path from `from` down to `to`, both ends included.
    fn path(&self, from: &str, to: &str) -> Option<Vec<BucketName>> {
        let mut visited = BTreeSet::new();
        let mut stack = vec![vec![BucketName::from(from)]];

        while let Some(path) = stack.pop() {
            let current = path.last()?;
            if current == to {
                return Some(path);
            }
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(bucket) = self.buckets.get(current.as_str()) {
                for parent in bucket.extends_from() {
                    let mut next = path.clone();
                    next.push(parent.clone());
                    stack.push(next);
                }
            }
        }

        None
    }
}

impl fmt::Debug for BucketRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketRegistry")
            .field("buckets", &self.buckets.keys().collect::<Vec<_>>())
            .field("declared", &self.declared)
            .field("pending", &self.pending.keys().collect::<Vec<_>>())
            .field("pending_edges", &self.pending_edges)
            .finish()
    }
}
