// src/graph/store.rs
//! The category arena: nodes, adjacency, and name lookup.

use std::collections::HashMap;

/// Stable handle of a category inside a [`CategoryGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single category. Holds structure only; per-run scratch state lives with the run.
#[derive(Debug, Clone, Default)]
pub struct CategoryNode {
    pub name: String,
    pub parents: Vec<NodeId>,
    pub children: Vec<NodeId>,
}

/// The category hierarchy, built once and then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct CategoryGraph {
    nodes: Vec<CategoryNode>,
    index: HashMap<String, NodeId>,
    edges: usize,
    dedup_edges: bool,
}

impl CategoryGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph that ignores repeated `add_edge` calls for a pair it already links.
    #[must_use]
    pub fn with_dedup() -> Self {
        Self {
            dedup_edges: true,
            ..Self::default()
        }
    }

    /// Returns the node for `name`, registering an empty one if absent.
    pub fn get_or_create(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        #[allow(clippy::cast_possible_truncation)]
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(CategoryNode {
            name: name.to_string(),
            ..CategoryNode::default()
        });
        self.index.insert(name.to_string(), id);
        id
    }

    /// Links `parent` and `child` in both directions.
    ///
    /// Repeated pairs are linked again unless the graph was built with
    /// [`CategoryGraph::with_dedup`], so a duplicated record counts twice in diffusion.
    pub fn add_edge(&mut self, parent_name: &str, child_name: &str) {
        let parent = self.get_or_create(parent_name);
        let child = self.get_or_create(child_name);

        if self.dedup_edges && self.nodes[parent.index()].children.contains(&child) {
            return;
        }

        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parents.push(parent);
        self.edges += 1;
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &CategoryNode {
        &self.nodes[id.index()]
    }

    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].name
    }

    #[must_use]
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].parents
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Parents followed by children: the undirected view used for diffusion.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = &self.nodes[id.index()];
        node.parents.iter().chain(node.children.iter()).copied()
    }

    #[must_use]
    pub fn degree(&self, id: NodeId) -> usize {
        let node = &self.nodes[id.index()];
        node.parents.len() + node.children.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent/child links, counting duplicates that were kept.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        #[allow(clippy::cast_possible_truncation)]
        (0..self.nodes.len() as u32).map(NodeId)
    }
}
