//! Display graph — a snapshot with links resolved to node indices.
//!
//! Renderers iterate nodes and edges by index instead of re-resolving ids
//! on every frame. Duplicate node ids keep their first occurrence and
//! dangling links are dropped here, so nothing downstream has to guard
//! against either.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{NetworkLink, NetworkNode, TopologyData};

/// A link whose endpoints both resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEdge {
    pub link: NetworkLink,
    pub source: usize,
    pub target: usize,
}

/// Index-resolved view over a [`TopologyData`] snapshot.
#[derive(Debug, Clone, Default)]
pub struct DisplayGraph {
    nodes: Vec<NetworkNode>,
    edges: Vec<DisplayEdge>,
    index: HashMap<String, usize>,
    /// Undirected neighbor lists, first-seen order, no duplicates.
    adjacency: Vec<Vec<usize>>,
    skipped_links: usize,
}

impl DisplayGraph {
    pub fn from_topology(data: &TopologyData) -> Self {
        let mut nodes = Vec::with_capacity(data.nodes.len());
        let mut index = HashMap::with_capacity(data.nodes.len());

        for node in &data.nodes {
            if index.contains_key(&node.id) {
                warn!(id = %node.id, "duplicate node id, keeping first occurrence");
                continue;
            }
            index.insert(node.id.clone(), nodes.len());
            nodes.push(node.clone());
        }

        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        let mut edges = Vec::with_capacity(data.links.len());
        let mut skipped_links = 0;

        for link in &data.links {
            let (Some(&source), Some(&target)) = (index.get(&link.source), index.get(&link.target))
            else {
                warn!(
                    link = %link.id,
                    source = %link.source,
                    target = %link.target,
                    "skipping link with dangling endpoint"
                );
                skipped_links += 1;
                continue;
            };

            if source != target {
                if !adjacency[source].contains(&target) {
                    adjacency[source].push(target);
                }
                if !adjacency[target].contains(&source) {
                    adjacency[target].push(source);
                }
            }

            edges.push(DisplayEdge {
                link: link.clone(),
                source,
                target,
            });
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            skipped_links,
            "display graph built"
        );

        Self {
            nodes,
            edges,
            index,
            adjacency,
            skipped_links,
        }
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DisplayEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.index_of(id).and_then(|i| self.nodes.get(i))
    }

    pub fn edge(&self, link_id: &str) -> Option<&DisplayEdge> {
        self.edges.iter().find(|e| e.link.id == link_id)
    }

    /// Undirected neighbors of the node at `idx`.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        self.adjacency.get(idx).map_or(&[], Vec::as_slice)
    }

    /// VLAN of an edge's source endpoint, used for logical-view coloring.
    pub fn source_vlan(&self, edge: &DisplayEdge) -> Option<u16> {
        self.nodes.get(edge.source).and_then(|n| n.vlan)
    }

    /// Number of input links dropped for dangling endpoints.
    pub fn skipped_links(&self) -> usize {
        self.skipped_links
    }
}
