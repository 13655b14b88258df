//! Tree builder — hierarchical projections of a flat snapshot.
//!
//! Two independent, pure transforms feed tree-style renderers:
//!
//! - [`build_physical_tree`] nests nodes by `layer` through link adjacency
//!   (layer 1 under a synthetic root, down to layer 4).
//! - [`build_logical_tree`] groups nodes into VLAN buckets plus a leading
//!   "Infrastructure" bucket for VLAN-less nodes.
//!
//! Both rebuild from scratch on every call and return `None` for an empty
//! snapshot. Nodes that cannot be placed are dropped, never reported as
//! errors.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::graph::DisplayGraph;
use crate::model::{NetworkNode, NodeRole, NodeStatus, NodeType, TopologyData};
use crate::view::ViewMode;

/// Deepest layer the physical tree nests.
pub const MAX_TREE_LAYER: u8 = 4;

pub const ROOT_ID: &str = "root";
pub const INFRASTRUCTURE_ID: &str = "infrastructure";

/// Sort key for members without a layer in the logical tree.
const MISSING_LAYER_SENTINEL: u16 = 999;

/// Derived hierarchy node. Owned by whoever asked for the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub status: NodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_label: Option<String>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(node: &NetworkNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type,
            status: node.status,
            role: node.role,
            vlan: node.vlan,
            layer: node.layer,
            ip: node.ip.clone(),
            bandwidth_label: node.display_bandwidth(),
            children: Vec::new(),
        }
    }

    fn synthetic(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            status: NodeStatus::Active,
            role: None,
            vlan: None,
            layer: None,
            ip: None,
            bandwidth_label: None,
            children: Vec::new(),
        }
    }

    /// Total nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first search for `id`.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Ids of every node in the subtree, pre-order.
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.count());
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(&self.id);
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

/// Build the tree matching `view_mode`.
pub fn build_tree(data: &TopologyData, view_mode: ViewMode) -> Option<TreeNode> {
    match view_mode {
        ViewMode::Physical => build_physical_tree(data),
        ViewMode::Logical => build_logical_tree(data),
    }
}

/// Physical hierarchy: root → layer 1 → layer 2 → layer 3 → layer 4.
///
/// A node's children are its neighbors exactly one layer below. Layers are
/// walked top-down in input order and each node is claimed by the first
/// parent that reaches it, so shared downlinks (a leaf wired to two
/// spines) appear once. Nodes deeper than layer 4, and nodes with no
/// neighbor in the layer above, are omitted.
pub fn build_physical_tree(data: &TopologyData) -> Option<TreeNode> {
    if data.is_empty() {
        return None;
    }
    let graph = DisplayGraph::from_topology(data);

    let mut claimed: HashSet<usize> = HashSet::with_capacity(graph.len());
    let top: Vec<usize> = (0..graph.len())
        .filter(|&i| graph.nodes()[i].effective_layer() == 1)
        .collect();
    claimed.extend(top.iter().copied());

    // children_of[i] lists the indices nested under node i.
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); graph.len()];
    let mut frontier = top.clone();
    for layer in 1..MAX_TREE_LAYER {
        let mut next = Vec::new();
        for &parent in &frontier {
            for &n in graph.neighbors(parent) {
                if graph.nodes()[n].effective_layer() == layer + 1 && claimed.insert(n) {
                    children_of[parent].push(n);
                    next.push(n);
                }
            }
        }
        frontier = next;
    }

    // Neighbor lists follow link order; present children in node order.
    for kids in &mut children_of {
        kids.sort_unstable();
    }

    let omitted = graph.len() - claimed.len();
    if omitted > 0 {
        debug!(omitted, "physical tree omitted unplaceable nodes");
    }

    let mut root = TreeNode::synthetic(ROOT_ID, "Network", NodeType::Controller);
    root.children = top
        .iter()
        .map(|&i| assemble(&graph, &children_of, i))
        .collect();
    Some(root)
}

fn assemble(graph: &DisplayGraph, children_of: &[Vec<usize>], idx: usize) -> TreeNode {
    let mut node = TreeNode::leaf(&graph.nodes()[idx]);
    node.children = children_of[idx]
        .iter()
        .map(|&c| assemble(graph, children_of, c))
        .collect();
    node
}

/// Logical hierarchy: root → {Infrastructure, VLAN n…} → members.
///
/// VLAN buckets are ordered ascending; members are ordered by layer with
/// layer-less nodes last. A bucket's status is its worst member status.
pub fn build_logical_tree(data: &TopologyData) -> Option<TreeNode> {
    if data.is_empty() {
        return None;
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(data.nodes.len());
    let mut infrastructure: Vec<&NetworkNode> = Vec::new();
    let mut vlans: BTreeMap<u16, Vec<&NetworkNode>> = BTreeMap::new();

    for node in &data.nodes {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        match node.vlan {
            Some(vlan) => vlans.entry(vlan).or_default().push(node),
            None => infrastructure.push(node),
        }
    }

    let mut root = TreeNode::synthetic(ROOT_ID, "Logical Network", NodeType::Controller);

    if !infrastructure.is_empty() {
        root.children.push(bucket(
            TreeNode::synthetic(INFRASTRUCTURE_ID, "Infrastructure", NodeType::Group),
            infrastructure,
        ));
    }

    for (vlan, members) in vlans {
        let mut group =
            TreeNode::synthetic(format!("vlan-{vlan}"), format!("VLAN {vlan}"), NodeType::Group);
        group.vlan = Some(vlan);
        root.children.push(bucket(group, members));
    }

    Some(root)
}

fn bucket(mut group: TreeNode, mut members: Vec<&NetworkNode>) -> TreeNode {
    // Stable: equal layers keep input order.
    members.sort_by_key(|n| n.layer.map_or(MISSING_LAYER_SENTINEL, u16::from));
    group.status = members
        .iter()
        .map(|n| n.status)
        .max_by_key(|s| s.severity())
        .unwrap_or_default();
    group.children = members.into_iter().map(TreeNode::leaf).collect();
    group
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::NetworkLink;
    use pretty_assertions::assert_eq;

    fn sw(id: &str, layer: u8) -> NetworkNode {
        NetworkNode::new(id, id, NodeType::Switch).with_layer(layer)
    }

    fn host(id: &str, layer: Option<u8>, vlan: Option<u16>) -> NetworkNode {
        let mut n = NetworkNode::new(id, id, NodeType::Host);
        n.layer = layer;
        n.vlan = vlan;
        n
    }

    fn link(a: &str, b: &str) -> NetworkLink {
        NetworkLink::new(format!("{a}-{b}"), a, b, 10_000)
    }

    fn fabric() -> TopologyData {
        TopologyData::new(
            vec![
                sw("spine-1", 1),
                sw("spine-2", 1),
                sw("leaf-1", 2),
                sw("leaf-2", 2),
                sw("access-1", 3),
                host("host-1", Some(4), Some(100)),
                host("host-2", Some(4), Some(200)),
            ],
            vec![
                link("spine-1", "leaf-1"),
                link("spine-1", "leaf-2"),
                link("spine-2", "leaf-1"),
                link("spine-2", "leaf-2"),
                link("leaf-1", "access-1"),
                link("access-1", "host-1"),
                link("host-2", "access-1"),
            ],
        )
    }

    #[test]
    fn empty_data_builds_nothing() {
        assert!(build_physical_tree(&TopologyData::default()).is_none());
        assert!(build_logical_tree(&TopologyData::default()).is_none());
        assert!(build_tree(&TopologyData::default(), ViewMode::Logical).is_none());
    }

    #[test]
    fn physical_tree_keeps_every_layered_node_once() {
        let data = fabric();
        let tree = build_physical_tree(&data).unwrap();
        assert_eq!(tree.id, ROOT_ID);
        assert_eq!(tree.node_type, NodeType::Controller);
        // root + every input node, none duplicated
        assert_eq!(tree.count(), data.nodes.len() + 1);
        let ids = tree.ids();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn physical_tree_nests_by_layer() {
        let tree = build_physical_tree(&fabric()).unwrap();
        let top: Vec<&str> = tree.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(top, vec!["spine-1", "spine-2"]);

        // Shared leaves are claimed by the first spine.
        let spine1 = tree.find("spine-1").unwrap();
        let leaves: Vec<&str> = spine1.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(leaves, vec!["leaf-1", "leaf-2"]);
        assert!(tree.find("spine-2").unwrap().is_leaf());

        let access = tree.find("access-1").unwrap();
        let hosts: Vec<&str> = access.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(hosts, vec!["host-1", "host-2"]);
    }

    #[test]
    fn physical_tree_omits_unplaceable_nodes() {
        let mut data = fabric();
        data.nodes.push(sw("orphan", 2));
        data.nodes.push(sw("deep", 5));
        data.links.push(link("host-1", "deep"));
        let tree = build_physical_tree(&data).unwrap();
        assert!(tree.find("orphan").is_none());
        assert!(tree.find("deep").is_none());
        assert_eq!(tree.count(), fabric().nodes.len() + 1);
    }

    #[test]
    fn layerless_nodes_sit_under_root() {
        let data = TopologyData::new(vec![host("lonely", None, None)], vec![]);
        let tree = build_physical_tree(&data).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].id, "lonely");
    }

    #[test]
    fn physical_tree_ignores_dangling_links() {
        let mut data = fabric();
        data.links.push(link("spine-1", "ghost"));
        let tree = build_physical_tree(&data).unwrap();
        assert_eq!(tree.count(), data.nodes.len() + 1);
    }

    #[test]
    fn logical_tree_partitions_vlans() {
        let data = TopologyData::new(
            vec![
                host("a", Some(3), Some(200)),
                host("b", None, Some(100)),
                sw("core", 1),
                host("c", Some(1), Some(100)),
                host("d", Some(2), None),
            ],
            vec![],
        );
        let tree = build_logical_tree(&data).unwrap();
        let buckets: Vec<&str> = tree.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(buckets, vec![INFRASTRUCTURE_ID, "vlan-100", "vlan-200"]);

        let infra: Vec<&str> = tree.children[0]
            .children
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(infra, vec!["core", "d"]);

        // Layer ascending, missing layer last.
        let vlan100 = &tree.children[1];
        assert_eq!(vlan100.label, "VLAN 100");
        assert_eq!(vlan100.vlan, Some(100));
        assert_eq!(vlan100.node_type, NodeType::Group);
        let members: Vec<&str> = vlan100.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(members, vec!["c", "b"]);

        // Partition: every VLAN-bearing node exactly once.
        let vlan_members: usize = tree.children[1..].iter().map(|b| b.children.len()).sum();
        assert_eq!(vlan_members, 3);
    }

    #[test]
    fn logical_tree_without_infrastructure_has_no_bucket() {
        let data = TopologyData::new(vec![host("a", None, Some(300))], vec![]);
        let tree = build_logical_tree(&data).unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].id, "vlan-300");
    }

    #[test]
    fn bucket_status_is_worst_member() {
        let mut bad = host("x", Some(1), Some(100));
        bad.status = NodeStatus::Warning;
        let mut worse = host("y", Some(2), Some(100));
        worse.status = NodeStatus::Error;
        let data = TopologyData::new(vec![bad, worse, host("z", None, Some(200))], vec![]);
        let tree = build_logical_tree(&data).unwrap();
        assert_eq!(tree.children[0].status, NodeStatus::Error);
        assert_eq!(tree.children[1].status, NodeStatus::Active);
    }

    #[test]
    fn dispatch_follows_view_mode() {
        let data = fabric();
        let physical = build_tree(&data, ViewMode::Physical).unwrap();
        let logical = build_tree(&data, ViewMode::Logical).unwrap();
        assert_eq!(physical.label, "Network");
        assert_eq!(logical.label, "Logical Network");
    }

    #[test]
    fn serializes_type_field() {
        let tree = build_logical_tree(&fabric()).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["type"], "controller");
        assert_eq!(json["children"][0]["id"], INFRASTRUCTURE_ID);
        assert!(json.get("vlan").is_none());
    }
}
