// ── Topology snapshot ──
//
// A snapshot is built by whoever fetched the data, handed to the core
// read-only, and replaced wholesale on refresh. Nothing here patches a
// snapshot in place.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::link::NetworkLink;
use super::node::NetworkNode;

/// Complete node/link snapshot consumed by every renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyData {
    #[serde(default)]
    pub nodes: Vec<NetworkNode>,
    #[serde(default)]
    pub links: Vec<NetworkLink>,
}

/// Which side of a link failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkEndpoint {
    Source,
    Target,
}

impl fmt::Display for LinkEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// A data-integrity problem. These never fail a render; the offending
/// element is skipped and the issue is reported for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityIssue {
    DuplicateNodeId {
        id: String,
    },
    DanglingLink {
        link: String,
        endpoint: LinkEndpoint,
        missing: String,
    },
    SelfLoop {
        link: String,
        node: String,
    },
    UtilizationOutOfRange {
        link: String,
        utilization: f64,
    },
}

impl IntegrityIssue {
    /// Id of the element the issue is about.
    pub fn subject(&self) -> &str {
        match self {
            Self::DuplicateNodeId { id } => id,
            Self::DanglingLink { link, .. }
            | Self::SelfLoop { link, .. }
            | Self::UtilizationOutOfRange { link, .. } => link,
        }
    }
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateNodeId { id } => {
                write!(f, "duplicate node id '{id}' (first occurrence kept)")
            }
            Self::DanglingLink {
                link,
                endpoint,
                missing,
            } => write!(f, "link '{link}' {endpoint} references unknown node '{missing}'"),
            Self::SelfLoop { link, node } => write!(f, "link '{link}' loops on node '{node}'"),
            Self::UtilizationOutOfRange { link, utilization } => {
                write!(f, "link '{link}' utilization {utilization} outside 0-100")
            }
        }
    }
}

impl TopologyData {
    pub fn new(nodes: Vec<NetworkNode>, links: Vec<NetworkLink>) -> Self {
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node carrying `id`.
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&NetworkLink> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Whether a node or link with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some() || self.link(id).is_some()
    }

    /// Every integrity problem in the snapshot, in input order.
    pub fn integrity_report(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.nodes.len());

        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                issues.push(IntegrityIssue::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }

        for link in &self.links {
            for (endpoint, id) in [
                (LinkEndpoint::Source, &link.source),
                (LinkEndpoint::Target, &link.target),
            ] {
                if !seen.contains(id.as_str()) {
                    issues.push(IntegrityIssue::DanglingLink {
                        link: link.id.clone(),
                        endpoint,
                        missing: id.clone(),
                    });
                }
            }
            if link.source == link.target {
                issues.push(IntegrityIssue::SelfLoop {
                    link: link.id.clone(),
                    node: link.source.clone(),
                });
            }
            if !(0.0..=100.0).contains(&link.utilization) {
                issues.push(IntegrityIssue::UtilizationOutOfRange {
                    link: link.id.clone(),
                    utilization: link.utilization,
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeType, NetworkLink, NetworkNode};
    use pretty_assertions::assert_eq;

    fn node(id: &str) -> NetworkNode {
        NetworkNode::new(id, id.to_uppercase(), NodeType::Switch)
    }

    #[test]
    fn clean_snapshot_has_no_issues() {
        let data = TopologyData::new(
            vec![node("a"), node("b")],
            vec![NetworkLink::new("l1", "a", "b", 1000)],
        );
        assert!(data.integrity_report().is_empty());
    }

    #[test]
    fn reports_duplicates_and_dangling_links() {
        let data = TopologyData::new(
            vec![node("a"), node("a"), node("b")],
            vec![
                NetworkLink::new("l1", "a", "ghost", 1000),
                NetworkLink::new("l2", "b", "b", 1000).with_utilization(120.0),
            ],
        );
        let issues = data.integrity_report();
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::DuplicateNodeId { id: "a".into() },
                IntegrityIssue::DanglingLink {
                    link: "l1".into(),
                    endpoint: LinkEndpoint::Target,
                    missing: "ghost".into(),
                },
                IntegrityIssue::SelfLoop {
                    link: "l2".into(),
                    node: "b".into(),
                },
                IntegrityIssue::UtilizationOutOfRange {
                    link: "l2".into(),
                    utilization: 120.0,
                },
            ]
        );
        assert_eq!(issues[1].subject(), "l1");
        assert_eq!(
            issues[1].to_string(),
            "link 'l1' target references unknown node 'ghost'"
        );
    }

    #[test]
    fn lookups_find_first_occurrence() {
        let mut second = node("a");
        second.label = "second".into();
        let data = TopologyData::new(vec![node("a"), second], vec![]);
        assert_eq!(data.node("a").map(|n| n.label.as_str()), Some("A"));
        assert!(data.contains("a"));
        assert!(!data.contains("l1"));
    }
}
