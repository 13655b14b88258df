// ── Topology domain model ──
//
// Canonical node/link representation shared by every renderer. Field
// names on the wire are camelCase; enum values are lowercase strings.

pub mod link;
pub mod node;
pub mod topology;

// ── Re-exports ──────────────────────────────────────────────────────

pub use link::{LinkStatus, LinkType, NetworkLink};
pub use node::{NetworkNode, NodeRole, NodeStatus, NodeType};
pub use topology::{IntegrityIssue, LinkEndpoint, TopologyData};
