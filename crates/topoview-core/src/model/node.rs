// ── Node domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Device kind. Closed set: every visual resolver matches it exhaustively,
/// so a new kind is a compile error until each renderer handles it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NodeType {
    Switch,
    Router,
    Host,
    Controller,
    Firewall,
    Group,
    Vtep,
}

/// Operational status of a node. Drives the border/outline color.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NodeStatus {
    #[default]
    Active,
    Warning,
    Error,
    Inactive,
}

impl NodeStatus {
    /// Severity rank used when aggregating a group's status:
    /// `error` > `warning` > `inactive` > `active`.
    pub fn severity(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
            Self::Warning => 2,
            Self::Error => 3,
        }
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Fabric role. Refines size and shape within a [`NodeType`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NodeRole {
    Spine,
    Leaf,
    Access,
    Core,
    Aggregation,
    Edge,
}

/// A device in a topology snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    /// Physical depth, 1 = topmost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,

    // Display-only identifiers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,

    // Telemetry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,

    // Overlay (VTEP only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vxlan_vni: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vtep_ip: Option<String>,
}

impl NetworkNode {
    /// Minimal node with everything optional left unset.
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            status: NodeStatus::Active,
            role: None,
            vlan: None,
            layer: None,
            ip: None,
            mac: None,
            bandwidth: None,
            bandwidth_label: None,
            cpu: None,
            memory: None,
            vxlan_vni: None,
            vtep_ip: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = Some(layer);
        self
    }

    #[must_use]
    pub fn with_vlan(mut self, vlan: u16) -> Self {
        self.vlan = Some(vlan);
        self
    }

    #[must_use]
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Layer used for placement. Missing or zero layers sit on layer 1.
    pub fn effective_layer(&self) -> u8 {
        self.layer.unwrap_or(1).max(1)
    }

    /// Bandwidth label to show in info panels: the explicit label if the
    /// data carries one, otherwise derived from `bandwidth`.
    pub fn display_bandwidth(&self) -> Option<String> {
        self.bandwidth_label
            .clone()
            .or_else(|| self.bandwidth.map(crate::visual::bandwidth_label))
    }
}
