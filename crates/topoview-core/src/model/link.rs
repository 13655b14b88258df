// ── Link domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Link health as reported by the collector.
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
pub enum LinkStatus {
    #[default]
    Active,
    Congested,
    Down,
}

/// Physical or overlay medium of a link.
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
pub enum LinkType {
    #[default]
    Ethernet,
    Optical,
    Wireless,
    Vxlan,
}

/// An edge between two [`NetworkNode`](super::NetworkNode)s, referenced by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLink {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Capacity in Mbps.
    #[serde(default)]
    pub bandwidth: u64,
    /// Percentage, 0–100.
    #[serde(default)]
    pub utilization: f64,
    #[serde(default)]
    pub status: LinkStatus,
    #[serde(rename = "type", default)]
    pub link_type: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packet_loss: Option<f64>,
}

impl NetworkLink {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        bandwidth: u64,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            bandwidth,
            utilization: 0.0,
            status: LinkStatus::Active,
            link_type: LinkType::Ethernet,
            latency: None,
            packet_loss: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: LinkStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    #[must_use]
    pub fn with_utilization(mut self, utilization: f64) -> Self {
        self.utilization = utilization;
        self
    }

    /// Whether `id` is one of the two endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint at all.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}
