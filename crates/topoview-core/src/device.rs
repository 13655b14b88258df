// ── Device API boundary ──
//
// The contract a management backend fulfils to test reachability of a
// device and add it to the inventory. Only an in-memory implementation
// lives here: it validates parameters and simulates the probe without
// opening sockets.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::model::{NetworkNode, NodeRole, NodeStatus, NodeType, TopologyData};

/// Management protocol used to reach a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Protocol {
    Ssh,
    Snmp,
    Netconf,
}

impl Protocol {
    pub fn default_port(self) -> u16 {
        match self {
            Self::Ssh => 22,
            Self::Snmp => 161,
            Self::Netconf => 830,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParams {
    pub host: String,
    pub protocol: Protocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Login for SSH/NETCONF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Community string for SNMP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
}

impl ConnectionParams {
    pub fn new(host: impl Into<String>, protocol: Protocol) -> Self {
        Self {
            host: host.into(),
            protocol,
            port: None,
            username: None,
            community: None,
        }
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.protocol.default_port())
    }

    /// Check that the parameters are complete for the protocol.
    pub fn validate(&self) -> Result<(), DeviceError> {
        if self.host.trim().is_empty() {
            return Err(DeviceError::InvalidParams {
                field: "host",
                reason: "must not be empty".into(),
            });
        }
        if self.port == Some(0) {
            return Err(DeviceError::InvalidParams {
                field: "port",
                reason: "must be between 1 and 65535".into(),
            });
        }
        match self.protocol {
            Protocol::Ssh | Protocol::Netconf
                if self.username.as_deref().is_none_or(str::is_empty) =>
            {
                Err(DeviceError::InvalidParams {
                    field: "username",
                    reason: format!("required for {}", self.protocol),
                })
            }
            Protocol::Snmp if self.community.as_deref().is_none_or(str::is_empty) => {
                Err(DeviceError::InvalidParams {
                    field: "community",
                    reason: "required for snmp".into(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResult {
    pub success: bool,
    pub host: String,
    pub protocol: Protocol,
    pub port: u16,
    pub message: String,
}

/// Inventory entry submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<NodeRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<u8>,
}

impl From<NewDevice> for NetworkNode {
    /// New inventory entries are `inactive` until a backend polls them.
    fn from(device: NewDevice) -> Self {
        let mut node = NetworkNode::new(device.id, device.label, device.node_type)
            .with_status(NodeStatus::Inactive);
        node.ip = device.ip;
        node.role = device.role;
        node.vlan = device.vlan;
        node.layer = device.layer;
        node
    }
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Invalid connection parameter '{field}': {reason}")]
    InvalidParams { field: &'static str, reason: String },

    #[error("Device '{id}' already exists in the inventory")]
    Duplicate { id: String },

    #[error("Invalid device: {message}")]
    InvalidDevice { message: String },
}

/// Backend contract for device onboarding.
pub trait DeviceApi: Send + Sync {
    fn test_connection(
        &self,
        params: &ConnectionParams,
    ) -> impl Future<Output = Result<ConnectionTestResult, DeviceError>> + Send;

    fn add_device(&self, device: NewDevice) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

/// In-memory [`DeviceApi`] over a shared topology snapshot.
#[derive(Debug, Clone, Default)]
pub struct InventoryDeviceApi {
    inventory: Arc<Mutex<TopologyData>>,
}

impl InventoryDeviceApi {
    pub fn new(initial: TopologyData) -> Self {
        Self {
            inventory: Arc::new(Mutex::new(initial)),
        }
    }

    /// Copy of the current inventory.
    pub async fn snapshot(&self) -> TopologyData {
        self.inventory.lock().await.clone()
    }
}

impl DeviceApi for InventoryDeviceApi {
    async fn test_connection(
        &self,
        params: &ConnectionParams,
    ) -> Result<ConnectionTestResult, DeviceError> {
        params.validate()?;
        let port = params.effective_port();
        debug!(host = %params.host, protocol = %params.protocol, port, "simulated connection test");
        Ok(ConnectionTestResult {
            success: true,
            host: params.host.clone(),
            protocol: params.protocol,
            port,
            message: format!(
                "{} parameters valid for {}:{port} (simulated, no connection opened)",
                params.protocol, params.host
            ),
        })
    }

    async fn add_device(&self, device: NewDevice) -> Result<(), DeviceError> {
        if device.id.trim().is_empty() {
            return Err(DeviceError::InvalidDevice {
                message: "id must not be empty".into(),
            });
        }
        let mut inventory = self.inventory.lock().await;
        if inventory.node(&device.id).is_some() {
            return Err(DeviceError::Duplicate { id: device.id });
        }
        info!(id = %device.id, node_type = %device.node_type, "device added to inventory");
        inventory.nodes.push(device.into());
        Ok(())
    }
}
