//! CLI configuration: thin wrapper around `topoview_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--topology, --demo, --view, ...).

use std::path::PathBuf;

use tracing::debug;

use topoview_core::{
    NodeRole, NodeType, Protocol, Theme, TopologyData, ViewMode, demo_topology, load_topology,
};

use crate::cli::{GlobalOpts, NodeTypeArg, ProtocolArg, RoleArg, ThemeArg, ViewArg};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use topoview_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

// ── Flag → domain conversions ───────────────────────────────────────

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Physical => Self::Physical,
            ViewArg::Logical => Self::Logical,
        }
    }
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

impl From<NodeTypeArg> for NodeType {
    fn from(t: NodeTypeArg) -> Self {
        match t {
            NodeTypeArg::Switch => Self::Switch,
            NodeTypeArg::Router => Self::Router,
            NodeTypeArg::Host => Self::Host,
            NodeTypeArg::Controller => Self::Controller,
            NodeTypeArg::Firewall => Self::Firewall,
            NodeTypeArg::Group => Self::Group,
            NodeTypeArg::Vtep => Self::Vtep,
        }
    }
}

impl From<RoleArg> for NodeRole {
    fn from(r: RoleArg) -> Self {
        match r {
            RoleArg::Spine => Self::Spine,
            RoleArg::Leaf => Self::Leaf,
            RoleArg::Access => Self::Access,
            RoleArg::Core => Self::Core,
            RoleArg::Aggregation => Self::Aggregation,
            RoleArg::Edge => Self::Edge,
        }
    }
}

impl From<ProtocolArg> for Protocol {
    fn from(p: ProtocolArg) -> Self {
        match p {
            ProtocolArg::Ssh => Self::Ssh,
            ProtocolArg::Snmp => Self::Snmp,
            ProtocolArg::Netconf => Self::Netconf,
        }
    }
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Where the snapshot came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologySource {
    Demo,
    File(PathBuf),
}

impl std::fmt::Display for TopologySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demo => f.write_str("demo"),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Everything a command needs after flag/profile/default resolution.
#[derive(Debug, Clone)]
pub struct Session {
    pub source: TopologySource,
    pub data: TopologyData,
    pub view: ViewMode,
    pub theme: Theme,
}

/// Resolve source, view and theme with precedence flag > profile > defaults,
/// then load the snapshot.
pub fn load_session(global: &GlobalOpts) -> Result<Session, CliError> {
    let cfg = load_config()?;
    let profile = cfg.resolve_profile(global.profile.as_deref())?;

    let source = if global.demo {
        TopologySource::Demo
    } else if let Some(path) = &global.topology {
        TopologySource::File(path.clone())
    } else if let Some((_, p)) = profile {
        TopologySource::File(p.topology.clone())
    } else {
        return Err(CliError::NoTopology {
            path: config_path().display().to_string(),
        });
    };

    let view = global
        .view
        .map(ViewMode::from)
        .or_else(|| profile.and_then(|(_, p)| p.view))
        .unwrap_or(cfg.defaults.view);
    let theme = global
        .theme
        .map(Theme::from)
        .or_else(|| profile.and_then(|(_, p)| p.theme))
        .unwrap_or(cfg.defaults.theme);

    let data = match &source {
        TopologySource::Demo => demo_topology(),
        TopologySource::File(path) => load_topology(path)?,
    };

    debug!(
        %source,
        profile = profile.map(|(name, _)| name),
        %view,
        %theme,
        "session resolved"
    );

    Ok(Session {
        source,
        data,
        view,
        theme,
    })
}
