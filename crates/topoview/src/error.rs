//! CLI error types with miette diagnostics.
//!
//! Maps core, config and device errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use topoview_config::ConfigError;
use topoview_core::{CoreError, DeviceError};

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const INVALID_DATA: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const CONFLICT: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Topology source ──────────────────────────────────────────────
    #[error("No topology source configured")]
    #[diagnostic(
        code(topoview::no_topology),
        help(
            "Pass --topology <FILE> or --demo, or create a profile with:\n\
             topoview config init --topology <FILE>\n\
             Config file: {path}"
        )
    )]
    NoTopology { path: String },

    #[error("{message}")]
    #[diagnostic(
        code(topoview::source),
        help("Topology files must be JSON (.json) or YAML (.yaml, .yml) with `nodes` and `links`.")
    )]
    Source { message: String },

    #[error("Found {count} integrity issue(s) in the topology")]
    #[diagnostic(
        code(topoview::integrity),
        help("Duplicate nodes and dangling links are dropped when rendering.")
    )]
    IntegrityIssues { count: usize },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(topoview::not_found),
        help("Run: topoview {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(topoview::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(topoview::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(topoview::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: topoview config init --name {name} --topology <FILE>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(topoview::config_exists),
        help("Use --force to overwrite it, or edit it with: topoview config set")
    )]
    ConfigExists { path: String },

    #[error("{message}")]
    #[diagnostic(code(topoview::config))]
    Config { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::Source { .. } | Self::IntegrityIssues { .. } => exit_code::INVALID_DATA,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::NoTopology { .. }
            | Self::ProfileNotFound { .. }
            | Self::ConfigExists { .. }
            | Self::Config { .. } => exit_code::CONFIG,
            Self::Conflict { .. } => exit_code::CONFLICT,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── Library error mapping ────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NodeNotFound { id } => CliError::NotFound {
                resource_type: "node".into(),
                identifier: id,
                list_command: "attrs nodes".into(),
            },
            CoreError::LinkNotFound { id } => CliError::NotFound {
                resource_type: "link".into(),
                identifier: id,
                list_command: "attrs links".into(),
            },
            CoreError::InvalidRefresh { value, reason } => CliError::Validation {
                field: "refresh".into(),
                reason: format!("'{value}': {reason}"),
            },
            other => CliError::Source {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

impl From<DeviceError> for CliError {
    fn from(err: DeviceError) -> Self {
        match err {
            DeviceError::InvalidParams { field, reason } => CliError::Validation {
                field: field.into(),
                reason,
            },
            DeviceError::Duplicate { id } => CliError::Conflict {
                resource_type: "device".into(),
                identifier: id,
            },
            DeviceError::InvalidDevice { message } => CliError::Validation {
                field: "device".into(),
                reason: message,
            },
        }
    }
}
