//! Clap derive structures for the `topoview` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file is also compiled by `build.rs` for man page generation, so
//! it may only depend on `clap` and `clap_complete`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// topoview -- inspect network topologies from the command line
#[derive(Debug, Parser)]
#[command(
    name = "topoview",
    version,
    about = "Inspect network topology layouts, trees and visual attributes",
    long_about = "Loads a node/link topology snapshot (JSON or YAML) and prints the\n\
        derived views every topology renderer shares: physical and logical\n\
        trees, layout hints, resolved colors/shapes, and popup placement.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "TOPOVIEW_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Topology file (JSON or YAML), overrides the profile
    #[arg(long, short = 't', env = "TOPOVIEW_TOPOLOGY", global = true)]
    pub topology: Option<PathBuf>,

    /// Use the built-in demo fabric instead of a file
    #[arg(long, global = true, conflicts_with = "topology")]
    pub demo: bool,

    /// View mode (overrides profile and defaults)
    #[arg(long, global = true)]
    pub view: Option<ViewArg>,

    /// Color theme (overrides profile and defaults)
    #[arg(long, global = true)]
    pub theme: Option<ThemeArg>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TOPOVIEW_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain Value Enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ViewArg {
    /// Wiring and layer hierarchy
    Physical,
    /// VLAN segmentation
    Logical,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NodeTypeArg {
    Switch,
    Router,
    Host,
    Controller,
    Firewall,
    Group,
    Vtep,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Spine,
    Leaf,
    Access,
    Core,
    Aggregation,
    Edge,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Ssh,
    Snmp,
    Netconf,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the physical or logical hierarchy
    Tree(TreeArgs),

    /// Print per-node layout hints for the current view mode
    #[command(alias = "lay")]
    Layout(LayoutArgs),

    /// Print resolved visual attributes
    #[command(alias = "attr")]
    Attrs(AttrsArgs),

    /// Compute where a detail popup goes for a click point
    Popup(PopupArgs),

    /// Report integrity problems in the topology data
    #[command(alias = "check")]
    Validate,

    /// Test device connectivity and add devices to the inventory
    #[command(alias = "dev")]
    Device(DeviceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Tree ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Only print this many levels below the root
    #[arg(long, short = 'd')]
    pub depth: Option<usize>,
}

// ── Layout ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Viewport width
    #[arg(long, default_value = "800")]
    pub width: f64,

    /// Viewport height
    #[arg(long, default_value = "600")]
    pub height: f64,

    /// Settle free nodes with the force simulation and print positions
    #[arg(long, short = 's')]
    pub simulate: bool,

    /// Simulation iterations
    #[arg(long, default_value = "300", requires = "simulate")]
    pub iterations: usize,
}

// ── Attrs ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AttrsArgs {
    #[command(subcommand)]
    pub command: AttrsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AttrsCommand {
    /// Node color, border, size, shape and label
    Nodes,
    /// Link color, width, dash pattern and label
    Links,
}

// ── Popup ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PopupArgs {
    /// Anchor x in screen coordinates
    pub x: f64,

    /// Anchor y in screen coordinates
    pub y: f64,

    /// Container left edge in screen coordinates
    #[arg(long, default_value = "0")]
    pub container_x: f64,

    /// Container top edge in screen coordinates
    #[arg(long, default_value = "0")]
    pub container_y: f64,

    /// Container width
    #[arg(long, default_value = "800")]
    pub container_width: f64,

    /// Container height
    #[arg(long, default_value = "600")]
    pub container_height: f64,

    /// Band at the top of the container the popup must not cover
    #[arg(long)]
    pub reserved_top: Option<f64>,
}

// ── Device ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DeviceArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// Validate connection parameters (simulated, opens no sockets)
    Test {
        /// Device hostname or IP
        host: String,

        /// Management protocol
        #[arg(long, short = 'P', default_value = "ssh")]
        protocol: ProtocolArg,

        /// Port (defaults per protocol)
        #[arg(long)]
        port: Option<u16>,

        /// Login for SSH/NETCONF
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// SNMP community
        #[arg(long)]
        community: Option<String>,
    },

    /// Add a device to the topology inventory
    Add {
        /// Unique node id
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        label: Option<String>,

        /// Device kind
        #[arg(long = "type", default_value = "switch")]
        node_type: NodeTypeArg,

        /// Management IP
        #[arg(long)]
        ip: Option<String>,

        /// Fabric role
        #[arg(long)]
        role: Option<RoleArg>,

        /// VLAN id
        #[arg(long)]
        vlan: Option<u16>,

        /// Physical layer (1 = top)
        #[arg(long)]
        layer: Option<u8>,

        /// Write the updated topology back to the source file
        #[arg(long, short = 'w')]
        write: bool,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a config file with one profile
    Init {
        /// Topology file for the profile
        #[arg(long)]
        topology: PathBuf,

        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Overwrite an existing config file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a key on the active profile (topology, view, theme, refresh)
    /// or a global key (default_profile, defaults.*, popup.*)
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
