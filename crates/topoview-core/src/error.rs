// ── Core error types ──
//
// Integrity problems in topology data are NOT errors here: builders drop
// bad nodes/links and log. These variants cover I/O at the edges and the
// few computations that can genuinely fail.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Source errors ────────────────────────────────────────────────
    #[error("Cannot read topology file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse topology file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported topology format '{extension}' (expected json, yaml or yml)")]
    UnsupportedFormat { extension: String },

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Link not found: {id}")]
    LinkNotFound { id: String },

    // ── Computation errors ───────────────────────────────────────────
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Invalid refresh interval '{value}': {reason}")]
    InvalidRefresh { value: String, reason: String },
}

/// Failures of the force simulation. Bindings keep their last good
/// positions when they see one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Layout diverged at iteration {iteration}: node '{node}' has a non-finite position")]
    Diverged { iteration: usize, node: String },

    #[error("Viewport {width}x{height} is not drawable")]
    InvalidViewport { width: f64, height: f64 },
}
