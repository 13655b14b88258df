// ── Topology sources ──
//
// Snapshots load from JSON or YAML files, picked by extension.

use std::path::Path;

use tracing::debug;

use crate::error::CoreError;
use crate::model::TopologyData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(CoreError::UnsupportedFormat { extension }),
        }
    }
}

/// Parse a snapshot from an in-memory document.
pub fn parse_topology(
    text: &str,
    format: SourceFormat,
    path: &Path,
) -> Result<TopologyData, CoreError> {
    let parsed = match format {
        SourceFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        SourceFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| CoreError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a snapshot from disk.
pub fn load_topology(path: &Path) -> Result<TopologyData, CoreError> {
    let format = SourceFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_topology(&text, format, path)?;
    debug!(
        path = %path.display(),
        nodes = data.nodes.len(),
        links = data.links.len(),
        "topology loaded"
    );
    Ok(data)
}

/// Write a snapshot back to disk in the format its extension names.
pub fn save_topology(path: &Path, data: &TopologyData) -> Result<(), CoreError> {
    let format = SourceFormat::from_path(path)?;
    let rendered = match format {
        SourceFormat::Json => serde_json::to_string_pretty(data).map_err(|e| e.to_string()),
        SourceFormat::Yaml => serde_yaml::to_string(data).map_err(|e| e.to_string()),
    };
    let text = rendered.map_err(|message| CoreError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    std::fs::write(path, text).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), nodes = data.nodes.len(), "topology saved");
    Ok(())
}
