//! Data bridge: reads the topology source and feeds snapshots into the
//! action loop, once on demand and then on every refresh tick.
//!
//! Each read replaces the snapshot wholesale. Nothing is diffed or merged.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use topoview_core::{CoreError, TopologyData, demo_topology, load_topology};

use crate::action::Action;

/// Where snapshots come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologySource {
    Demo,
    File(PathBuf),
}

impl TopologySource {
    fn read(&self) -> Result<TopologyData, CoreError> {
        match self {
            Self::Demo => Ok(demo_topology()),
            Self::File(path) => load_topology(path),
        }
    }
}

impl fmt::Display for TopologySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Demo => f.write_str("demo"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read one snapshot off the async runtime's worker threads.
pub async fn fetch(source: &TopologySource) -> Result<TopologyData, String> {
    let source = source.clone();
    match tokio::task::spawn_blocking(move || source.read()).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) => Err(format!("loader task failed: {e}")),
    }
}

/// Fetch once and forward the outcome as an action.
pub async fn send_snapshot(source: &TopologySource, action_tx: &mpsc::UnboundedSender<Action>) {
    let action = match fetch(source).await {
        Ok(data) => {
            debug!(
                source = %source,
                nodes = data.nodes.len(),
                links = data.links.len(),
                "topology loaded"
            );
            Action::TopologyLoaded(Arc::new(data))
        }
        Err(message) => {
            warn!(source = %source, error = %message, "topology load failed");
            Action::LoadFailed(message)
        }
    };
    let _ = action_tx.send(action);
}

/// Re-read `source` every `period` until `cancel` fires. The first read
/// happens one period from now; the caller owns the initial load.
pub async fn spawn_data_bridge(
    source: TopologySource,
    period: Duration,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    debug!(source = %source, period = %humantime::format_duration(period), "auto-refresh started");

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticks.tick() => send_snapshot(&source, &action_tx).await,
        }
        if action_tx.is_closed() {
            break;
        }
    }
    debug!(source = %source, "auto-refresh stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_source_yields_the_demo_fabric() {
        let data = fetch(&TopologySource::Demo).await.unwrap();
        assert_eq!(data, demo_topology());
    }

    #[tokio::test]
    async fn missing_file_reports_instead_of_failing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let source = TopologySource::File(PathBuf::from("/nonexistent/topology.yaml"));
        send_snapshot(&source, &tx).await;
        assert!(matches!(rx.recv().await, Some(Action::LoadFailed(_))));
    }

    #[tokio::test]
    async fn cancelled_bridge_exits() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();
        spawn_data_bridge(TopologySource::Demo, Duration::from_secs(5), tx, cancel).await;
    }
}
