//! Rebuild orchestration
//!
//! [`GraphService`] composes the source tracker, the external decoder, and
//! the graph builder behind a single async interface. All mutable state
//! lives under one lock, which also serializes concurrent rebuild triggers:
//! at most one rebuild runs at a time, and readers only ever observe a
//! complete artifact.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::NavgraphConfig;
use crate::decoder::ObstacleDecoder;
use crate::errors::{NavgraphError, NavgraphResult};
use crate::graph::{GraphBuilder, SourceGraph};
use crate::sources::SourceTracker;

/// The aggregated graph mapping, keyed by source base-name.
///
/// `version` is a monotonically increasing token: consumers compare versions
/// to learn whether anything changed since they last looked. Serializes as
/// the bare name-to-graph mapping.
#[derive(Debug, Serialize)]
pub struct GraphArtifact {
    #[serde(skip)]
    pub version: u64,
    #[serde(flatten)]
    pub graphs: BTreeMap<String, SourceGraph>,
}

impl GraphArtifact {
    pub fn to_json(&self) -> NavgraphResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the artifact as JSON. The destination must carry a `.json`
    /// extension, mirroring the config-time check.
    pub fn write_to(&self, path: &Path) -> NavgraphResult<()> {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return Err(NavgraphError::UnsupportedOutputPath {
                path: path.to_path_buf(),
            });
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// What a rebuild call produced: the current artifact, and whether it is new.
#[derive(Debug, Clone)]
pub struct RebuildOutcome {
    pub artifact: Arc<GraphArtifact>,
    pub changed: bool,
}

#[derive(Debug)]
struct ServiceState {
    tracker: SourceTracker,
    artifact: Option<Arc<GraphArtifact>>,
    version: u64,
}

/// Tracker + decoder + builder composition; the trigger interface external
/// callers (build tools, file watchers) drive.
pub struct GraphService {
    config: NavgraphConfig,
    builder: GraphBuilder,
    decoder: Box<dyn ObstacleDecoder>,
    state: Mutex<ServiceState>,
}

impl GraphService {
    pub fn new(config: NavgraphConfig, decoder: Box<dyn ObstacleDecoder>) -> NavgraphResult<Self> {
        let config = config.validated()?;
        let tracker = SourceTracker::from_patterns(&config.sources)?;
        let builder = GraphBuilder::new(config.padding, config.distance_cutoff);

        Ok(Self {
            config,
            builder,
            decoder,
            state: Mutex::new(ServiceState {
                tracker,
                artifact: None,
                version: 0,
            }),
        })
    }

    pub fn config(&self) -> &NavgraphConfig {
        &self.config
    }

    /// Offer a source identifier for tracking; returns the matching pattern
    /// when it was newly admitted.
    pub async fn offer(&self, path: &str) -> Option<String> {
        let mut state = self.state.lock().await;
        state.tracker.offer(path).map(|p| p.as_str().to_string())
    }

    /// Stop tracking a source identifier, returning it if it was tracked.
    pub async fn remove(&self, path: &str) -> Option<String> {
        self.state.lock().await.tracker.remove(path)
    }

    /// Flag a tracked source as stale so the next rebuild recomputes.
    pub async fn mark_dirty(&self, path: &str) -> bool {
        self.state.lock().await.tracker.mark_dirty(path)
    }

    /// Tracked source identifiers in lexicographic order.
    pub async fn sources(&self) -> Vec<String> {
        self.state.lock().await.tracker.sources().to_vec()
    }

    /// Rebuild the aggregate graph if anything is dirty.
    ///
    /// Holds the state lock for the whole rebuild, so overlapping triggers
    /// queue up instead of racing. A clean tracker returns the cached
    /// artifact unchanged. Any per-source decode or build failure fails the
    /// whole rebuild; the previous artifact stays in place.
    pub async fn rebuild(&self) -> NavgraphResult<RebuildOutcome> {
        let mut state = self.state.lock().await;

        if !state.tracker.is_dirty() {
            if let Some(artifact) = state.artifact.clone() {
                debug!(version = artifact.version, "graph artifact unchanged");
                return Ok(RebuildOutcome {
                    artifact,
                    changed: false,
                });
            }
        }

        info!(sources = state.tracker.sources().len(), "rebuilding navigation graph");
        let started = Instant::now();

        let mut graphs = BTreeMap::new();
        for source_id in state.tracker.sources().to_vec() {
            let decoded = self.decoder.decode(&source_id).await?;
            let graph = self.builder.build(&decoded.obstacles, &decoded.bounds())?;
            debug!(
                source = %source_id,
                nodes = graph.nodes.len(),
                edges = graph.edges.len(),
                "built source graph"
            );
            graphs.insert(source_name(&source_id), graph);
        }

        state.version += 1;
        let artifact = Arc::new(GraphArtifact {
            version: state.version,
            graphs,
        });
        // whole-value swap: readers never see a partial artifact
        state.artifact = Some(artifact.clone());
        state.tracker.clear_dirty();

        info!(
            version = artifact.version,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "navigation graph rebuilt"
        );

        Ok(RebuildOutcome {
            artifact,
            changed: true,
        })
    }
}

/// Source base-name: no directory, no extension.
fn source_name(source_id: &str) -> String {
    Path::new(source_id)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_id.to_string())
}
