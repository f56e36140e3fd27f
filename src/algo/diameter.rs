//! Graph diameter in vertex tokens
//!
//! Wraps the per-source Dijkstra sweep of `mailgraph-algorithms` and handles
//! the thread pool choice.

use crate::config::AnalysisConfig;
use crate::graph::{Graph, Vertex, Weight};
use mailgraph_algorithms::{diameter, DiameterConfig, DiameterResult};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::warn;

/// Options for [`Graph::diameter_with`]
#[derive(Debug, Clone, Copy)]
pub struct DiameterOptions<'a> {
    pub parallel: bool,
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Log every N processed sources (0 disables)
    pub progress_interval: usize,
    /// Set to abandon the remaining sources
    pub cancel: Option<&'a AtomicBool>,
}

impl Default for DiameterOptions<'_> {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            progress_interval: 0,
            cancel: None,
        }
    }
}

impl<'a> DiameterOptions<'a> {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            parallel: config.parallel,
            threads: config.threads,
            progress_interval: config.progress_interval,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Largest finite shortest-path distance and one path realizing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diameter<V> {
    pub value: Weight,
    pub path: Vec<V>,
    pub source: Option<V>,
    pub target: Option<V>,
    /// Number of vertices on `path`
    pub path_length: usize,
    /// False if the computation was cancelled early
    pub complete: bool,
}

impl<V: Vertex> Graph<V> {
    /// Diameter with default options (parallel, global pool)
    pub fn diameter(&self) -> Diameter<V> {
        self.diameter_with(&DiameterOptions::default())
    }

    /// Diameter over all reachable ordered pairs.
    ///
    /// Pairs in different components are ignored rather than counted as
    /// infinite. Empty graph: value 0, empty path. Graph without any
    /// reachable pair: value 0 and a single-vertex path.
    pub fn diameter_with(&self, options: &DiameterOptions<'_>) -> Diameter<V> {
        let config = DiameterConfig {
            parallel: options.parallel,
            cancel: options.cancel,
            progress_interval: options.progress_interval,
        };

        let result = match options.threads.filter(|_| options.parallel) {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| diameter(self.view(), &config)),
                Err(e) => {
                    warn!("Could not build a {}-thread pool ({}), using the global pool", threads, e);
                    diameter(self.view(), &config)
                }
            },
            None => diameter(self.view(), &config),
        };

        self.diameter_from_result(result)
    }

    fn diameter_from_result(&self, result: DiameterResult) -> Diameter<V> {
        let path: Vec<V> = result
            .path
            .iter()
            .map(|&node| self.vertex_at(node as usize).clone())
            .collect();
        Diameter {
            value: result.value,
            path_length: path.len(),
            source: result.source.map(|n| self.vertex_at(n as usize).clone()),
            target: result.target.map(|n| self.vertex_at(n as usize).clone()),
            path,
            complete: result.complete,
        }
    }
}
