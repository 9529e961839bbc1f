use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::coloring::{Assignment, Conflict, TwoColoring};
use crate::graph::ConstraintGraph;
use crate::parity::ParityUnionFind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Decision procedure used to check an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Work-list propagation of the groups, one component at a time
    #[default]
    Traversal,
    /// Incremental union-find, with per-element parities
    UnionFind,
}

impl Method {
    /// Decides the graph, returning a complete witness when it is consistent.
    pub fn check(self, graph: &ConstraintGraph) -> Result<Assignment, Conflict> {
        match self {
            Method::Traversal => TwoColoring::new(graph).solve(),
            Method::UnionFind => ParityUnionFind::check(graph).map(|mut sets| sets.assignment()),
        }
    }
}

/**
 * Settings that can be given in a YAML file, and then overridden on the
 * command line. Every field is optional in the file.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub log_level: String,
    pub log_directory: Option<PathBuf>,
    pub method: Method,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_directory: None,
            method: Method::default(),
            verbose: false,
        }
    }
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document is 'null', which does not deserialise as a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    // -- COMMAND-LINE OVERRIDES -- //

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }

    pub fn with_method(mut self, method: Option<Method>) -> Self {
        if let Some(method) = method {
            self.method = method;
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose |= verbose;
        self
    }
}
