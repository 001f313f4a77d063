//! Generator configuration.
//!
//! The host framework hands the plugin a flat key/value option map from the
//! command line. [`GeneratorOptions::from_map`] validates it; the cluster
//! filter value stays a raw string until the render plan resolves it, so an
//! invalid value surfaces together with the rest of the plan.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CodegenError;

/// Default base identifier for the generated package and namespace.
pub const DEFAULT_PACKAGE_NAME: &str = "TriforkMatters";

/// Which clusters of the model a generation run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterFilter {
    /// Every cluster in the model.
    #[default]
    All,
    /// Clusters instantiated server-side on an endpoint.
    ServerSide,
    /// Clusters referenced by client bindings.
    Binding,
}

impl FromStr for ClusterFilter {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "server_side" => Ok(Self::ServerSide),
            "binding" => Ok(Self::Binding),
            other => Err(CodegenError::InvalidClusterFilter {
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Base output directory.
    pub output: PathBuf,
    /// Base identifier for the generated package and namespace.
    pub name: String,
    /// Whether to also generate SwiftUI view files.
    pub generate_views: bool,
    /// Raw cluster filter value, resolved by the render plan.
    pub filter: String,
    /// Override directory for template lookup.
    pub templates: Option<PathBuf>,
}

impl GeneratorOptions {
    /// Creates options with defaults for everything but the output directory.
    #[must_use]
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            name: DEFAULT_PACKAGE_NAME.to_string(),
            generate_views: false,
            filter: "all".to_string(),
            templates: None,
        }
    }

    /// Builds options from the host's key/value option map.
    ///
    /// # Errors
    /// Returns [`CodegenError::MissingOption`] when `output` is absent.
    pub fn from_map(options: &HashMap<String, String>) -> Result<Self, CodegenError> {
        let output = options
            .get("output")
            .ok_or(CodegenError::MissingOption { option: "output" })?;

        Ok(Self {
            output: PathBuf::from(output),
            name: options
                .get("name")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string()),
            generate_views: options.contains_key("generate_views"),
            filter: options.get("filter").cloned().unwrap_or_else(|| "all".to_string()),
            templates: options.get("templates").map(PathBuf::from),
        })
    }

    /// Sets the package name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Enables SwiftUI view generation.
    #[must_use]
    pub fn with_views(mut self) -> Self {
        self.generate_views = true;
        self
    }

    /// Sets the cluster filter value.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the template override directory.
    #[must_use]
    pub fn with_templates(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates = Some(dir.into());
        self
    }

    /// Resolves the cluster filter value.
    ///
    /// # Errors
    /// Returns [`CodegenError::InvalidClusterFilter`] for values outside
    /// `all`, `server_side` and `binding`.
    pub fn cluster_filter(&self) -> Result<ClusterFilter, CodegenError> {
        self.filter.parse()
    }
}
