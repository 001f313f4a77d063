//! Render planning and orchestration.
//!
//! A generation run selects the working cluster set, builds the list of
//! (template, output path pattern) targets, and renders each target through
//! the template engine, writing every result through the storage
//! abstraction. Rendering is strictly sequential; the first failure aborts
//! the remaining plan and already-written files stay in place.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use matterswift_idl::{Cluster, Idl, binding_clusters, server_side_clusters};
use serde::Serialize;
use tera::{Context, Tera};
use tracing::{debug, info};

use crate::engine;
use crate::error::CodegenError;
use crate::options::{ClusterFilter, GeneratorOptions};
use crate::storage::GeneratorStorage;
use crate::swift::types::GLOBAL_TYPES;

/// One category of generated file: a template plus an output path pattern.
#[derive(Debug, Clone)]
pub struct GenerateTarget {
    /// Name of the template to render.
    pub template: &'static str,
    /// Output path pattern; `{cluster_name}` is substituted per cluster.
    pub output_name: String,
}

impl GenerateTarget {
    fn new(template: &'static str, output_name: String) -> Self {
        Self {
            template,
            output_name,
        }
    }

    fn resolve(&self, cluster_name: &str) -> PathBuf {
        PathBuf::from(self.output_name.replace("{cluster_name}", cluster_name))
    }
}

/// Values exposed to every template under the `swift` name.
#[derive(Serialize)]
struct SwiftGlobals<'a> {
    base_name: &'a str,
    generated_at: &'a str,
}

/// Swift code generator over a parsed IDL model.
pub struct SwiftGenerator {
    idl: Arc<Idl>,
    options: GeneratorOptions,
    engine: Tera,
    generated_at: String,
}

impl SwiftGenerator {
    /// Creates a generator, building the template engine for this run.
    ///
    /// # Errors
    /// Returns `CodegenError` when the template set fails to load.
    pub fn new(idl: Idl, options: GeneratorOptions) -> Result<Self, CodegenError> {
        let idl = Arc::new(idl);
        let engine = engine::build(idl.clone(), &options)?;
        Ok(Self {
            idl,
            options,
            engine,
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    /// Path pattern under the package sources directory.
    fn sources_name(&self, file_name: &str) -> String {
        self.options
            .output
            .join("Sources")
            .join(&self.options.name)
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    /// Path pattern directly under the output directory.
    fn output_name(&self, file_name: &str) -> String {
        self.options
            .output
            .join(file_name)
            .to_string_lossy()
            .into_owned()
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert(
            "swift",
            &SwiftGlobals {
                base_name: &self.options.name,
                generated_at: &self.generated_at,
            },
        );
        context
    }

    fn selected_clusters(&self) -> Result<Vec<&Cluster>, CodegenError> {
        Ok(match self.options.cluster_filter()? {
            ClusterFilter::All => self.idl.clusters.iter().collect(),
            ClusterFilter::ServerSide => server_side_clusters(&self.idl),
            ClusterFilter::Binding => binding_clusters(&self.idl),
        })
    }

    fn render_one(
        &self,
        storage: &mut dyn GeneratorStorage,
        template: &str,
        path: PathBuf,
        context: &Context,
    ) -> Result<(), CodegenError> {
        let text = self.engine.render(template, context)?;
        debug!(template, path = %path.display(), "rendered output file");
        storage.write(&path, &text)?;
        Ok(())
    }

    /// Renders the full generation plan into `storage`.
    ///
    /// # Errors
    /// Returns a configuration error for an invalid cluster filter, or the
    /// first rendering/storage failure.
    pub fn render_all(&self, storage: &mut dyn GeneratorStorage) -> Result<(), CodegenError> {
        let clusters = self.selected_clusters()?;

        let mut cluster_targets = vec![GenerateTarget::new(
            engine::CLUSTER_TEMPLATE,
            self.sources_name("{cluster_name}Cluster.swift"),
        )];
        if self.options.generate_views {
            cluster_targets.push(GenerateTarget::new(
                engine::CLUSTER_VIEW_TEMPLATE,
                self.sources_name("{cluster_name}ClusterView.swift"),
            ));
        }

        for cluster in &clusters {
            for target in &cluster_targets {
                let mut context = self.base_context();
                context.insert("cluster", cluster);
                context.insert("global_types", GLOBAL_TYPES);
                self.render_one(storage, target.template, target.resolve(&cluster.name), &context)?;
            }
        }

        let mut description_targets = vec![GenerateTarget::new(
            engine::DESCRIPTIONS_TEMPLATE,
            self.sources_name("Descriptions.swift"),
        )];
        if self.options.generate_views {
            description_targets.push(GenerateTarget::new(
                engine::CLIENT_ID_VIEW_TEMPLATE,
                self.sources_name("ClientIdView.swift"),
            ));
        }
        for target in &description_targets {
            let mut context = self.base_context();
            context.insert("clusters", &clusters);
            self.render_one(
                storage,
                target.template,
                PathBuf::from(&target.output_name),
                &context,
            )?;
        }

        let package_target = GenerateTarget::new(
            engine::PACKAGE_TEMPLATE,
            self.output_name("Package.swift"),
        );
        let mut context = self.base_context();
        context.insert("package_name", &self.options.name);
        context.insert("clusters", &clusters);
        self.render_one(
            storage,
            package_target.template,
            PathBuf::from(&package_target.output_name),
            &context,
        )?;

        info!(clusters = clusters.len(), "Swift generation complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use matterswift_idl::{Attribute, AttributeQuality, DataType, Endpoint, Field};
    use std::path::Path;

    fn model() -> Idl {
        let mut idl = Idl::new();

        let mut on_off = Cluster::new("OnOff", 0x0006);
        on_off.add_attribute(Attribute::new(
            Field::new("onOff", 0, DataType::new("boolean")),
            vec![AttributeQuality::Readable],
        ));
        idl.add_cluster(on_off);

        idl.add_cluster(Cluster::new("LevelControl", 0x0008));

        let mut endpoint = Endpoint::new(1);
        endpoint.server_clusters.push("OnOff".to_string());
        idl.endpoints.push(endpoint);
        idl
    }

    #[test]
    fn test_plan_without_views_renders_one_file_per_cluster_plus_two() {
        let generator =
            SwiftGenerator::new(model(), GeneratorOptions::new("/out")).expect("generator");
        let mut storage = MemoryStorage::new();

        generator.render_all(&mut storage).expect("renders");

        assert_eq!(storage.len(), 4); // 2 clusters + descriptions + manifest
        assert!(storage
            .get("/out/Sources/TriforkMatters/OnOffCluster.swift")
            .is_some());
        assert!(storage
            .get("/out/Sources/TriforkMatters/LevelControlCluster.swift")
            .is_some());
        assert!(storage
            .get("/out/Sources/TriforkMatters/Descriptions.swift")
            .is_some());
        assert!(storage.get("/out/Package.swift").is_some());
    }

    #[test]
    fn test_plan_with_views_adds_per_cluster_and_index_views() {
        let options = GeneratorOptions::new("/out").with_views();
        let generator = SwiftGenerator::new(model(), options).expect("generator");
        let mut storage = MemoryStorage::new();

        generator.render_all(&mut storage).expect("renders");

        assert_eq!(storage.len(), 7); // 2x2 clusters + descriptions + index view + manifest
        assert!(storage
            .get("/out/Sources/TriforkMatters/OnOffClusterView.swift")
            .is_some());
        assert!(storage
            .get("/out/Sources/TriforkMatters/ClientIdView.swift")
            .is_some());
    }

    #[test]
    fn test_manifest_sits_beside_the_sources_tree() {
        let generator =
            SwiftGenerator::new(model(), GeneratorOptions::new("/out")).expect("generator");
        let mut storage = MemoryStorage::new();

        generator.render_all(&mut storage).expect("renders");

        for path in storage.paths() {
            if path == Path::new("/out/Package.swift") {
                continue;
            }
            assert!(
                path.starts_with("/out/Sources/TriforkMatters"),
                "unexpected output location: {}",
                path.display()
            );
        }
    }

    #[test]
    fn test_server_side_filter_narrows_the_cluster_set() {
        let options = GeneratorOptions::new("/out").with_filter("server_side");
        let generator = SwiftGenerator::new(model(), options).expect("generator");
        let mut storage = MemoryStorage::new();

        generator.render_all(&mut storage).expect("renders");

        assert!(storage
            .get("/out/Sources/TriforkMatters/OnOffCluster.swift")
            .is_some());
        assert!(storage
            .get("/out/Sources/TriforkMatters/LevelControlCluster.swift")
            .is_none());
    }

    #[test]
    fn test_invalid_filter_aborts_before_any_write() {
        let options = GeneratorOptions::new("/out").with_filter("bogus");
        let generator = SwiftGenerator::new(model(), options).expect("generator");
        let mut storage = MemoryStorage::new();

        let err = generator.render_all(&mut storage).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidClusterFilter { .. }));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_custom_package_name_moves_the_sources_tree() {
        let options = GeneratorOptions::new("/out").with_name("DemoMatters");
        let generator = SwiftGenerator::new(model(), options).expect("generator");
        let mut storage = MemoryStorage::new();

        generator.render_all(&mut storage).expect("renders");

        assert!(storage
            .get("/out/Sources/DemoMatters/OnOffCluster.swift")
            .is_some());
        let manifest = storage.get("/out/Package.swift").expect("manifest");
        assert!(manifest.contains(r#"name: "DemoMatters""#));
    }

    #[test]
    fn test_target_placeholder_substitution() {
        let target = GenerateTarget::new(
            engine::CLUSTER_TEMPLATE,
            "/out/{cluster_name}Cluster.swift".to_string(),
        );
        assert_eq!(
            target.resolve("OnOff"),
            PathBuf::from("/out/OnOffCluster.swift")
        );
    }
}
