//! Staged generation pipeline
//!
//! Config -> Connect -> ListTypes -> Pick -> Describe -> BuildTable -> Render -> Persist
//!
//! Each stage consumes the previous stage's output. The first failure ends the
//! run (tagged with the stage it came from); a cancelled pick ends it cleanly
//! before any further capability is touched.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codegen::{
    class_file_path, metadata_file_path, render_class, CodeGenerator, RenderedClass,
};
use crate::config::{CodegenConfig, ForceConfig};
use crate::error::Result;
use crate::parser::ObjectTypeSummary;
use crate::provider::{ArtifactSink, Picker, SchemaProvider, SchemaSession};

/// Named pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Config,
    Connect,
    ListTypes,
    Pick,
    Describe,
    BuildTable,
    Render,
    Persist,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Config,
        Stage::Connect,
        Stage::ListTypes,
        Stage::Pick,
        Stage::Describe,
        Stage::BuildTable,
        Stage::Render,
        Stage::Persist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Connect => "connect",
            Stage::ListTypes => "list types",
            Stage::Pick => "pick",
            Stage::Describe => "describe",
            Stage::BuildTable => "build table",
            Stage::Render => "render",
            Stage::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Files produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub object_type: String,
    pub class_name: String,
    pub class_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(GeneratedArtifacts),
    /// The user dismissed the picker; nothing was written
    Cancelled,
}

/// Run one stage, logging entry and tagging any failure with the stage
fn stage<T>(stage: Stage, run: impl FnOnce() -> Result<T>) -> Result<T> {
    debug!("Stage: {}", stage);
    run().map_err(|e| e.at(stage))
}

/// Names of the object types that may be offered, sorted ascending
pub fn offerable_object_types(objects: &[ObjectTypeSummary]) -> Vec<String> {
    let mut names: Vec<String> = objects
        .iter()
        .filter(|o| o.is_modifiable())
        .map(|o| o.name.clone())
        .collect();
    names.sort();
    names
}

/// Load the connection settings for a run
pub fn load_force_config(config: &CodegenConfig) -> Result<ForceConfig> {
    stage(Stage::Config, || {
        ForceConfig::load(config.force_config.as_deref(), &config.project_dir)
    })
}

/// Run the whole chain for one generation request
pub fn run_pipeline<P>(
    config: &CodegenConfig,
    provider: &P,
    picker: &dyn Picker,
    sink: &dyn ArtifactSink,
) -> Result<Outcome>
where
    P: SchemaProvider,
{
    let force = load_force_config(config)?;
    let session = stage(Stage::Connect, || provider.connect(&force))?;

    let candidates = stage(Stage::ListTypes, || {
        let objects = session.list_object_types()?;
        let names = offerable_object_types(&objects);
        info!(
            "{} of {} object types can be generated",
            names.len(),
            objects.len()
        );
        Ok(names)
    })?;

    let selected = match stage(Stage::Pick, || picker.pick_one(&candidates))? {
        Some(name) => name,
        None => {
            info!("Generation cancelled at object selection");
            return Ok(Outcome::Cancelled);
        }
    };

    let describe = stage(Stage::Describe, || session.describe(&selected))?;
    let spec = stage(Stage::BuildTable, || {
        Ok(CodeGenerator::new(&force.api_version).build_spec(&describe))
    })?;
    let rendered = stage(Stage::Render, || Ok(render_class(&spec)))?;
    let artifacts = stage(Stage::Persist, || {
        persist(&config.project_dir, &selected, &rendered, sink)
    })?;

    info!(
        "Generated {} from {} ({} properties)",
        artifacts.class_name,
        artifacts.object_type,
        spec.fields.len()
    );
    Ok(Outcome::Generated(artifacts))
}

/// Write the class and its metadata document, then open the class
pub fn persist(
    project_dir: &Path,
    object_type: &str,
    rendered: &RenderedClass,
    sink: &dyn ArtifactSink,
) -> Result<GeneratedArtifacts> {
    let class_path = class_file_path(project_dir, &rendered.class_name);
    let metadata_path = metadata_file_path(&class_path);

    sink.write_text(&class_path, &rendered.class_body)?;
    sink.write_text(&metadata_path, &rendered.metadata_document)?;
    sink.open_for_display(&class_path)?;

    Ok(GeneratedArtifacts {
        object_type: object_type.to_string(),
        class_name: rendered.class_name.clone(),
        class_path,
        metadata_path,
    })
}
