//! File system sink for generated artifacts

use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info, warn};

use super::ArtifactSink;
use crate::error::Result;

/// Writes artifacts to disk and optionally opens them in the user's editor
#[derive(Debug, Clone, Default)]
pub struct FsSink {
    open_in_editor: bool,
    dry_run: bool,
}

impl FsSink {
    pub fn new(open_in_editor: bool, dry_run: bool) -> Self {
        Self {
            open_in_editor,
            dry_run,
        }
    }
}

impl ArtifactSink for FsSink {
    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        if self.dry_run {
            println!(
                "  Would write: {} ({} bytes)",
                path.display(),
                content.len()
            );
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    fn open_for_display(&self, path: &Path) -> Result<()> {
        if self.dry_run || !self.open_in_editor {
            info!("Generated {}", path.display());
            return Ok(());
        }

        match editor_command() {
            Some((program, args)) => {
                // Best effort: a broken editor setup must not fail generation
                match Command::new(&program).args(&args).arg(path).status() {
                    Ok(status) if status.success() => {}
                    Ok(status) => warn!("Editor {} exited with {}", program, status),
                    Err(e) => warn!("Could not start editor {}: {}", program, e),
                }
            }
            None => info!(
                "Generated {} (set $VISUAL or $EDITOR to open it automatically)",
                path.display()
            ),
        }
        Ok(())
    }
}

/// `$VISUAL` or `$EDITOR`, split into program and leading arguments
fn editor_command() -> Option<(String, Vec<String>)> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| split_command(&value))
}

fn split_command(value: &str) -> Option<(String, Vec<String>)> {
    let mut parts = value.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}
