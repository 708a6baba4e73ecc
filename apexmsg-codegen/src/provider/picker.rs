//! Object type pickers

use tracing::debug;

use super::Picker;
use crate::error::{CodegenError, Result};

/// Placeholder shown above the interactive list
pub const PICK_PROMPT: &str = "Select an sObject or ESC to cancel.";

/// Non-interactive picker returning a preselected object type
#[derive(Debug, Clone)]
pub struct FixedPicker {
    selection: Option<String>,
}

impl FixedPicker {
    /// Always pick `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            selection: Some(name.into()),
        }
    }

    /// Always cancel
    pub fn cancel() -> Self {
        Self { selection: None }
    }
}

impl Picker for FixedPicker {
    fn pick_one(&self, candidates: &[String]) -> Result<Option<String>> {
        match &self.selection {
            None => Ok(None),
            Some(name) if candidates.iter().any(|c| c == name) => {
                debug!("Preselected object type {}", name);
                Ok(Some(name.clone()))
            }
            Some(name) => Err(CodegenError::UnknownObjectType(format!(
                "{} is not one of the {} modifiable object types",
                name,
                candidates.len()
            ))),
        }
    }
}

/// Terminal picker built on `dialoguer`
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractivePicker;

#[cfg(feature = "cli")]
impl Picker for InteractivePicker {
    fn pick_one(&self, candidates: &[String]) -> Result<Option<String>> {
        use dialoguer::{theme::ColorfulTheme, Select};

        if candidates.is_empty() {
            return Ok(None);
        }

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(PICK_PROMPT)
            .items(candidates)
            .default(0)
            .max_length(20)
            .interact_opt()?;

        Ok(selection.map(|index| candidates[index].clone()))
    }
}
