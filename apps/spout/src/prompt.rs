//! Interactive distribution choice

use crate::display::OutputRenderer;
use dialoguer::{theme::ColorfulTheme, Input};
use spout_dist::Catalog;
use spout_errors::Error;
use spout_ops::DistChooser;

/// Shows the remaining candidates and asks for a number
///
/// Non-numeric input and numbers outside the listing are re-prompted.
pub struct PromptChooser {
    renderer: OutputRenderer,
}

impl PromptChooser {
    pub fn new(renderer: OutputRenderer) -> Self {
        Self { renderer }
    }
}

impl DistChooser for PromptChooser {
    fn choose(&self, release: &str, catalog: &Catalog, offered: &[usize]) -> Result<usize, Error> {
        let entries: Vec<_> = offered
            .iter()
            .filter_map(|index| catalog.get(*index).cloned())
            .collect();
        self.renderer
            .render_distributions(release, &entries)
            .map_err(|e| Error::internal(format!("Failed to show distributions: {e}")))?;

        let valid = offered
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        Input::<usize>::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a distribution to download")
            .validate_with(|choice: &usize| {
                if offered.contains(choice) {
                    Ok(())
                } else {
                    Err(format!("Expected one of {valid}"))
                }
            })
            .interact_text()
            .map_err(|e| Error::internal(format!("Failed to read selection: {e}")))
    }
}
