//! Model selection command

use anyhow::{Context, Result};
use cc_core::ConfigStore;
use dialoguer::{Input, Select};

use crate::output;

/// Models offered in the menu, besides a custom name
const KNOWN_MODELS: [&str; 3] = ["haiku", "sonnet", "opus"];

const CUSTOM_LABEL: &str = "Custom...";

pub fn run() -> Result<()> {
    let store = ConfigStore::new().context("Failed to locate config directory")?;
    let mut config = super::load_config();

    output::kv("Current model", &config.model);

    let (items, current) = menu(&config.model);
    let Some(choice) = Select::new()
        .with_prompt("Select a model (Esc to keep current)")
        .items(&items)
        .default(current)
        .interact_opt()
        .context("Failed to read selection")?
    else {
        return Ok(());
    };

    let model = match KNOWN_MODELS.get(choice) {
        Some(model) => model.to_string(),
        None => {
            let custom: String = Input::new()
                .with_prompt("Enter custom model name")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read model name")?;

            let custom = custom.trim();
            if custom.is_empty() {
                output::error("Model name cannot be empty");
                return Ok(());
            }
            custom.to_string()
        }
    };

    config.model = model;
    store.save(&config).context("Failed to save config")?;
    output::success(&format!("Model set to: {}", config.model));

    Ok(())
}

/// Menu entries with the current model marked, and the index to preselect
fn menu(current: &str) -> (Vec<String>, usize) {
    let selected = KNOWN_MODELS
        .iter()
        .position(|m| *m == current)
        .unwrap_or(KNOWN_MODELS.len());

    let items = KNOWN_MODELS
        .iter()
        .copied()
        .chain(std::iter::once(CUSTOM_LABEL))
        .enumerate()
        .map(|(i, label)| {
            if i == selected {
                format!("{} (current)", label)
            } else {
                label.to_string()
            }
        })
        .collect();

    (items, selected)
}
