//! `confab config` command: show the effective configuration.
//!
//! The credential is never printed, only whether one was found.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use confab_infra::secret::OVERRIDE_VAR;

use crate::state::AppState;

/// Print the configuration as a table, or as JSON with `--json`.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    let has_credential = state.has_credential();

    if json {
        println!("{}", serde_json::to_string_pretty(&config_json(state, has_credential))?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Confab").cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", config_table(state, has_credential));
    println!();
    if !has_credential {
        println!(
            "  {} Set {} (or {}) before chatting.",
            style("!").yellow().bold(),
            style(&state.config.api_key_env).cyan(),
            style(OVERRIDE_VAR).cyan(),
        );
        println!();
    }
    Ok(())
}

fn config_json(state: &AppState, has_credential: bool) -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "config_file": source_label(state),
        "config": state.config,
        "credential": if has_credential { "found" } else { "missing" },
    })
}

fn source_label(state: &AppState) -> String {
    match &state.config_path {
        Some(path) => path.display().to_string(),
        None => state.data_dir.join("config.toml").display().to_string(),
    }
}

fn config_table(state: &AppState, has_credential: bool) -> Table {
    let config = &state.config;
    let timeout = config
        .timeout_secs
        .map(|s| format!("{s}s"))
        .unwrap_or_else(|| "none".to_string());
    let credential = if has_credential {
        Cell::new("found").fg(Color::Green)
    } else {
        Cell::new("missing").fg(Color::Red)
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let rows = [
        ("config file", source_label(state)),
        ("endpoint", config.endpoint.clone()),
        ("model", config.model.clone()),
        ("api_key_env", config.api_key_env.clone()),
        ("timeout", timeout),
        ("bot_name", config.bot_name.clone()),
        ("title", config.title.clone()),
    ];
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).fg(Color::Cyan), Cell::new(value)]);
    }
    table.add_row(vec![Cell::new("credential").fg(Color::Cyan), credential]);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use confab_types::config::ChatConfig;

    fn state() -> AppState {
        AppState {
            config: ChatConfig::default(),
            data_dir: PathBuf::from("/home/test/.confab"),
            config_path: None,
        }
    }

    #[test]
    fn test_json_reports_credential_presence_only() {
        let value = config_json(&state(), false);
        assert_eq!(value["credential"], "missing");
        assert_eq!(value["config"]["model"], "openai/gpt-3.5-turbo");
        assert_eq!(value["config_file"], "/home/test/.confab/config.toml");
        assert!(value["config"].get("timeout_secs").is_none());
    }

    #[test]
    fn test_table_lists_settings() {
        let rendered = console::strip_ansi_codes(&config_table(&state(), true).to_string()).to_string();
        assert!(rendered.contains("OPENROUTER_API_KEY"));
        assert!(rendered.contains("found"));
        assert!(rendered.contains("none"));
    }
}
