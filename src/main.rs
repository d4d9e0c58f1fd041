//! Terminal demo of the autocomplete field.
//!
//! ```text
//! mapcomplete [config=<file.toml>] [key=value ...]
//! ```
//!
//! Every stdin line that is not a command replaces the field's text, exactly
//! as if the user had typed it. The dropdown is redrawn to stdout after every
//! visible change; delegate notifications go to stderr.
//!
//! # Commands
//!
//! - `:focus`: the field gains focus
//! - `:select N`: pick dropdown row `N`
//! - `:quit`: exit
//!
//! # Event Mapping
//!
//! - plain line → `on_text_changed`
//! - `:focus` → `on_editing_began`
//! - `:select N` → `on_row_selected(N)`
//! - search finished → `apply_completion`
//!
//! Everything runs on one current-thread runtime. Searches are futures owned
//! by the controller and polled from the same `select!` loop that reads stdin.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

use mapcomplete::observability::init_tracing;
use mapcomplete::ui::{Rect, TerminalListFactory, TextInput};
use mapcomplete::{
    build_gateway, format_locality_line, format_street_line, AutocompleteController,
    AutocompleteDelegate, Config, PlaceHandle, SearchError,
};

/// Width of the field and the dropdown in terminal columns.
const FIELD_COLUMNS: f32 = 60.0;

/// The text field, as far as the terminal is concerned.
struct LineField {
    text: String,
}

impl TextInput for LineField {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn frame(&self) -> Rect {
        Rect::new(0.0, 0.0, FIELD_COLUMNS, 1.0)
    }
}

/// Reports delegate callbacks on stderr.
struct StderrDelegate;

impl AutocompleteDelegate for StderrDelegate {
    fn did_select_location_from_table(&mut self, place: &PlaceHandle) {
        let name = place.name.as_deref().unwrap_or("(unnamed)");
        eprintln!(
            "selected: {name} | {}{}",
            format_street_line(&place.placemark),
            format_locality_line(&place.placemark)
        );
        if let Some(coordinate) = &place.coordinate {
            eprintln!("  at {:.5}, {:.5}", coordinate.latitude, coordinate.longitude);
        }
    }

    fn search_did_return_error(&mut self, error: &SearchError) {
        eprintln!("search failed: {error}");
    }
}

enum Command {
    Text(String),
    Focus,
    Select(usize),
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => Ok(Command::Quit),
        ":focus" => Ok(Command::Focus),
        _ => {
            if let Some(index) = trimmed.strip_prefix(":select") {
                return index
                    .trim()
                    .parse()
                    .map(Command::Select)
                    .map_err(|_| format!("not a row number: {}", index.trim()));
            }
            if trimmed.starts_with(':') {
                return Err(format!("unknown command: {trimmed}"));
            }
            Ok(Command::Text(line.to_string()))
        }
    }
}

fn load_config(args: impl Iterator<Item = String>) -> mapcomplete::Result<Config> {
    let mut overrides = BTreeMap::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) => {
                overrides.insert(key.trim().to_string(), value.to_string());
            }
            None => {
                return Err(mapcomplete::MapCompleteError::Config(format!(
                    "expected key=value, got {arg}"
                )))
            }
        }
    }

    let base = match overrides.remove("config") {
        Some(path) => Config::from_file(mapcomplete::infrastructure::expand_tilde(&path))?,
        None => Config::default(),
    };
    Ok(base.with_overrides(&overrides))
}

fn render(controller: &AutocompleteController<LineField, TerminalListFactory>) {
    println!("> {}", controller.input().text());
    if let Some(dropdown) = controller.dropdown() {
        println!("{}", dropdown.view().render());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match load_config(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mapcomplete: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);
    tracing::debug!(provider_url = %config.provider_url, fixture_file = ?config.fixture_file, "demo starting");

    let gateway = match build_gateway(&config) {
        Ok(gateway) => gateway,
        Err(e) => {
            eprintln!("mapcomplete: {e}");
            return ExitCode::FAILURE;
        }
    };

    let factory = TerminalListFactory::new(config.theme(), config.row_height);
    let field = LineField {
        text: String::new(),
    };
    let mut controller = AutocompleteController::new(&config, field, factory, gateway)
        .with_delegate(Box::new(StderrDelegate));

    eprintln!(
        "type more than {} characters to search; :focus, :select N, :quit",
        config.minimum_input_length_for_search
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let should_render = tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("mapcomplete: {e}");
                        return ExitCode::FAILURE;
                    }
                };

                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Focus) => controller.on_editing_began(),
                    Ok(Command::Select(index)) => {
                        let changed = controller.on_row_selected(index);
                        if !changed {
                            eprintln!("no row {index}");
                        }
                        changed
                    }
                    Ok(Command::Text(text)) => {
                        controller.input_mut().set_text(&text);
                        controller.on_text_changed(&text);
                        true
                    }
                    Err(message) => {
                        eprintln!("{message}");
                        false
                    }
                }
            }
            Some(completion) = controller.next_completion(), if controller.has_pending_searches() => {
                controller.apply_completion(completion)
            }
        };

        if should_render {
            render(&controller);
        }
    }

    tracing::debug!(in_flight = controller.in_flight_count(), "demo exiting");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse() {
        assert!(matches!(parse_command(":quit"), Ok(Command::Quit)));
        assert!(matches!(parse_command(" :focus "), Ok(Command::Focus)));
        assert!(matches!(parse_command(":select 2"), Ok(Command::Select(2))));
        assert!(parse_command(":select two").is_err());
        assert!(parse_command(":frobnicate").is_err());
        assert!(matches!(parse_command("123 Main"), Ok(Command::Text(t)) if t == "123 Main"));
    }

    #[test]
    fn arguments_become_overrides() {
        let args = ["minimum_input_length_for_search=2", "theme=catppuccin-latte"]
            .into_iter()
            .map(String::from);
        let config = load_config(args).unwrap();
        assert_eq!(config.minimum_input_length_for_search, 2);
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));

        assert!(load_config(std::iter::once("bare".to_string())).is_err());
    }
}
