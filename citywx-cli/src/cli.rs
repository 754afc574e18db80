use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use citywx_core::{Config, MatchMode, Session, SourceLocation, source_from_location};
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Select, Text};

use crate::{live::LiveMatches, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citywx", version, about = "Look up city weather from a static catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the catalog once and print the matches.
    Search {
        /// City name, or part of it in substring mode.
        query: String,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Prompt for cities until Esc.
    Interactive {
        /// Re-run the search on every keystroke instead of on Enter.
        #[arg(long)]
        live: bool,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Print the whole catalog.
    List {
        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Set the default data source and match mode.
    Configure,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// File path or http(s) URL of the weather data; overrides the config file.
    #[arg(long)]
    source: Option<String>,

    /// Match mode: "substring" or "exact"; overrides the config file.
    #[arg(long)]
    mode: Option<MatchMode>,
}

impl LookupArgs {
    /// Build a session and perform its one load attempt.
    async fn open_session(&self, config: &Config) -> Session {
        let location = self
            .source
            .as_deref()
            .map(SourceLocation::parse)
            .unwrap_or_else(|| config.source_location());
        let mode = self.mode.unwrap_or_else(|| config.match_mode());

        tracing::debug!(%location, %mode, "opening session");

        let source = source_from_location(&location);
        let mut session = Session::new(mode);
        let report = session.load(source.as_ref()).await;
        if !report.is_ok() {
            println!("{}", render::load_report(report));
        }

        session
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // `configure` must work even when the current file doesn't parse.
        let config = match self.command {
            Command::Configure => Config::load_or_default(),
            _ => Config::load()?,
        };

        match self.command {
            Command::Search { query, lookup } => {
                let mut session = lookup.open_session(&config).await;
                print_block(&render::query_state(session.submit(&query)));
            }
            Command::Interactive { live, lookup } => {
                let session = lookup.open_session(&config).await;
                if live {
                    prompt_live(session)?;
                } else {
                    prompt_submit(session)?;
                }
            }
            Command::List { lookup } => {
                let session = lookup.open_session(&config).await;
                if let Some(report) = session.report().filter(|r| r.is_ok()) {
                    println!("{}\n", render::load_report(report));
                }
                for record in session.catalog() {
                    println!("{}\n", render::record_card(record));
                }
            }
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

/// Submit variant: the query runs when Enter is pressed.
fn prompt_submit(mut session: Session) -> Result<()> {
    loop {
        let prompt = Text::new("City:").with_help_message("Enter to search, Esc to quit");

        let Some(query) = read_query(prompt)? else {
            return Ok(());
        };

        print_block(&render::query_state(session.submit(&query)));
    }
}

/// Live variant: matching city names are listed under the input while typing.
fn prompt_live(session: Session) -> Result<()> {
    let session = Rc::new(RefCell::new(session));

    loop {
        let prompt = Text::new("City:")
            .with_help_message("matches update as you type, Esc to quit")
            .with_autocomplete(LiveMatches::new(Rc::clone(&session)));

        let Some(query) = read_query(prompt)? else {
            return Ok(());
        };

        print_block(&live_answer(&mut session.borrow_mut(), &query));
    }
}

/// Render the answer of a live prompt: typed text or an accepted city suggestion.
fn live_answer(session: &mut Session, answer: &str) -> String {
    render::query_state(session.query_changed(answer))
}

/// `None` when the user cancels the prompt.
fn read_query(prompt: Text<'_>) -> Result<Option<String>> {
    match prompt.prompt() {
        Ok(query) => Ok(Some(query)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn configure(mut config: Config) -> Result<()> {
    let current = config.source_location().to_string();
    let source = Text::new("Weather data source (file path or URL):")
        .with_default(&current)
        .prompt()?;

    let modes = MatchMode::all().to_vec();
    let start = modes
        .iter()
        .position(|mode| *mode == config.match_mode())
        .unwrap_or(0);
    let mode = Select::new("Default match mode:", modes)
        .with_starting_cursor(start)
        .prompt()?;

    config.set_source(source);
    config.set_mode(mode);
    let path = config.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn print_block(text: &str) {
    if !text.is_empty() {
        println!("{text}\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_overrides() {
        let cli = Cli::try_parse_from([
            "citywx",
            "search",
            "paris",
            "--mode",
            "exact",
            "--source",
            "https://example.org/weatherData.json",
        ])
        .unwrap();

        match cli.command {
            Command::Search { query, lookup } => {
                assert_eq!(query, "paris");
                assert_eq!(lookup.mode, Some(MatchMode::Exact));
                assert_eq!(
                    lookup.source.as_deref(),
                    Some("https://example.org/weatherData.json")
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Cli::try_parse_from(["citywx", "search", "paris", "--mode", "fuzzy"])
            .unwrap_err();
        assert!(err.to_string().contains("Unknown match mode"));
    }

    #[test]
    fn interactive_defaults_to_submit_variant() {
        let cli = Cli::try_parse_from(["citywx", "interactive"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Interactive { live: false, .. }
        ));

        let cli = Cli::try_parse_from(["citywx", "interactive", "--live"]).unwrap();
        assert!(matches!(cli.command, Command::Interactive { live: true, .. }));
    }

    #[test]
    fn accepted_live_suggestion_finds_its_city() {
        use inquire::autocompletion::Autocomplete;

        let catalog = citywx_core::WeatherCatalog::from_json(
            r#"{"weather_data": [
                { "city": "Porto", "country": "Portugal", "temperature": 17, "condition": "Windy", "icon": "💨" },
                { "city": "Lisbon", "country": "Portugal", "temperature": 18, "condition": "Sunny", "icon": "☀️" }
            ]}"#,
        )
        .unwrap()
        .catalog;
        let session = Rc::new(RefCell::new(Session::with_catalog(
            catalog,
            MatchMode::Substring,
        )));

        let mut live = LiveMatches::new(Rc::clone(&session));
        let suggestions = live.get_suggestions("por").unwrap();
        assert_eq!(suggestions, ["Porto"]);

        let output = live_answer(&mut session.borrow_mut(), &suggestions[0]);
        assert!(output.starts_with("Porto, Portugal"), "output: {output}");
        assert!(!output.contains("No city found"));
    }

    #[tokio::test]
    async fn open_session_reports_missing_source_without_failing() {
        let dir = std::env::temp_dir().join("citywx-cli-test-missing.json");
        let lookup = LookupArgs {
            source: Some(dir.display().to_string()),
            mode: None,
        };

        let mut session = lookup.open_session(&Config::default()).await;
        assert!(session.catalog().is_empty());
        assert_eq!(
            session.submit("paris").status,
            citywx_core::QueryStatus::NoMatch
        );
    }
}
