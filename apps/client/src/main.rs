mod api;
mod app;
mod config;
mod render;
mod state;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::ApiClient;
use crate::app::App;
use crate::config::Config;
use crate::render::{render, render_history};
use crate::state::ClientState;

const HELP: &str = "\
Type a matchup question and press Enter to analyze it.
  :list       show recent matchups
  :open N     show matchup N from the list
  :refresh    reload recent matchups
  :help       show this help
  :quit       exit
";

#[derive(Debug, PartialEq)]
enum Command {
    Submit(String),
    List,
    Open(usize),
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Some(Command::Submit(line.to_string()));
    };
    let mut parts = rest.split_whitespace();
    let command = match (parts.next(), parts.next()) {
        (Some("list"), None) => Command::List,
        (Some("open"), Some(n)) => match n.parse() {
            Ok(n) => Command::Open(n),
            Err(_) => Command::Unknown(line.to_string()),
        },
        (Some("refresh"), None) => Command::Refresh,
        (Some("help"), None) => Command::Help,
        (Some("quit" | "q"), None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

/// Why the current input cannot be submitted, if it cannot.
fn submit_rejection(state: &ClientState) -> Option<&'static str> {
    if state.can_submit() {
        None
    } else if state.in_flight {
        Some("A matchup is already running.")
    } else {
        Some("Questions need at least 3 characters.")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    println!("MatchUp AI ({})", config.api_url);
    print!("{HELP}");

    let mut app = App::new(ApiClient::new(&config.api_url), config.history_limit);
    app.load_history().await;
    println!("\n{}", render_history(&app.state));
    println!("{}", render(&app.state));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        match command {
            Command::Submit(question) => {
                app.state.input = question;
                if let Some(reason) = submit_rejection(&app.state) {
                    println!("{reason}");
                    continue;
                }
                println!("Running...");
                app.submit().await;
                println!("{}", render(&app.state));
            }
            Command::List => println!("{}", render_history(&app.state)),
            Command::Open(n) => {
                app.open(n).await;
                println!("{}", render(&app.state));
            }
            Command::Refresh => {
                app.load_history().await;
                println!("{}", render_history(&app.state));
            }
            Command::Help => print!("{HELP}"),
            Command::Quit => break,
            Command::Unknown(raw) => println!("Unknown command: {raw} (try :help)"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(
            parse_command(" SGA vs Luka "),
            Some(Command::Submit("SGA vs Luka".into()))
        );
        assert_eq!(parse_command(":list"), Some(Command::List));
        assert_eq!(parse_command(":open 3"), Some(Command::Open(3)));
        assert_eq!(parse_command(":q"), Some(Command::Quit));
        assert_eq!(
            parse_command(":open x"),
            Some(Command::Unknown(":open x".into()))
        );
        assert_eq!(
            parse_command(":dance"),
            Some(Command::Unknown(":dance".into()))
        );
    }

    #[test]
    fn test_short_input_is_rejected_before_running() {
        let mut state = ClientState {
            input: "ab".into(),
            ..ClientState::default()
        };
        assert_eq!(
            submit_rejection(&state),
            Some("Questions need at least 3 characters.")
        );

        state.input = "SGA vs Luka".into();
        assert_eq!(submit_rejection(&state), None);

        state.in_flight = true;
        assert_eq!(
            submit_rejection(&state),
            Some("A matchup is already running.")
        );
    }
}
