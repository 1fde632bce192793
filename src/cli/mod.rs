//! CLI command parsing and execution.

use clap::{Parser, Subcommand};

use crate::config::WidgetConfig;
use crate::core::{CounterWidget, MemorySurface, RequestAction};

/// Visitor counter - fetch and display the current visitor count.
#[derive(Parser)]
#[command(name = "counter")]
#[command(about = "Fetch and display the current visitor count")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Counting endpoint (overrides the config file).
    #[arg(short, long, env = "COUNTER_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the current count once and print it.
    #[command(visible_alias = "g")]
    Get {
        /// Print the display state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Register a visit and print the new count.
    #[command(visible_alias = "u")]
    Update {
        /// Print the display state as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the TUI interface.
    Tui,

    /// Manage configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Save the counting endpoint to the configuration file.
    SetEndpoint {
        /// Endpoint URL.
        url: String,
    },
}

/// Bind a widget to an in-memory surface and run one request to completion.
///
/// # Errors
///
/// Returns an error only if the widget cannot be bound. Request failures are
/// reported through the widget's display state.
pub async fn fetch_once(
    config: &WidgetConfig,
    action: RequestAction,
) -> crate::core::Result<CounterWidget<MemorySurface>> {
    let surface =
        MemorySurface::with_regions([config.status_region.as_str(), config.message_region.as_str()]);
    let mut widget = CounterWidget::new(
        &config.endpoint,
        config.status_region.as_str(),
        config.message_region.as_str(),
        surface,
    )?;

    match action {
        RequestAction::Get => widget.refresh().await,
        RequestAction::Update => widget.update().await,
    };

    Ok(widget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_no_args() {
        let cli = Cli::parse_from(["counter"]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::parse_from(["counter", "-v"]);
        assert_eq!(cli.verbose, 1);

        let cli = Cli::parse_from(["counter", "-vvv"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn cli_parses_get_command() {
        let cli = Cli::parse_from(["counter", "get"]);
        assert!(matches!(cli.command, Some(Commands::Get { json: false })));

        let cli = Cli::parse_from(["counter", "g", "--json"]);
        assert!(matches!(cli.command, Some(Commands::Get { json: true })));
    }

    #[test]
    fn cli_parses_update_command() {
        let cli = Cli::parse_from(["counter", "update"]);
        assert!(matches!(cli.command, Some(Commands::Update { json: false })));
    }

    #[test]
    fn cli_parses_endpoint_anywhere() {
        let cli = Cli::parse_from(["counter", "-e", "http://localhost/count", "get"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/count"));

        let cli = Cli::parse_from(["counter", "get", "--endpoint", "http://localhost/count"]);
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost/count"));
    }

    #[test]
    fn cli_parses_tui_command() {
        let cli = Cli::parse_from(["counter", "tui"]);
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }

    #[test]
    fn cli_parses_config_show() {
        let cli = Cli::parse_from(["counter", "config", "show"]);
        match cli.command {
            Some(Commands::Config { command }) => {
                assert!(matches!(command, ConfigCommands::Show));
            }
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_parses_config_set_endpoint() {
        let cli = Cli::parse_from(["counter", "config", "set-endpoint", "http://x/count"]);
        match cli.command {
            Some(Commands::Config {
                command: ConfigCommands::SetEndpoint { url },
            }) => assert_eq!(url, "http://x/count"),
            _ => panic!("expected SetEndpoint command"),
        }
    }

    #[test]
    fn cli_verbose_is_global() {
        let cli = Cli::parse_from(["counter", "tui", "-v"]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }
}
