use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use visitor_counter::{
    Config,
    cli::{self, Cli, Commands, ConfigCommands},
    config::WidgetConfig,
    core::{DisplayMode, RequestAction},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let Cli {
        endpoint, command, ..
    } = cli;

    // No subcommand = launch TUI
    let command = command.unwrap_or(Commands::Tui);

    match command {
        Commands::Get { json } => {
            let config = widget_config(endpoint)?;
            print_once(&config, RequestAction::Get, json).await
        }

        Commands::Update { json } => {
            let config = widget_config(endpoint)?;
            print_once(&config, RequestAction::Update, json).await
        }

        Commands::Tui => {
            let config = widget_config(endpoint)?;
            visitor_counter::tui::run(&config).await?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Config { command } => {
            match command {
                ConfigCommands::Show => {
                    let mut config = Config::load()?;
                    if let Some(endpoint) = endpoint {
                        config.widget.endpoint = endpoint;
                    }
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigCommands::Path => {
                    let path = Config::config_path()?;
                    println!("{}", path.display());
                }
                ConfigCommands::SetEndpoint { url } => {
                    // Reject URLs the widget could not bind to
                    visitor_counter::core::CounterClient::new(&url)?;
                    Config::save_endpoint(&url)?;
                    println!("Endpoint saved to {}", Config::config_path()?.display());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the widget config, applying the `--endpoint` override.
fn widget_config(endpoint: Option<String>) -> anyhow::Result<WidgetConfig> {
    let mut config = Config::load()?.widget;
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    Ok(config)
}

async fn print_once(
    config: &WidgetConfig,
    action: RequestAction,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let widget = cli::fetch_once(config, action).await?;
    let state = widget.state();

    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else {
        println!("{}", widget.surface().text(&config.status_region));
        println!("{}", widget.surface().text(&config.message_region));
    }

    if state.mode == DisplayMode::Error {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
