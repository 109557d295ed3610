mod app;
mod handler;
mod logging;
mod tui;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloudops_core::{AdviceCoordinator, Config, Inventory};

use app::App;
use logging::LogDestination;
use tui::EventHandler;

#[derive(Parser)]
#[command(name = "cloudops")]
#[command(about = "Cloud operations dashboard with a mentor AI for incident troubleshooting")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the mentor AI about one issue and print the advice
    Ask {
        /// Error message or question
        issue: String,
    },
    /// Manage stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store the Gemini API key in the config file
    SetKey {
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = logging::level_for(cli.verbose);

    match cli.command {
        None => {
            logging::initialize(LogDestination::File, level);
            run_dashboard().await
        }
        Some(Commands::Ask { issue }) => {
            logging::initialize(LogDestination::Terminal, level);
            let coordinator = coordinator_from_config()?;
            println!("{}", coordinator.request_advice(&issue).await);
            Ok(())
        }
        Some(Commands::Config { action: ConfigAction::SetKey { key } }) => {
            logging::initialize(LogDestination::Terminal, level);
            Config::save_api_key(&key)?;
            println!("API key saved to {}", Config::get_config_path()?.display());
            Ok(())
        }
    }
}

fn coordinator_from_config() -> Result<AdviceCoordinator> {
    let config = Config::load()?;
    Ok(AdviceCoordinator::gemini(&config.resolve_api_key(), config.endpoint()))
}

async fn run_dashboard() -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("ignoring unreadable config: {}", e);
        Config::new()
    });
    let coordinator = AdviceCoordinator::gemini(&config.resolve_api_key(), config.endpoint());
    log::info!(
        "starting dashboard (provider {}, key {})",
        coordinator.provider_name(),
        config.key_source().unwrap_or("missing")
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(Inventory::mock(), coordinator, events.sender(), config.key_source());

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;

            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    log::info!("dashboard closed");
    result
}
