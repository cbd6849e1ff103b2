mod app;
mod bootstrap;
mod cli;
mod config;
mod runtime;
mod ui;

#[cfg(test)]
pub(crate) mod test_data;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use config::RapportConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rapport::ports::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = RapportConfig::config_path()?;
            if !path.exists() {
                RapportConfig::default().save()?;
            }
            println!("{}", path.display());
            Ok(())
        }
        Commands::Dev => {
            let client = rapport::dev::DevStore::new(today());
            launch(client).await
        }
        Commands::Run => {
            let config = RapportConfig::load()?;
            let session = RapportConfig::load_session()?.with_context(|| {
                format!(
                    "No saved session. Put your session id in {}",
                    RapportConfig::session_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the session file".to_string())
                )
            })?;
            let client = rapport::RapportClient::new(&config.api_url, &session)?;
            launch(client).await
        }
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn launch<B: Backend>(client: B) -> Result<()> {
    let mut app = App::new(today());
    bootstrap::initialize_app_state(&mut app, &client).await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}
