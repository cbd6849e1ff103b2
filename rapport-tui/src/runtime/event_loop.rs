use anyhow::Result;
use crossterm::event::{self, Event};
use rapport::ports::Backend;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::app::App;
use crate::ui;

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::keys::handle_view_key;

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &B,
) -> Result<()> {
    // Background polling: refresh the report every 60 seconds.
    let mut last_report_refresh = Instant::now();
    const REPORT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_view_key(key, app, &action_tx);
            }
        }

        if last_report_refresh.elapsed() >= REPORT_REFRESH_INTERVAL && !app.grid.editing {
            let _ = action_tx.send(Action::RefreshReportBackground);
            last_report_refresh = Instant::now();
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client).await?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
