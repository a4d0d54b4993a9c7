use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use geofence_editor::api::Transport;
use geofence_editor::session::{Completion, Dispatcher};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::app::{handle_input, App};
use crate::ui;

/// Drains every completion that has arrived. The loop is the only writer of
/// the session, so replies are applied one at a time in arrival order.
fn drain_completions(app: &mut App, completions: &mut UnboundedReceiver<Completion>) {
    while let Ok(completion) = completions.try_recv() {
        debug!(seq = completion.token.seq, "completion received");
        app.apply(completion);
    }
}

fn flush_outbox<T: Transport>(app: &mut App, dispatcher: &Dispatcher<T>) {
    for ticket in app.take_outbox() {
        dispatcher.dispatch(ticket);
    }
}

/// Run the main application event loop
pub async fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher<T>,
    mut completions: UnboundedReceiver<Completion>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    info!(server = %app.server_url, "editor started");

    loop {
        app.update();
        drain_completions(app, &mut completions);

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {
                    // Mouse, focus and paste events are not used
                }
            }
        }

        flush_outbox(app, dispatcher);
        tokio::task::yield_now().await;
    }

    info!(pending = app.in_flight(), "editor closed");
    Ok(())
}
