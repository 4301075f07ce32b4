//! Main event loop and backend event processing

use anyhow::Result;
use crossterm::event;
use std::time::Duration;
use tokio::sync::mpsc::error::TryRecvError;

use crate::backend::BackendEvent;
use crate::constants::{POLL_BUSY_MS, POLL_IDLE_MS};
use crate::input::{InputResult, handle_input};

use super::App;
use super::render_thread::RenderThread;
use super::state::Msg;

impl App {
    pub(crate) async fn event_loop(&mut self, render_thread: &RenderThread) -> Result<()> {
        loop {
            // Process backend completions FIRST (non-blocking)
            self.process_backend_events().await?;

            // Keep the spinner moving while something is outstanding
            if self.state.is_busy() {
                self.dirty = true;
            }

            // Render only when dirty; a skipped frame stays dirty for the next turn
            if self.dirty && render_thread.render(self.state.clone()) {
                self.dirty = false;
            }

            // Handle input (adaptive timeout: faster while requests are outstanding)
            let poll_timeout = if self.state.is_busy() {
                POLL_BUSY_MS
            } else {
                POLL_IDLE_MS
            };
            if event::poll(Duration::from_millis(poll_timeout))? {
                let evt = event::read()?;
                match handle_input(evt, &self.state, &self.bindings) {
                    InputResult::Quit => break,
                    InputResult::Action(action) => self.handle_action(action).await,
                    InputResult::Redraw => self.dirty = true,
                    InputResult::Continue => {}
                }
            }
        }

        Ok(())
    }

    /// Drain completed backend calls into the reducer.
    async fn process_backend_events(&mut self) -> Result<()> {
        let mut messages = Vec::new();
        let mut disconnected = false;

        loop {
            match self.backend.event_rx.try_recv() {
                Ok(event) => messages.push(event_message(event)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for msg in messages {
            self.dispatch(msg).await;
        }

        if disconnected {
            anyhow::bail!("Backend actor stopped unexpectedly");
        }
        Ok(())
    }
}

fn event_message(event: BackendEvent) -> Msg {
    match event {
        BackendEvent::EmailsLoaded(emails) => Msg::Loaded(emails),
        BackendEvent::EmailsFailed(error) => {
            tracing::warn!("Email list unavailable: {}", error);
            Msg::LoadFailed
        }
        BackendEvent::ActionSucceeded { ticket, text } => Msg::ActionSucceeded { ticket, text },
        BackendEvent::ActionFailed { ticket, error } => {
            tracing::warn!(kind = %ticket.kind, id = %ticket.email_id, "Action dropped: {}", error);
            Msg::ActionFailed { ticket }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ActionKind, ActionTicket, EmailId};

    #[test]
    fn test_events_map_to_messages() {
        let ticket = ActionTicket::new(ActionKind::Classify, EmailId::from(1));

        assert!(matches!(
            event_message(BackendEvent::EmailsFailed("refused".into())),
            Msg::LoadFailed
        ));
        assert!(matches!(
            event_message(BackendEvent::ActionFailed {
                ticket: ticket.clone(),
                error: "500".into(),
            }),
            Msg::ActionFailed { ticket: t } if t == ticket
        ));
        assert!(matches!(
            event_message(BackendEvent::ActionSucceeded {
                ticket: ticket.clone(),
                text: Some("Urgent".into()),
            }),
            Msg::ActionSucceeded { text: Some(ref t), .. } if t == "Urgent"
        ));
    }
}
