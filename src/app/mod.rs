//! Application core - owns state and coordinates input, backend and rendering

mod actions;
mod event_loop;
pub mod render_thread;
pub mod state;

use anyhow::Result;
use std::collections::VecDeque;

use render_thread::RenderThread;

use crate::backend::{BackendClient, BackendCommand, BackendHandle, spawn_backend_actor};
use crate::config::Config;
use crate::input::KeyBindings;
use crate::ui::RenderContext;
use state::{AppState, Effect, Msg, update};

pub struct App {
    pub(crate) config: Config,
    pub(crate) state: AppState,
    pub(crate) bindings: KeyBindings,
    pub(crate) backend: BackendHandle,
    /// Base URL shown in the status bar
    pub(crate) backend_url: String,
    /// Dirty flag: when true, UI needs re-render. Skips renders when nothing changed.
    pub(crate) dirty: bool,
}

impl App {
    /// Build the app and start the backend actor. Must run inside a tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let client = BackendClient::new(&config.backend)?;
        let backend_url = client.base_url().to_string();
        tracing::info!("Using backend at {}", backend_url);

        let backend = spawn_backend_actor(client);
        let bindings = KeyBindings::new(&config.ui.keybinding_mode);
        let state = AppState::new(config.ui.stale_results);

        Ok(Self {
            config,
            state,
            bindings,
            backend,
            backend_url,
            dirty: true, // Start dirty for initial render
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let context = RenderContext::new(
            self.backend_url.clone(),
            self.config.ui.clamped_split_ratio(),
            &self.bindings,
        );

        // Spawn background render thread (owns terminal setup/teardown)
        let render_thread = RenderThread::spawn(context)?;

        // Initial fetch, the equivalent of a page load
        self.dispatch(Msg::LoadEmails).await;

        let result = self.event_loop(&render_thread).await;

        // Shutdown render thread (handles terminal cleanup)
        render_thread.shutdown();

        // Outstanding requests are abandoned
        self.backend.shutdown();

        result
    }

    /// Feed a message through the reducer and hand its effects to the backend.
    ///
    /// An effect that cannot be delivered is answered with the matching
    /// failure message so loading and in-flight markers never get stuck.
    pub(crate) async fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);

        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                if let Err(fallback) = self.send_effect(effect).await {
                    queue.push_back(fallback);
                }
            }
        }

        self.dirty = true;
    }

    async fn send_effect(&self, effect: Effect) -> Result<(), Msg> {
        let (command, fallback) = match effect {
            Effect::LoadEmails => (BackendCommand::LoadEmails, Msg::LoadFailed),
            Effect::Call(ticket) => (
                BackendCommand::RunAction(ticket.clone()),
                Msg::ActionFailed { ticket },
            ),
        };

        self.backend.cmd_tx.send(command).await.map_err(|e| {
            tracing::error!("Backend actor unavailable: {}", e);
            fallback
        })
    }
}
