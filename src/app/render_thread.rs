//! Background render thread for non-blocking UI rendering.
//!
//! The render thread owns the Terminal and draws snapshots of AppState
//! sent from the main event loop, so slow terminals never delay input
//! handling or backend completions.

use std::io;
use std::sync::mpsc::{self, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use super::state::AppState;
use crate::ui::RenderContext;

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Command sent to the render thread.
pub enum RenderCommand {
    /// Render this state snapshot
    Render(Box<AppState>),
    /// Shutdown the render thread
    Shutdown,
}

/// Handle to the background render thread.
pub struct RenderThread {
    /// Channel to send render commands
    cmd_tx: SyncSender<RenderCommand>,
    /// Thread join handle
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Spawn a new render thread.
    ///
    /// Terminal setup happens on the render thread; a failure there is
    /// returned here instead of leaving the app running without a screen.
    pub fn spawn(context: RenderContext) -> io::Result<Self> {
        // Channel with capacity 1 - we only care about the latest state
        let (cmd_tx, cmd_rx) = mpsc::sync_channel::<RenderCommand>(1);
        let (ready_tx, ready_rx) = mpsc::channel::<io::Result<()>>();

        let handle = thread::Builder::new()
            .name("render".to_string())
            .spawn(move || {
                let mut terminal = match setup_terminal() {
                    Ok(t) => {
                        let _ = ready_tx.send(Ok(()));
                        t
                    }
                    Err(e) => {
                        tracing::error!("Failed to set up terminal: {}", e);
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

                // Render loop
                while let Ok(cmd) = cmd_rx.recv() {
                    match cmd {
                        RenderCommand::Render(state) => {
                            if let Err(e) =
                                terminal.draw(|f| crate::ui::render(f, &state, &context))
                            {
                                tracing::error!("Render error: {}", e);
                            }
                        }
                        RenderCommand::Shutdown => break,
                    }
                }

                restore_terminal(&mut terminal);
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                cmd_tx,
                handle: Some(handle),
            }),
            Ok(Err(e)) => {
                handle.join().ok();
                Err(e)
            }
            Err(_) => {
                handle.join().ok();
                Err(io::Error::other("render thread exited during setup"))
            }
        }
    }

    /// Request a render of the given state (non-blocking).
    ///
    /// Returns false when the render thread is still busy and the frame was
    /// skipped; the caller keeps the state dirty and retries.
    pub fn render(&self, state: AppState) -> bool {
        queue_frame(&self.cmd_tx, state)
    }

    /// Shutdown the render thread and wait for it to finish.
    pub fn shutdown(mut self) {
        // Send shutdown command (blocking to ensure it's received)
        let _ = self.cmd_tx.send(RenderCommand::Shutdown);

        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn queue_frame(cmd_tx: &SyncSender<RenderCommand>, state: AppState) -> bool {
    match cmd_tx.try_send(RenderCommand::Render(Box::new(state))) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::trace!("Render thread busy, skipping frame");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            // Nothing will ever draw it; don't spin on a dead thread
            tracing::error!("Render thread disconnected");
            true
        }
    }
}

fn setup_terminal() -> io::Result<CrosstermTerminal> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e);
    }

    Terminal::new(CrosstermBackend::new(stdout)).inspect_err(|_| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen).ok();
    })
}

fn restore_terminal(terminal: &mut CrosstermTerminal) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();
}
