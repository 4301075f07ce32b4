//! Backend actor: runs HTTP calls off the UI thread
//!
//! Each command is spawned as its own task so a slow summary never blocks a
//! list refresh or another action. Results come back as [`BackendEvent`]s in
//! completion order.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::{Id, JoinSet};

use super::client::BackendClient;
use super::types::{ActionTicket, Email};
use crate::constants::{BACKEND_COMMAND_CAPACITY, BACKEND_EVENT_CAPACITY};

/// Commands that can be sent to the backend actor
#[derive(Debug)]
pub enum BackendCommand {
    /// Fetch the email list
    LoadEmails,
    /// Run one AI action for one email
    RunAction(ActionTicket),
    /// Stop accepting work and exit
    Shutdown,
}

/// Events emitted by the backend actor
#[derive(Debug, Clone)]
pub enum BackendEvent {
    EmailsLoaded(Vec<Email>),
    EmailsFailed(String),
    ActionSucceeded {
        ticket: ActionTicket,
        text: Option<String>,
    },
    ActionFailed {
        ticket: ActionTicket,
        error: String,
    },
}

/// Handle for communicating with the backend actor
pub struct BackendHandle {
    pub cmd_tx: mpsc::Sender<BackendCommand>,
    pub event_rx: mpsc::Receiver<BackendEvent>,
}

impl BackendHandle {
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}

/// What a spawned task was doing, kept so a panicked task still reports back
#[derive(Debug, Clone)]
enum Job {
    Load,
    Action(ActionTicket),
}

impl Job {
    fn failed(self, error: String) -> BackendEvent {
        match self {
            Job::Load => BackendEvent::EmailsFailed(error),
            Job::Action(ticket) => BackendEvent::ActionFailed { ticket, error },
        }
    }
}

/// Spawn the backend actor task
pub fn spawn_backend_actor(client: BackendClient) -> BackendHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel(BACKEND_COMMAND_CAPACITY);
    let (event_tx, event_rx) = mpsc::channel(BACKEND_EVENT_CAPACITY);

    tokio::spawn(backend_actor_loop(client, cmd_rx, event_tx));

    BackendHandle { cmd_tx, event_rx }
}

async fn backend_actor_loop(
    client: BackendClient,
    mut cmd_rx: mpsc::Receiver<BackendCommand>,
    event_tx: mpsc::Sender<BackendEvent>,
) {
    let mut tasks: JoinSet<BackendEvent> = JoinSet::new();
    let mut jobs: HashMap<Id, Job> = HashMap::new();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let job = match cmd {
                    Some(BackendCommand::LoadEmails) => Job::Load,
                    Some(BackendCommand::RunAction(ticket)) => Job::Action(ticket),
                    Some(BackendCommand::Shutdown) | None => break,
                };
                let handle = tasks.spawn(run_job(client.clone(), job.clone()));
                jobs.insert(handle.id(), job);
            }

            Some(joined) = tasks.join_next_with_id(), if !tasks.is_empty() => {
                let event = match joined {
                    Ok((id, event)) => {
                        jobs.remove(&id);
                        event
                    }
                    Err(e) => {
                        let Some(job) = jobs.remove(&e.id()) else {
                            tracing::error!("Backend task ended without a job record: {}", e);
                            continue;
                        };
                        tracing::error!("Backend task {:?} did not complete: {}", job, e);
                        job.failed(format!("request task failed: {}", e))
                    }
                };

                if event_tx.send(event).await.is_err() {
                    tracing::warn!("Backend actor: event receiver dropped");
                    break;
                }
            }
        }
    }

    tasks.abort_all();
    tracing::debug!("Backend actor stopped");
}

async fn run_job(client: BackendClient, job: Job) -> BackendEvent {
    match job {
        Job::Load => match client.list_emails().await {
            Ok(emails) => {
                tracing::info!("Loaded {} emails", emails.len());
                BackendEvent::EmailsLoaded(emails)
            }
            Err(e) => {
                tracing::warn!(status = ?e.status(), network = e.is_network(), "Loading emails failed: {}", e);
                BackendEvent::EmailsFailed(e.to_string())
            }
        },
        Job::Action(ticket) => match client.run_action(ticket.kind, &ticket.email_id).await {
            Ok(text) => {
                tracing::debug!(kind = %ticket.kind, id = %ticket.email_id, "Action completed");
                BackendEvent::ActionSucceeded { ticket, text }
            }
            Err(e) => {
                tracing::warn!(
                    kind = %ticket.kind,
                    id = %ticket.email_id,
                    status = ?e.status(),
                    network = e.is_network(),
                    "Action failed: {}",
                    e
                );
                BackendEvent::ActionFailed {
                    ticket,
                    error: e.to_string(),
                }
            }
        },
    }
}
