//! Event loop: draws the app, reads keys and runs backend calls.
//!
//! Backend calls run as spawned tasks so the screen keeps redrawing while
//! they are in flight. Their results come back over a channel and are
//! applied between frames.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::app::{App, Effect, Response};
use crate::config::Config;
use crate::error::AppError;
use crate::input::handle_key;
use crate::terminal::TerminalGuard;
use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the interactive application until the user quits.
pub async fn run(config: Config) -> Result<(), AppError> {
    info!(api_base_url = %config.api_base_url, "starting wiki-quiz");
    let client = ApiClient::new(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel::<Response>();
    let mut app = App::new();
    let mut guard = TerminalGuard::enter()?;

    loop {
        while let Ok(response) = rx.try_recv() {
            app.apply(response);
        }
        if app.should_quit {
            break;
        }

        guard.terminal_mut().draw(|frame| ui::render(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    app.should_quit = true;
                    continue;
                }

                if let Some(effect) = handle_key(&mut app, key.code) {
                    spawn_effect(&client, effect, tx.clone());
                }
            }
        }
    }

    info!("wiki-quiz exiting");
    Ok(())
}

fn spawn_effect(client: &ApiClient, effect: Effect, tx: mpsc::UnboundedSender<Response>) {
    debug!(?effect, "starting backend call");
    let client = client.clone();
    tokio::spawn(async move {
        let response = perform(&client, effect).await;
        // A closed channel means the app has already exited.
        let _ = tx.send(response);
    });
}

/// Performs one backend call and wraps its outcome for [`App::apply`].
pub async fn perform(client: &ApiClient, effect: Effect) -> Response {
    match effect {
        Effect::Preview { id, url } => Response::Preview {
            id,
            result: client.preview_article(&url).await,
        },
        Effect::Generate { id, request } => Response::Generated {
            id,
            result: client.submit_quiz(&request).await,
        },
        Effect::LoadHistory => Response::History(client.history().await),
        Effect::LoadQuiz(id) => Response::Quiz {
            id,
            result: client.quiz(id).await,
        },
    }
}
