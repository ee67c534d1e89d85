//! Keyboard handling for every screen.

use crossterm::event::KeyCode;

use crate::app::{App, Effect, Loadable, Screen, LANDING_ITEMS};
use crate::flow::GenerateState;

/// Applies a key press. Returns the backend call to start, if any.
pub fn handle_key(app: &mut App, key: KeyCode) -> Option<Effect> {
    let handler: fn(&mut App, KeyCode) -> Option<Effect> = match &app.screen {
        Screen::Landing(_) => handle_landing_input,
        Screen::Generate(_) => handle_generate_input,
        Screen::History(_) => handle_history_input,
        Screen::QuizDetail(_) => handle_detail_input,
        Screen::TakeQuiz(_) => handle_quiz_input,
        Screen::Scorecard(_) => handle_scorecard_input,
    };
    handler(app, key)
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_landing_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::Landing(screen) = &mut app.screen else {
        return None;
    };
    screen.notice = None;

    let item = match key {
        KeyCode::Up | KeyCode::Char('k') => {
            screen.selected = (screen.selected + LANDING_ITEMS.len() - 1) % LANDING_ITEMS.len();
            return None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            screen.selected = (screen.selected + 1) % LANDING_ITEMS.len();
            return None;
        }
        KeyCode::Enter => screen.selected,
        KeyCode::Char('g') => 0,
        KeyCode::Char('h') => 1,
        k if is_quit(k) => 2,
        _ => return None,
    };

    match item {
        0 => {
            app.open_generate();
            None
        }
        1 => Some(app.open_history()),
        _ => {
            app.should_quit = true;
            None
        }
    }
}

/// What the generate screen is doing, detached from the flow borrow.
enum GeneratePhase {
    EditingUrl,
    Configuring {
        section_count: usize,
        highlighted: Option<String>,
    },
    ShowingFailure,
    Waiting,
    Done,
}

fn handle_generate_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::Generate(screen) = &mut app.screen else {
        return None;
    };

    let phase = match screen.flow.state() {
        GenerateState::Idle { .. } => GeneratePhase::EditingUrl,
        GenerateState::PreviewReady { preview, .. } => GeneratePhase::Configuring {
            section_count: preview.sections.len(),
            highlighted: preview.sections.get(screen.section_cursor).cloned(),
        },
        GenerateState::Failed { .. } => GeneratePhase::ShowingFailure,
        GenerateState::Validating { .. } | GenerateState::Submitting { .. } => {
            GeneratePhase::Waiting
        }
        GenerateState::Succeeded { .. } => GeneratePhase::Done,
    };

    match phase {
        GeneratePhase::EditingUrl => match key {
            KeyCode::Esc => app.go_landing(),
            KeyCode::Enter => return app.request_preview(),
            KeyCode::Backspace => screen.flow.pop_url_char(),
            KeyCode::Char(c) => screen.flow.push_url_char(c),
            _ => {}
        },
        GeneratePhase::Configuring {
            section_count: count,
            highlighted,
        } => match key {
            KeyCode::Esc => app.go_landing(),
            KeyCode::Char('e') => screen.flow.edit_url(),
            KeyCode::Left | KeyCode::Char('h') => screen.flow.cycle_difficulty(false),
            KeyCode::Right | KeyCode::Char('l') => screen.flow.cycle_difficulty(true),
            KeyCode::Up | KeyCode::Char('k') if count > 0 => {
                screen.section_cursor = (screen.section_cursor + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') if count > 0 => {
                screen.section_cursor = (screen.section_cursor + 1) % count;
            }
            KeyCode::Char(' ') => {
                if let Some(section) = highlighted {
                    screen.flow.toggle_section(&section);
                }
            }
            KeyCode::Enter => return app.submit_generation(),
            k if is_quit(k) => app.should_quit = true,
            _ => {}
        },
        GeneratePhase::ShowingFailure => {
            if matches!(key, KeyCode::Enter | KeyCode::Esc) {
                screen.flow.dismiss_failure();
            }
        }
        // Requests in flight are not cancelled; leaving drops their result.
        GeneratePhase::Waiting => {
            if key == KeyCode::Esc {
                app.go_landing();
            }
        }
        GeneratePhase::Done => {}
    }

    None
}

fn handle_history_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::History(screen) = &mut app.screen else {
        return None;
    };

    match key {
        KeyCode::Esc => app.go_landing(),
        KeyCode::Char('r') => return Some(app.open_history()),
        k if is_quit(k) => app.should_quit = true,
        _ => {
            let Loadable::Loaded(entries) = &screen.entries else {
                return None;
            };
            match key {
                KeyCode::Down | KeyCode::Char('j') if !entries.is_empty() => {
                    screen.selected = (screen.selected + 1).min(entries.len() - 1);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    screen.selected = screen.selected.saturating_sub(1);
                }
                KeyCode::Enter => {
                    if let Some(entry) = entries.get(screen.selected) {
                        let id = entry.id;
                        return Some(app.open_quiz(id));
                    }
                }
                _ => {}
            }
        }
    }

    None
}

fn handle_detail_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::QuizDetail(screen) = &mut app.screen else {
        return None;
    };

    match key {
        KeyCode::Esc => app.go_landing(),
        KeyCode::Down | KeyCode::Char('j') => screen.scroll = screen.scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => screen.scroll = screen.scroll.saturating_sub(1),
        KeyCode::Char('t') | KeyCode::Enter => {
            if let Loadable::Loaded(quiz) = &screen.quiz {
                let quiz = quiz.clone();
                app.start_quiz(Some(quiz));
            }
        }
        KeyCode::Char('r') => {
            if let (Loadable::Failed(_), Some(id)) = (&screen.quiz, screen.id) {
                return Some(app.open_quiz(id));
            }
        }
        KeyCode::Char('h') => return Some(app.open_history()),
        k if is_quit(k) => app.should_quit = true,
        _ => {}
    }

    None
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::TakeQuiz(screen) = &mut app.screen else {
        return None;
    };
    let Some(question) = screen.session.current_question() else {
        return None;
    };
    let count = question.options.len();

    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            screen.cursor = (screen.cursor + count - 1) % count;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            screen.cursor = (screen.cursor + 1) % count;
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            let option = question.options[screen.cursor].clone();
            // The option comes from the current question, so selection
            // cannot be rejected here.
            if let Ok(outcome) = screen.session.select(&option) {
                screen.cursor = 0;
                if let Some(result) = outcome {
                    app.show_score(result);
                }
            }
        }
        KeyCode::Esc => app.go_landing(),
        k if is_quit(k) => app.should_quit = true,
        _ => {}
    }

    None
}

fn handle_scorecard_input(app: &mut App, key: KeyCode) -> Option<Effect> {
    let Screen::Scorecard(screen) = &mut app.screen else {
        return None;
    };

    match key {
        KeyCode::Char('v') | KeyCode::Tab => {
            screen.reviewing = !screen.reviewing;
            screen.scroll = 0;
        }
        KeyCode::Down | KeyCode::Char('j') if screen.reviewing => {
            screen.scroll = screen.scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') if screen.reviewing => {
            screen.scroll = screen.scroll.saturating_sub(1);
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            let quiz = screen.result.quiz.clone();
            app.start_quiz(Some(quiz));
        }
        KeyCode::Esc if screen.reviewing => screen.reviewing = false,
        KeyCode::Esc | KeyCode::Enter => app.go_landing(),
        k if is_quit(k) => app.should_quit = true,
        _ => {}
    }

    None
}
