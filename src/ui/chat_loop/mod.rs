//! Main chat event loop
//!
//! Reads one input event at a time, updates the session, redraws, and
//! drives the synchronous completion cycle when a user turn completes.

mod keys;
mod lifecycle;

pub use keys::{classify, KeyAction};
pub use lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use std::error::Error;

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, warn};

use crate::commands::{process_command, CommandAction};
use crate::core::completion::{CompletionBackend, CompletionError};
use crate::core::constants::FALLBACK_REPLY;
use crate::core::session::{Mode, Session};
use crate::ui::renderer::ui;
use crate::ui::theme::Theme;

/// What the loop should do after handling one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    Continue,
    Quit,
}

/// Run the interactive session until quit. The terminal is restored on
/// every exit path, including the fatal backend-initialization path.
pub fn run_chat(
    session: &mut Session,
    backend: &mut dyn CompletionBackend,
    theme: &Theme,
    title: &str,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = setup_terminal()?;
    debug!("entering chat loop");
    let result = event_loop(&mut terminal, session, backend, theme, title);
    let restored = restore_terminal();
    debug!("chat loop finished");
    result?;
    restored?;
    Ok(())
}

fn event_loop(
    terminal: &mut ChatTerminal,
    session: &mut Session,
    backend: &mut dyn CompletionBackend,
    theme: &Theme,
    title: &str,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(f, session, theme, title))?;

        // One blocking read per cycle; resizes fall through to the redraw.
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match classify(key) {
                Some(action) => action,
                None => continue,
            },
            _ => continue,
        };

        let outcome = handle_action(session, backend, action, &mut |s: &Session| {
            let _ = terminal.draw(|f| ui(f, s, theme, title));
        })?;
        if outcome == LoopAction::Quit {
            return Ok(());
        }
    }
}

/// Apply one classified key event to the session. Separated from the
/// terminal plumbing so the whole state machine is testable with a stub
/// backend and a recording redraw callback.
pub fn handle_action(
    session: &mut Session,
    backend: &mut dyn CompletionBackend,
    action: KeyAction,
    redraw: &mut dyn FnMut(&Session),
) -> Result<LoopAction, CompletionError> {
    match action {
        KeyAction::ScrollLineBack => session.scroll_back(1),
        KeyAction::ScrollLineForward => session.scroll_forward(1),
        KeyAction::ScrollPageBack => session.page_back(),
        KeyAction::ScrollPageForward => session.page_forward(),
        KeyAction::ToggleMode => session.toggle_mode(),
        KeyAction::Backspace => session.backspace(),
        KeyAction::Insert(c) => session.push_char(c),
        KeyAction::Interrupt => return Ok(LoopAction::Quit),
        KeyAction::Submit => return submit(session, backend, redraw),
    }
    Ok(LoopAction::Continue)
}

fn submit(
    session: &mut Session,
    backend: &mut dyn CompletionBackend,
    redraw: &mut dyn FnMut(&Session),
) -> Result<LoopAction, CompletionError> {
    let line = session.take_input();
    match session.mode {
        Mode::Command => {
            if process_command(session, &line) == CommandAction::Quit {
                return Ok(LoopAction::Quit);
            }
        }
        Mode::Insert => {
            if line.trim().is_empty() {
                return Ok(LoopAction::Continue);
            }
            session.record_user_turn(&line);

            // Show the transient thinking row before blocking on the call.
            session.thinking = true;
            redraw(session);
            let outcome = backend.generate(session.messages());
            session.thinking = false;

            let reply = match outcome {
                Ok(text) => {
                    let text = text.trim().to_string();
                    if text.is_empty() {
                        warn!("low-signal reply, substituting fallback");
                        FALLBACK_REPLY.to_string()
                    } else {
                        text
                    }
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(error = %err, "generation fault, substituting fallback");
                    FALLBACK_REPLY.to_string()
                }
            };

            session.record_assistant_turn(&reply);
            session.scroll_to_bottom();
            debug!(exchanges = session.exchange_count(), "exchange complete");
        }
    }
    Ok(LoopAction::Continue)
}
