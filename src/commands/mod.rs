mod registry;

pub use registry::{all_commands, find_command, Command};

use crate::core::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    Quit,
    ClearSession,
    ShowHelp,
    EnterInsertMode,
    Noop,
}

/// Interpret a completed command-mode line and apply its session mutation.
/// Unrecognized lines are a silent no-op by design, not an error.
pub fn process_command(session: &mut Session, line: &str) -> CommandAction {
    let action = match find_command(line) {
        Some(command) => command.action,
        None => CommandAction::Noop,
    };

    match action {
        CommandAction::ClearSession => session.clear(),
        CommandAction::ShowHelp => session.push_notice(help_notice()),
        CommandAction::EnterInsertMode => session.enter_insert_mode(),
        CommandAction::Quit | CommandAction::Noop => {}
    }

    action
}

/// Help notice body, generated from the registry so the alias table and its
/// documentation cannot drift.
pub fn help_notice() -> String {
    let mut help = String::from("Vim-style commands available:\n");
    help.push_str("  Esc         - Toggle insert/command mode\n");
    for command in all_commands() {
        let aliases = command.aliases.join(" / ");
        help.push_str(&format!("  {:<11} - {}\n", aliases, command.help));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{Mode, TranscriptKind};

    #[test]
    fn quit_aliases_map_to_quit_without_mutation() {
        for alias in [":q", ":quit"] {
            let mut session = Session::new();
            session.record_user_turn("hello");
            session.record_assistant_turn("hi");
            assert_eq!(process_command(&mut session, alias), CommandAction::Quit);
            assert_eq!(session.messages().len(), 3);
            assert_eq!(session.transcript().len(), 2);
        }
    }

    #[test]
    fn clear_aliases_reset_to_seed_state() {
        for alias in [":c", ":clear"] {
            let mut session = Session::new();
            session.record_user_turn("hello");
            session.record_assistant_turn("hi");
            assert_eq!(
                process_command(&mut session, alias),
                CommandAction::ClearSession
            );
            assert_eq!(session.messages().len(), 1);
            assert!(session.transcript().is_empty());
        }
    }

    #[test]
    fn help_appends_exactly_one_notice_and_leaves_the_conversation_alone() {
        let mut session = Session::new();
        assert_eq!(process_command(&mut session, ":help"), CommandAction::ShowHelp);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].kind, TranscriptKind::Notice);
    }

    #[test]
    fn insert_alias_switches_mode() {
        let mut session = Session::new();
        session.toggle_mode();
        assert_eq!(session.mode, Mode::Command);
        assert_eq!(
            process_command(&mut session, ":i"),
            CommandAction::EnterInsertMode
        );
        assert_eq!(session.mode, Mode::Insert);
    }

    #[test]
    fn unknown_lines_are_a_silent_noop() {
        for line in ["", ":x", "quit", ":QUIT", " :q", ":q ", ":quit now", ":qu"] {
            let mut session = Session::new();
            session.record_user_turn("hello");
            session.record_assistant_turn("hi");
            session.toggle_mode();
            let offset_before = session.scroll_offset;

            assert_eq!(process_command(&mut session, line), CommandAction::Noop);
            assert_eq!(session.messages().len(), 3);
            assert_eq!(session.transcript().len(), 2);
            assert_eq!(session.mode, Mode::Command);
            assert_eq!(session.scroll_offset, offset_before);
        }
    }

    #[test]
    fn help_notice_mentions_every_alias() {
        let help = help_notice();
        for command in all_commands() {
            for alias in command.aliases {
                assert!(help.contains(alias), "help text is missing {alias}");
            }
        }
    }
}
