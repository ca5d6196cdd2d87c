use super::CommandAction;

pub struct Command {
    pub action: CommandAction,
    pub aliases: &'static [&'static str],
    pub help: &'static str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

/// Aliases match by exact string equality. No prefix matching, no case
/// folding, no trimming.
pub fn find_command(line: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.aliases.contains(&line))
}

const COMMANDS: &[Command] = &[
    Command {
        action: CommandAction::Quit,
        aliases: &[":q", ":quit"],
        help: "Quit",
    },
    Command {
        action: CommandAction::ClearSession,
        aliases: &[":c", ":clear"],
        help: "Clear chat",
    },
    Command {
        action: CommandAction::ShowHelp,
        aliases: &[":h", ":help"],
        help: "This help",
    },
    Command {
        action: CommandAction::EnterInsertMode,
        aliases: &[":i"],
        help: "Insert mode",
    },
];
