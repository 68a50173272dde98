//! Slash command parsing and execution for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls: help, history,
//! copying code blocks, clearing the screen and leaving.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen (the transcript is kept).
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show the conversation so far.
    History,
    /// Copy the n-th code block (1-based) of the newest message with code.
    Copy(usize),
    /// Unknown command or bad argument.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(' ') {
        Some((cmd, arg)) => (cmd.to_lowercase(), arg.trim()),
        None => (trimmed.to_lowercase(), ""),
    };

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/history" => Some(ChatCommand::History),
        "/copy" | "/cp" => {
            if arg.is_empty() {
                return Some(ChatCommand::Copy(1));
            }
            match arg.parse::<usize>() {
                Ok(n) if n > 0 => Some(ChatCommand::Copy(n)),
                _ => Some(ChatCommand::Unknown(format!(
                    "/copy expects a block number, got '{arg}'"
                ))),
            }
        }
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}      {}", style("/help").cyan(), "Show this help message");
    println!("  {}   {}", style("/history").cyan(), "Show the conversation so far");
    println!(
        "  {}  {}",
        style("/copy [n]").cyan(),
        "Copy code block n (default 1) of the newest message with code"
    );
    println!("  {}     {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}      {}", style("/exit").cyan(), "End the chat session");
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit, Ctrl+C is ignored").dim()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/Q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_clear() {
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("/cls"), Some(ChatCommand::Clear));
    }

    #[test]
    fn test_parse_history() {
        assert_eq!(parse("  /history  "), Some(ChatCommand::History));
    }

    #[test]
    fn test_parse_copy() {
        assert_eq!(parse("/copy"), Some(ChatCommand::Copy(1)));
        assert_eq!(parse("/copy 3"), Some(ChatCommand::Copy(3)));
        assert_eq!(parse("/cp   2"), Some(ChatCommand::Copy(2)));
    }

    #[test]
    fn test_parse_copy_bad_argument() {
        assert!(matches!(parse("/copy 0"), Some(ChatCommand::Unknown(_))));
        assert!(matches!(parse("/copy last"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
        assert_eq!(parse("what does /help do?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
