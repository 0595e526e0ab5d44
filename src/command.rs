//! Local player commands typed at the terminal.

use std::str::FromStr;
use strictly_othello_rules::{Coordinate, CoordinateError};

/// A command from the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    /// `preview X Y`: stage a move.
    Preview(Coordinate),
    /// `undo`: roll back the staged move.
    Undo,
    /// `commit`: send the staged move to the authority.
    Commit,
    /// `show`: display legal-move hints.
    Show,
    /// `hide`: hide legal-move hints.
    Hide,
    /// `quit`: leave the match.
    Quit,
}

/// Why a line could not be read as a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("Empty command")]
    Empty,

    /// The first word is not a command.
    #[display("Unknown command {:?} (try preview X Y, undo, commit, show, hide, quit)", _0)]
    Unknown(String),

    /// Wrong number of arguments.
    #[display("{} expects {} argument(s)", _0, _1)]
    Arity(&'static str, usize),

    /// An argument is not a number.
    #[display("{:?} is not a number", _0)]
    NotANumber(String),

    /// The coordinate is off the board.
    #[display("{}", _0)]
    #[from]
    Coordinate(CoordinateError),
}

impl std::error::Error for CommandError {}

impl FromStr for LocalCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "preview" | "p" => {
                let &[x, y] = args.as_slice() else {
                    return Err(CommandError::Arity("preview", 2));
                };
                return Ok(LocalCommand::Preview(Coordinate::checked(
                    number(x)?,
                    number(y)?,
                )?));
            }
            "undo" | "u" => LocalCommand::Undo,
            "commit" | "c" => LocalCommand::Commit,
            "show" => LocalCommand::Show,
            "hide" => LocalCommand::Hide,
            "quit" | "q" | "exit" => LocalCommand::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        if !args.is_empty() {
            return Err(CommandError::Arity(verb_name(command), 0));
        }
        Ok(command)
    }
}

fn number(word: &str) -> Result<i64, CommandError> {
    word.parse()
        .map_err(|_| CommandError::NotANumber(word.to_string()))
}

fn verb_name(command: LocalCommand) -> &'static str {
    match command {
        LocalCommand::Preview(_) => "preview",
        LocalCommand::Undo => "undo",
        LocalCommand::Commit => "commit",
        LocalCommand::Show => "show",
        LocalCommand::Hide => "hide",
        LocalCommand::Quit => "quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preview() {
        assert_eq!(
            "preview 2 3".parse::<LocalCommand>(),
            Ok(LocalCommand::Preview(Coordinate::new(2, 3).unwrap()))
        );
        assert_eq!(
            "  P 7 0 ".parse::<LocalCommand>(),
            Ok(LocalCommand::Preview(Coordinate::new(7, 0).unwrap()))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("undo".parse(), Ok(LocalCommand::Undo));
        assert_eq!("commit".parse(), Ok(LocalCommand::Commit));
        assert_eq!("SHOW".parse(), Ok(LocalCommand::Show));
        assert_eq!("hide".parse(), Ok(LocalCommand::Hide));
        assert_eq!("quit".parse(), Ok(LocalCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<LocalCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "resign".parse::<LocalCommand>(),
            Err(CommandError::Unknown("resign".to_string()))
        );
        assert_eq!(
            "preview 2".parse::<LocalCommand>(),
            Err(CommandError::Arity("preview", 2))
        );
        assert_eq!(
            "undo 1".parse::<LocalCommand>(),
            Err(CommandError::Arity("undo", 0))
        );
        assert_eq!(
            "preview two 3".parse::<LocalCommand>(),
            Err(CommandError::NotANumber("two".to_string()))
        );
    }

    #[test]
    fn test_off_board_preview() {
        let err = "preview 8 -1".parse::<LocalCommand>().unwrap_err();
        assert_eq!(err, CommandError::Coordinate(CoordinateError { x: 8, y: -1 }));
        assert!(err.to_string().contains("outside the 8x8 board"));
    }
}
