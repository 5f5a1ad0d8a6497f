//! Line-oriented console standing in for in-world interaction.
//!
//! ```text
//! toggle <room>   flip the room's wall switch
//! on <room>       switch the room on
//! off <room>      switch the room off
//! motion <room>   report motion in the room
//! status          print every zone
//! ```

use std::str::FromStr;

use tinyhouse_domain::error::UnknownRoomError;
use tinyhouse_domain::room::RoomId;

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Toggle(RoomId),
    Set(RoomId, bool),
    Motion(RoomId),
    Status,
}

/// Console parse errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("`{0}` expects exactly one room")]
    MissingRoom(&'static str),
    #[error(transparent)]
    UnknownRoom(#[from] UnknownRoomError),
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ConsoleError::Empty);
        };
        let verb = verb.to_ascii_lowercase();

        if verb == "status" {
            return Ok(Self::Status);
        }

        let name = match verb.as_str() {
            "toggle" => "toggle",
            "on" => "on",
            "off" => "off",
            "motion" => "motion",
            _ => return Err(ConsoleError::UnknownCommand(verb)),
        };
        let room = match (words.next(), words.next()) {
            (Some(room), None) => room.parse::<RoomId>()?,
            _ => return Err(ConsoleError::MissingRoom(name)),
        };

        Ok(match name {
            "toggle" => Self::Toggle(room),
            "on" => Self::Set(room, true),
            "off" => Self::Set(room, false),
            _ => Self::Motion(room),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_room_commands() {
        assert_eq!(
            "toggle bathroom".parse(),
            Ok(ConsoleCommand::Toggle(RoomId::Bathroom))
        );
        assert_eq!("on front".parse(), Ok(ConsoleCommand::Set(RoomId::Front, true)));
        assert_eq!(
            "  OFF   living ".parse(),
            Ok(ConsoleCommand::Set(RoomId::Living, false))
        );
        assert_eq!(
            "motion front".parse(),
            Ok(ConsoleCommand::Motion(RoomId::Front))
        );
    }

    #[test]
    fn should_parse_status() {
        assert_eq!("status".parse(), Ok(ConsoleCommand::Status));
    }

    #[test]
    fn should_reject_blank_line() {
        assert_eq!("   ".parse::<ConsoleCommand>(), Err(ConsoleError::Empty));
    }

    #[test]
    fn should_reject_unknown_verb() {
        assert_eq!(
            "dim front".parse::<ConsoleCommand>(),
            Err(ConsoleError::UnknownCommand("dim".to_string()))
        );
    }

    #[test]
    fn should_reject_missing_or_extra_room() {
        assert_eq!(
            "toggle".parse::<ConsoleCommand>(),
            Err(ConsoleError::MissingRoom("toggle"))
        );
        assert_eq!(
            "on front living".parse::<ConsoleCommand>(),
            Err(ConsoleError::MissingRoom("on"))
        );
    }

    #[test]
    fn should_reject_unknown_room() {
        assert!(matches!(
            "toggle garage".parse::<ConsoleCommand>(),
            Err(ConsoleError::UnknownRoom(_))
        ));
    }
}
