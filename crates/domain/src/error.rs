//! Error taxonomy shared across the workspace.
//!
//! Each stage owns a typed error: decoding a payload, applying a command to a
//! zone, and publishing a state change. None of them is fatal to the process.

use crate::component::ComponentKind;
use crate::room::RoomId;

/// A room name outside the closed [`RoomId`] set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room {0:?}")]
pub struct UnknownRoomError(pub String);

/// Why an inbound payload could not be turned into a
/// [`LightCommand`](crate::command::LightCommand).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload is empty or whitespace only.
    #[error("empty payload")]
    Empty,

    /// The payload is not a UTF-8 JSON object.
    #[error("malformed payload")]
    Malformed(#[source] serde_json::Error),

    /// A required key (`room` or `component`) is absent.
    #[error("missing field {0:?}")]
    MissingField(&'static str),

    /// The payload targets a component this core does not drive.
    #[error("component {0} is not handled")]
    NotTargetComponent(ComponentKind),

    /// The `room` value is not one of the known rooms.
    #[error(transparent)]
    UnknownRoom(UnknownRoomError),

    /// `value` is absent or not exactly `0` or `1`.
    #[error("missing or invalid value")]
    MissingOrInvalidValue,
}

impl DecodeError {
    /// Whether this is the recognized skip of a non-light component rather
    /// than a malformed payload.
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::NotTargetComponent(_))
    }
}

/// Why a command could not be applied to a zone.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    /// No light zone is bound for the room in this deployment.
    #[error("no light zone bound for room {0}")]
    UnresolvedZone(RoomId),

    /// The command targets a component the controller does not drive.
    #[error("unsupported component {0}")]
    UnsupportedComponent(ComponentKind),
}

/// Why a transport operation (publish or subscribe) failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    /// The transport is disconnected or its request queue is gone.
    #[error("transport unavailable")]
    TransportUnavailable,

    /// The transport or broker refused the request.
    #[error("rejected by transport: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flag_non_light_component_as_skip() {
        assert!(DecodeError::NotTargetComponent(ComponentKind::Fan).is_skip());
        assert!(!DecodeError::Empty.is_skip());
        assert!(!DecodeError::MissingOrInvalidValue.is_skip());
    }

    #[test]
    fn should_display_unknown_room() {
        let err = UnknownRoomError("garage".to_string());
        assert_eq!(err.to_string(), "unknown room \"garage\"");
    }

    #[test]
    fn should_name_room_when_decode_fails_on_unknown_room() {
        let err = DecodeError::UnknownRoom(UnknownRoomError("garage".to_string()));
        assert_eq!(err.to_string(), "unknown room \"garage\"");
    }

    #[test]
    fn should_display_not_target_component() {
        let err = DecodeError::NotTargetComponent(ComponentKind::Fan);
        assert_eq!(err.to_string(), "component fan is not handled");
    }

    #[test]
    fn should_display_unresolved_zone() {
        let err = SyncError::UnresolvedZone(RoomId::Bedroom);
        assert_eq!(err.to_string(), "no light zone bound for room bedroom");
    }

    #[test]
    fn should_display_publish_errors() {
        assert_eq!(
            PublishError::TransportUnavailable.to_string(),
            "transport unavailable"
        );
        assert_eq!(
            PublishError::Rejected("queue full".to_string()).to_string(),
            "rejected by transport: queue full"
        );
    }
}
