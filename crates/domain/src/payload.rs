//! Wire payload codec.
//!
//! Inbound and outbound messages share one flat JSON object shape:
//!
//! ```text
//! {"house": "...", "room": "bathroom", "component": "led", "value": 1, "msg": "..."}
//! ```
//!
//! `house` and `msg` are informational and ignored on decode. Key order is
//! irrelevant. `value` must be the integer `0` or `1`.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::command::LightCommand;
use crate::component::ComponentKind;
use crate::error::{DecodeError, UnknownRoomError};
use crate::room::RoomId;
use crate::zone::LightState;

/// Maximum number of characters of a raw payload quoted in log lines.
pub const EXCERPT_LEN: usize = 128;

/// Decode a raw inbound payload into a [`LightCommand`].
///
/// Checks run in order: emptiness, JSON shape, `component`, `room`, `value`.
/// A payload for another component is therefore skipped even when its room
/// is unknown.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing the first check that failed. This
/// function never panics on arbitrary input.
pub fn decode(raw: &[u8]) -> Result<LightCommand, DecodeError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let fields: Map<String, Value> = serde_json::from_slice(raw).map_err(DecodeError::Malformed)?;

    let component = match fields.get("component") {
        Some(Value::String(name)) => ComponentKind::from_wire(name),
        Some(other) => ComponentKind::Other(other.to_string()),
        None => return Err(DecodeError::MissingField("component")),
    };
    if !component.is_light() {
        return Err(DecodeError::NotTargetComponent(component));
    }

    let room: RoomId = match fields.get("room") {
        Some(Value::String(name)) => name.parse().map_err(DecodeError::UnknownRoom)?,
        Some(other) => {
            return Err(DecodeError::UnknownRoom(UnknownRoomError(other.to_string())));
        }
        None => return Err(DecodeError::MissingField("room")),
    };

    let value = match fields.get("value").and_then(Value::as_u64) {
        Some(1) => true,
        Some(0) => false,
        _ => return Err(DecodeError::MissingOrInvalidValue),
    };

    Ok(LightCommand::new(room, component, value))
}

#[derive(Serialize)]
struct OutboundPayload<'a> {
    house: &'a str,
    room: RoomId,
    component: &'static str,
    value: u8,
    msg: String,
}

/// Encode a zone state announcement mirroring the inbound schema.
///
/// # Errors
///
/// Returns the serializer error, which does not happen for this shape in
/// practice.
pub fn encode_state(house: &str, room: RoomId, state: LightState) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&OutboundPayload {
        house,
        room,
        component: ComponentKind::Led.as_str(),
        value: u8::from(state.is_on()),
        msg: format!("{room} light turned {state}"),
    })
}

/// A printable, length-bounded excerpt of a raw payload for log lines.
#[must_use]
pub fn excerpt(raw: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(raw);
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &text[..cut])),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_decode_bathroom_on() {
        let cmd = decode(br#"{"room":"bathroom","component":"led","value":1}"#).unwrap();
        assert_eq!(cmd, LightCommand::led(RoomId::Bathroom, true));
    }

    #[test]
    fn should_decode_off_with_optional_keys_in_any_order() {
        let raw = br#"{"value":0,"msg":"bedtime","component":"led","house":"middle","room":"bedroom"}"#;
        let cmd = decode(raw).unwrap();
        assert_eq!(cmd, LightCommand::led(RoomId::Bedroom, false));
    }

    #[test]
    fn should_tolerate_whitespace_between_tokens() {
        let raw = b"{ \"room\" : \"living\" ,\n \"component\" : \"led\", \"value\" : 1 }";
        assert_eq!(decode(raw).unwrap(), LightCommand::led(RoomId::Living, true));
    }

    #[test]
    fn should_report_empty_payload() {
        assert!(matches!(decode(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode(b"  \n\t "), Err(DecodeError::Empty)));
    }

    #[test]
    fn should_skip_non_led_component() {
        let result = decode(br#"{"component":"fan","value":1,"room":"front"}"#);
        match result {
            Err(err @ DecodeError::NotTargetComponent(ComponentKind::Fan)) => assert!(err.is_skip()),
            other => panic!("expected NotTargetComponent, got {other:?}"),
        }

        let result = decode(br#"{"component":5,"value":1,"room":"front"}"#);
        match result {
            Err(err @ DecodeError::NotTargetComponent(ComponentKind::Other(_))) => {
                assert!(err.is_skip());
            }
            other => panic!("expected NotTargetComponent, got {other:?}"),
        }
    }

    #[test]
    fn should_skip_non_led_component_before_checking_room() {
        let result = decode(br#"{"room":"garage","component":"door","value":1}"#);
        assert!(matches!(
            result,
            Err(DecodeError::NotTargetComponent(ComponentKind::Door))
        ));
    }

    #[test]
    fn should_report_unknown_room() {
        let result = decode(br#"{"room":"garage","component":"led","value":1}"#);
        match result {
            Err(DecodeError::UnknownRoom(err)) => assert_eq!(err.0, "garage"),
            other => panic!("expected UnknownRoom, got {other:?}"),
        }

        let result = decode(br#"{"room":7,"component":"led","value":1}"#);
        match result {
            Err(DecodeError::UnknownRoom(err)) => assert_eq!(err.0, "7"),
            other => panic!("expected UnknownRoom, got {other:?}"),
        }
    }

    #[test]
    fn should_report_invalid_value_for_other_numbers() {
        let payloads: [&[u8]; 6] = [
            br#"{"room":"front","component":"led","value":2}"#,
            br#"{"room":"front","component":"led","value":-1}"#,
            br#"{"room":"front","component":"led","value":1.0}"#,
            br#"{"room":"front","component":"led","value":"1"}"#,
            br#"{"room":"front","component":"led","value":true}"#,
            br#"{"room":"front","component":"led"}"#,
        ];
        for raw in payloads {
            assert!(
                matches!(decode(raw), Err(DecodeError::MissingOrInvalidValue)),
                "payload {} should be rejected",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn should_report_missing_room_and_component() {
        assert!(matches!(
            decode(br#"{"component":"led","value":1}"#),
            Err(DecodeError::MissingField("room"))
        ));
        assert!(matches!(
            decode(br#"{"room":"front","value":1}"#),
            Err(DecodeError::MissingField("component"))
        ));
    }

    #[test]
    fn should_report_malformed_payloads() {
        let payloads: [&[u8]; 4] = [b"{\"room\":\"front\"", b"[1, 0]", b"\"room\"", b"\xff\xfe\x00"];
        for raw in payloads {
            assert!(matches!(decode(raw), Err(DecodeError::Malformed(_))));
        }
    }

    #[test]
    fn should_encode_state_in_inbound_schema() {
        let raw = encode_state("tinyhouse", RoomId::Front, LightState::On).unwrap();
        assert_eq!(
            String::from_utf8(raw).unwrap(),
            r#"{"house":"tinyhouse","room":"front","component":"led","value":1,"msg":"front light turned on"}"#
        );
    }

    #[test]
    fn should_decode_own_announcement() {
        let raw = encode_state("tinyhouse", RoomId::Bathroom, LightState::Off).unwrap();
        assert_eq!(decode(&raw).unwrap(), LightCommand::led(RoomId::Bathroom, false));
    }

    #[test]
    fn should_truncate_long_excerpts() {
        let raw = "x".repeat(EXCERPT_LEN + 10);
        let text = excerpt(raw.as_bytes());
        assert_eq!(text.chars().count(), EXCERPT_LEN + 1);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn should_keep_short_excerpts_untouched() {
        assert_eq!(excerpt(b"{}"), "{}");
    }
}
