//! Property-based tests for the codec.
//!
//! The decoder sits directly behind the socket, so it must never panic on
//! arbitrary input and must skip unknown variants instead of rejecting them.

use proptest::prelude::*;
use relaychat_proto::{Inbound, Outbound, ProtocolError, decode, encode};
use serde_json::json;

proptest! {
    #[test]
    fn prop_decode_never_panics(input in ".{0,256}") {
        let _ = decode(&input);
    }

    #[test]
    fn prop_unknown_types_are_skipped(kind in "[a-z_]{1,20}", payload in ".{0,32}") {
        prop_assume!(!["welcome", "typing", "message", "user_stopped_typing"].contains(&kind.as_str()));

        let frame = json!({ "type": kind, "payload": payload }).to_string();
        prop_assert_eq!(decode(&frame), Ok(None));
    }

    #[test]
    fn prop_typing_text_survives_decoding(username in ".{0,32}", text in ".{0,64}") {
        let frame = json!({ "type": "typing", "username": username, "text": text, "clientId": "c2" })
            .to_string();

        match decode(&frame) {
            Ok(Some(Inbound::Typing(update))) => {
                prop_assert_eq!(update.username, username);
                prop_assert_eq!(update.text, text);
                prop_assert_eq!(update.client_id.as_deref(), Some("c2"));
            },
            other => prop_assert!(false, "unexpected decode result: {:?}", other),
        }
    }

    #[test]
    fn prop_encoded_frames_carry_type_tag(username in ".{0,32}", text in ".{0,64}", ts in any::<u64>()) {
        let intent = Outbound::Message { username, text, timestamp: ts };
        let frame = encode(&intent).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let value: serde_json::Value = serde_json::from_str(&frame)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(value["type"].as_str(), Some("message"));
        prop_assert_eq!(value["timestamp"].as_u64(), Some(ts));
    }
}

#[test]
fn string_timestamp_is_rejected() {
    let frame = r#"{"type":"message","username":"bob","text":"x","timestamp":"1000"}"#;
    assert!(matches!(decode(frame), Err(ProtocolError::InvalidEnvelope { .. })));
}
