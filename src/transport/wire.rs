//! # Wire Format
//!
//! One notification as it crosses a channel: a JSON text frame with an
//! action tag and an untyped payload. The payload stays a
//! [`serde_json::Value`] here; the channel worker decodes it into the
//! feed's payload type before dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::relay::ChangeAction;

/// A single decoded channel frame.
///
/// ```json
/// {"event": "create", "data": {"text": "hi"}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeFrame {
    /// Which lifecycle action the frame announces.
    pub event: ChangeAction,
    /// Raw payload, decoded per feed by the channel worker.
    pub data: Value,
}

impl ChangeFrame {
    /// Parse a text frame. Unknown action tags and non-JSON input are
    /// both rejected.
    pub fn parse(text: &str) -> Result<ChangeFrame, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_accepts_each_action_tag() {
        for (raw, action) in [
            ("create", ChangeAction::Create),
            ("update", ChangeAction::Update),
            ("delete", ChangeAction::Delete),
        ] {
            let text = json!({"event": raw, "data": {"text": "hi"}}).to_string();
            let frame = ChangeFrame::parse(&text).unwrap();
            assert_eq!(frame.event, action);
            assert_eq!(frame.data["text"], "hi");
        }
    }

    #[test]
    fn test_parse_rejects_unknown_action_tag() {
        let text = json!({"event": "upsert", "data": {}}).to_string();
        assert!(ChangeFrame::parse(&text).is_err());
    }

    #[test]
    fn test_parse_rejects_non_json_input() {
        assert!(ChangeFrame::parse("not json at all").is_err());
        assert!(ChangeFrame::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let text = json!({"event": "create"}).to_string();
        assert!(ChangeFrame::parse(&text).is_err());

        let text = json!({"data": {"text": "hi"}}).to_string();
        assert!(ChangeFrame::parse(&text).is_err());
    }
}
