//! Property-based tests for hub events

use chrono::Utc;
use cloudboard::shared::event::{NodePositionPayload, RemovalPayload};
use cloudboard::shared::HubEvent;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_position_event_survives_invocation_wire_form(
        node_id in "[a-z0-9-]{1,36}",
        x in (-4_000_000i32..4_000_000).prop_map(|v| f64::from(v) / 4.0),
        y in (-4_000_000i32..4_000_000).prop_map(|v| f64::from(v) / 4.0),
        user_id in "[a-zA-Z0-9]{1,20}",
    ) {
        let event = HubEvent::NodePositionUpdated(NodePositionPayload {
            node_id,
            x,
            y,
            user_id,
            timestamp: Utc::now(),
        });
        let rebuilt = HubEvent::from_invocation(event.target(), event.payload().unwrap()).unwrap();
        prop_assert_eq!(rebuilt, event);
    }

    #[test]
    fn test_removal_events_expose_their_board(board_id in "[0-9a-f]{8,32}", entity_id in "[0-9a-f]{8,32}") {
        let payload = RemovalPayload {
            board_id: board_id.clone(),
            entity_id,
            user_id: "u".to_string(),
            timestamp: Utc::now(),
        };
        for event in [
            HubEvent::NodeDeleted(payload.clone()),
            HubEvent::ConnectionDeleted(payload.clone()),
            HubEvent::CloudBoardDeleted(payload),
        ] {
            prop_assert_eq!(event.board_id(), Some(board_id.as_str()));
        }
    }

    #[test]
    fn test_unknown_targets_rejected(target in "[A-Z][a-z]{3,12}Happened") {
        let parsed = HubEvent::from_invocation(&target, serde_json::json!({}));
        prop_assert!(parsed.is_err(), "unknown target {} was accepted", target);
    }
}
