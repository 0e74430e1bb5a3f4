//! Property-based tests for node kinds and their storage form

use cloudboard::shared::board::validate_position;
use cloudboard::shared::node_kind::{
    CardProperties, CodeBlockProperties, ImageNodeProperties, Link, LinkCollectionProperties,
    NoteProperties, NODE_TYPES,
};
use cloudboard::shared::NodeKind;
use proptest::prelude::*;

fn optional_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9 #]{0,40}")
}

fn node_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        ("[a-zA-Z0-9 .,!?]{0,80}", optional_text())
            .prop_map(|(text, color)| NodeKind::Note(NoteProperties { text, color })),
        ("[a-zA-Z ]{1,30}", optional_text(), optional_text()).prop_map(|(title, description, color)| {
            NodeKind::Card(CardProperties { title, description, color })
        }),
        proptest::collection::vec(("[a-z]{1,10}", "https://[a-z]{1,10}\\.com"), 0..5).prop_map(|links| {
            NodeKind::LinkCollection(LinkCollectionProperties {
                links: links.into_iter().map(|(title, url)| Link { title, url }).collect(),
            })
        }),
        ("https://[a-z]{1,10}\\.png", optional_text(), optional_text()).prop_map(|(url, alt_text, caption)| {
            NodeKind::ImageNode(ImageNodeProperties { url, alt_text, caption })
        }),
        ("[a-z]{1,10}", "[a-z0-9 (){};=\n]{0,120}")
            .prop_map(|(language, code)| NodeKind::CodeBlock(CodeBlockProperties { language, code })),
    ]
}

proptest! {
    #[test]
    fn test_storage_columns_rebuild_the_kind(kind in node_kind()) {
        let properties = kind.properties_json().unwrap();
        let rebuilt = NodeKind::from_parts(kind.type_name(), &properties).unwrap();
        prop_assert_eq!(rebuilt, kind);
    }

    #[test]
    fn test_type_name_is_a_known_tag(kind in node_kind()) {
        prop_assert!(NODE_TYPES.contains(&kind.type_name()));
    }

    #[test]
    fn test_unknown_type_names_rejected(name in "[A-Za-z]{1,16}") {
        prop_assume!(!NODE_TYPES.contains(&name.as_str()));
        let parsed = NodeKind::from_parts(&name, "{}");
        prop_assert!(parsed.is_err(), "unknown node type {} was accepted", name);
    }

    #[test]
    fn test_finite_positions_accepted(x in proptest::num::f64::NORMAL, y in proptest::num::f64::NORMAL) {
        prop_assert!(validate_position(x, y).is_ok());
    }

    #[test]
    fn test_non_finite_positions_rejected(x in -1.0e3f64..1.0e3) {
        prop_assert!(validate_position(x, f64::NAN).is_err());
        prop_assert!(validate_position(f64::INFINITY, x).is_err());
    }
}
