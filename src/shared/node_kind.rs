/**
 * Node Kinds
 *
 * Every node on a board carries exactly one typed body. The body is a tagged
 * union with an explicit schema per variant, serialized adjacently:
 *
 * ```json
 * { "type": "CodeBlock", "properties": { "language": "rust", "code": "fn main() {}" } }
 * ```
 *
 * In the database the tag and the properties live in two columns
 * (`node_type`, `properties`); `NodeKind::from_parts` and
 * `NodeKind::properties_json` convert between the two representations.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Tag values accepted for `NodeKind`, in declaration order
pub const NODE_TYPES: [&str; 5] = ["Note", "Card", "LinkCollection", "ImageNode", "CodeBlock"];

/// The typed body of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "properties")]
pub enum NodeKind {
    /// Free text sticky note
    Note(NoteProperties),
    /// Titled card with an optional description
    Card(CardProperties),
    /// A list of links
    LinkCollection(LinkCollectionProperties),
    /// An image referenced by url
    ImageNode(ImageNodeProperties),
    /// A snippet of source code
    CodeBlock(CodeBlockProperties),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoteProperties {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardProperties {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LinkCollectionProperties {
    #[serde(default)]
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Link {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImageNodeProperties {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeBlockProperties {
    pub language: String,
    #[serde(default)]
    pub code: String,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Note(NoteProperties::default())
    }
}

impl NodeKind {
    /// The tag stored in the `node_type` column
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Note(_) => "Note",
            NodeKind::Card(_) => "Card",
            NodeKind::LinkCollection(_) => "LinkCollection",
            NodeKind::ImageNode(_) => "ImageNode",
            NodeKind::CodeBlock(_) => "CodeBlock",
        }
    }

    /// Serialize only the properties object (without the tag)
    pub fn properties_json(&self) -> Result<String, SharedError> {
        let properties = match self {
            NodeKind::Note(p) => serde_json::to_string(p)?,
            NodeKind::Card(p) => serde_json::to_string(p)?,
            NodeKind::LinkCollection(p) => serde_json::to_string(p)?,
            NodeKind::ImageNode(p) => serde_json::to_string(p)?,
            NodeKind::CodeBlock(p) => serde_json::to_string(p)?,
        };
        Ok(properties)
    }

    /// Rebuild a kind from the stored tag and properties document
    ///
    /// # Errors
    ///
    /// * `UnknownVariant` - if `type_name` is not one of [`NODE_TYPES`]
    /// * `SerializationError` - if the properties do not match the variant's schema
    pub fn from_parts(type_name: &str, properties: &str) -> Result<Self, SharedError> {
        if !NODE_TYPES.contains(&type_name) {
            return Err(SharedError::unknown_variant("node type", type_name));
        }
        let properties: serde_json::Value = serde_json::from_str(properties)?;
        let tagged = serde_json::json!({ "type": type_name, "properties": properties });
        Ok(serde_json::from_value(tagged)?)
    }

    /// Check constraints that the schema alone cannot express
    pub fn validate(&self) -> Result<(), SharedError> {
        match self {
            NodeKind::Card(card) if card.title.trim().is_empty() => {
                Err(SharedError::validation("title", "Card title cannot be empty"))
            }
            NodeKind::ImageNode(image) if image.url.trim().is_empty() => {
                Err(SharedError::validation("url", "Image url cannot be empty"))
            }
            NodeKind::CodeBlock(block) if block.language.trim().is_empty() => {
                Err(SharedError::validation("language", "Code block language cannot be empty"))
            }
            NodeKind::LinkCollection(collection) => {
                match collection.links.iter().position(|link| link.url.trim().is_empty()) {
                    Some(index) => Err(SharedError::validation(
                        format!("links[{}].url", index),
                        "Link url cannot be empty",
                    )),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}
