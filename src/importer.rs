//! Owned node tree for a Revelation XML export.
//!
//! Revelation writes its (decrypted) export as:
//! ```xml
//! <revelationdata version="0.4.14" dataversion="1">
//!     <entry type="folder">
//!         <name>Work</name>
//!         <description>...</description>
//!         <updated>1583092800</updated>
//!         <entry type="generic">
//!             <name>VPN</name>
//!             <description>...</description>
//!             <notes>...</notes>
//!             <updated>1583092800</updated>
//!             <field id="generic-hostname">vpn.co</field>
//!             <field id="generic-username">u</field>
//!             <field id="generic-password">p</field>
//!         </entry>
//!     </entry>
//! </revelationdata>
//! ```
//!
//! A bare `<folder>` element with a `<name>` child is accepted as a folder too.
//! The root element itself is never a folder.
use std::fs;
use std::path::Path;

use crate::error::{ConvertError, Result};

// ---------------------------------------------------------------------------
// Tree types
// ---------------------------------------------------------------------------

/// The parsed export: the top-level nodes directly under the root element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Folder(Folder),
    Entry(Entry),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Folder {
    pub name: Option<String>,
    pub children: Vec<Node>,
}

/// A leaf credential record. `kind` is the raw `type` attribute; it is only
/// interpreted when the flattener dispatches on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub kind: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub updated: Option<String>,
    /// Document order, duplicates kept.
    pub fields: Vec<Field>,
}

/// `<field id="...">text</field>`. `value` is `None` when the element is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub value: Option<String>,
}

impl Field {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Some(value.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Read and parse an export file from disk.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&content).map_err(|source| ConvertError::Xml {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_document(xml: &str) -> std::result::Result<Document, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(Document {
        nodes: collect_nodes(doc.root_element()),
    })
}

fn collect_nodes(parent: roxmltree::Node<'_, '_>) -> Vec<Node> {
    parent
        .children()
        .filter(|n| n.is_element())
        .filter_map(|n| match n.tag_name().name() {
            "folder" => Some(Node::Folder(read_folder(n))),
            "entry" if n.attribute("type") == Some("folder") => {
                Some(Node::Folder(read_folder(n)))
            }
            "entry" => Some(Node::Entry(read_entry(n))),
            _ => None,
        })
        .collect()
}

fn read_folder(node: roxmltree::Node<'_, '_>) -> Folder {
    Folder {
        name: child_name(node),
        children: collect_nodes(node),
    }
}

fn read_entry(node: roxmltree::Node<'_, '_>) -> Entry {
    let fields = node
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "field")
        .map(|n| Field {
            id: n.attribute("id").unwrap_or_default().to_string(),
            value: n.text().map(str::to_string),
        })
        .collect();

    Entry {
        kind: node.attribute("type").map(str::to_string),
        name: child_name(node),
        description: child_text(node, "description"),
        notes: child_text(node, "notes"),
        updated: child_text(node, "updated"),
        fields,
    }
}

/// `<name>` is only absent when the element is; `<name></name>` is an empty
/// name.
fn child_name(node: roxmltree::Node<'_, '_>) -> Option<String> {
    child_element(node, "name").map(|n| n.text().unwrap_or_default().to_string())
}

fn child_element<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Option<roxmltree::Node<'a, 'input>> {
    node.children().find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// Text of the first child element named `tag`; `None` if the element is
/// missing or has no text.
fn child_text(node: roxmltree::Node<'_, '_>, tag: &str) -> Option<String> {
    child_element(node, tag)
        .and_then(|n| n.text())
        .map(str::to_string)
}
