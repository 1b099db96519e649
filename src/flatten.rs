//! Depth-first walk that turns the Revelation tree into flat KeePassXC rows.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use log::info;

use crate::error::{ConvertError, Result};
use crate::importer::{Document, Entry, Node};
use crate::kinds::{Compat, EntryKind};
use crate::record::Record;

// ---------------------------------------------------------------------------
// Folder path
// ---------------------------------------------------------------------------

/// Ancestor folder names from the root down to the current node.
///
/// Immutable: descending into a folder builds an extended copy with
/// [`FolderPath::child`], so a sibling subtree can never observe a name
/// pushed by an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderPath(Vec<String>);

impl FolderPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// KeePassXC group column value.
    pub fn joined(&self) -> String {
        self.0.join("/")
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.joined())
        }
    }
}

// ---------------------------------------------------------------------------
// Field lookup
// ---------------------------------------------------------------------------

/// Identifier-keyed view over an entry's fields, restricted to the ids a
/// kind asked for. The first occurrence of an id wins; missing ids and empty
/// fields read as `""`.
#[derive(Debug, Default)]
pub struct FieldMap<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> FieldMap<'a> {
    pub fn new(entry: &'a Entry, requested: &[&str]) -> Self {
        let mut values = HashMap::new();
        for field in &entry.fields {
            if requested.contains(&field.id.as_str()) {
                values
                    .entry(field.id.as_str())
                    .or_insert(field.value.as_deref().unwrap_or(""));
            }
        }
        Self { values }
    }

    pub fn get(&self, id: &str) -> &'a str {
        self.values.get(id).copied().unwrap_or("")
    }
}

/// Values of `ids` on `entry`, in the order of `ids`. Always `ids.len()` long.
pub fn map_fields<'a>(entry: &'a Entry, ids: &[&str]) -> Vec<&'a str> {
    let fields = FieldMap::new(entry, ids);
    ids.iter().map(|id| fields.get(id)).collect()
}

// ---------------------------------------------------------------------------
// Common fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Common {
    pub name: String,
    pub notes: String,
    pub last_modified: String,
}

pub fn parse_common(
    entry: &Entry,
    kind: EntryKind,
    path: &FolderPath,
    compat: Compat,
) -> Result<Common> {
    let name = entry
        .name
        .clone()
        .ok_or_else(|| malformed(path, kind.as_str(), "entry has no <name>"))?;

    Ok(Common {
        name,
        notes: synthesize_notes(
            entry.description.as_deref(),
            entry.notes.as_deref(),
            compat,
        ),
        last_modified: entry.updated.clone().unwrap_or_default(),
    })
}

pub fn synthesize_notes(
    description: Option<&str>,
    notes: Option<&str>,
    compat: Compat,
) -> String {
    let mut out = String::new();
    if let Some(description) = description {
        out.push_str(&format!("Description: {description}\n"));
    }
    if let Some(notes) = notes {
        if compat == Compat::Legacy {
            out.clear();
        }
        out.push_str(&format!("Notes: {notes}\n"));
    }
    out
}

/// Convert one typed leaf entry into its output row.
pub fn convert_entry(
    entry: &Entry,
    kind: EntryKind,
    path: &FolderPath,
    compat: Compat,
) -> Result<Record> {
    let Common {
        name,
        mut notes,
        last_modified,
    } = parse_common(entry, kind, path, compat)?;
    let fields = FieldMap::new(entry, kind.field_ids());
    let credentials = kind.compose(&fields, &mut notes, compat);
    Ok(Record::new(path, name, credentials, notes, last_modified))
}

fn malformed(path: &FolderPath, kind: &str, reason: &str) -> ConvertError {
    ConvertError::MalformedNode {
        path: path.to_string(),
        kind: kind.to_string(),
        reason: reason.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenStats {
    pub records: usize,
    pub folders: usize,
    /// Unknown `type` values and how many entries carried each.
    pub skipped: BTreeMap<String, usize>,
}

impl FlattenStats {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub records: Vec<Record>,
    pub stats: FlattenStats,
}

/// Flatten a whole document. Fails on the first malformed node.
pub fn flatten(document: &Document, compat: Compat) -> Result<Flattened> {
    let mut out = Flattened::default();
    let root = FolderPath::root();
    for node in &document.nodes {
        walk(node, &root, compat, &mut out)?;
    }
    out.stats.records = out.records.len();

    info!(
        "Flattened {} entries from {} folders ({} skipped)",
        out.stats.records,
        out.stats.folders,
        out.stats.skipped_total()
    );
    Ok(out)
}

/// Records for the subtree rooted at `node`, in document order.
pub fn flatten_node(node: &Node, path: &FolderPath, compat: Compat) -> Result<Vec<Record>> {
    let mut out = Flattened::default();
    walk(node, path, compat, &mut out)?;
    Ok(out.records)
}

fn walk(node: &Node, path: &FolderPath, compat: Compat, out: &mut Flattened) -> Result<()> {
    match node {
        Node::Folder(folder) => {
            let name = folder
                .name
                .as_deref()
                .ok_or_else(|| malformed(path, "folder", "folder has no <name>"))?;
            let path = path.child(name);
            info!("Entering folder {path}");
            out.stats.folders += 1;
            for child in &folder.children {
                walk(child, &path, compat, out)?;
            }
        }
        Node::Entry(entry) => {
            let Some(raw_kind) = entry.kind.as_deref() else {
                return Err(malformed(path, "entry", "entry has no type attribute"));
            };
            match EntryKind::parse(raw_kind) {
                Some(kind) => out.records.push(convert_entry(entry, kind, path, compat)?),
                None => {
                    info!("Skipping entry of unknown type {raw_kind:?} in {path}");
                    *out.stats.skipped.entry(raw_kind.to_string()).or_default() += 1;
                }
            }
        }
    }
    Ok(())
}
