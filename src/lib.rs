//! # revelation-to-keepassxc
//!
//! Converts a Revelation password export into a CSV file that KeePassXC's
//! CSV importer understands.
//!
//! ## What it does
//!
//! Revelation exports its database as a nested tree of folders and typed
//! entries (`generic`, `creditcard`, `website`, ...). Each entry type has its
//! own set of fields. KeePassXC imports flat rows with a fixed set of columns:
//!
//! ```text
//! group,title,username,password,url,notes,last_modified,created
//! ```
//!
//! The tree is walked depth-first. Folder names become the `/`-joined `group`
//! column, and each known entry type is reduced to username, password and URL,
//! with whatever doesn't fit appended to `notes`. Entries of unknown types are
//! skipped.
//!
//! The output is rendered to a temporary file and renamed into place, so a
//! failed run never leaves a partial CSV behind.
//!
//! ## Usage
//!
//! ```sh
//! revelation-to-keepassxc export.xml keepassxc.csv
//!
//! # Match the legacy converter's notes and URL formatting
//! revelation-to-keepassxc export.xml keepassxc.csv --legacy
//! ```
//!
//! Preferences can be persisted in `~/.config/revelation-to-keepassxc/config.toml`.
//!
//! The CSV contains every password in plain text. Import it and delete it.
pub mod convert;
pub mod error;
pub mod exporter;
pub mod flatten;
pub mod importer;
pub mod kinds;
pub mod record;
pub mod utils;

pub use convert::execute;
pub use error::ConvertError;
pub use flatten::{FolderPath, flatten};
pub use importer::{Document, parse_document, read_document};
pub use kinds::{Compat, EntryKind};
pub use record::Record;
pub use utils::{ConvertConfig, ConvertOutcome};
