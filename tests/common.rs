//! Shared test helpers

#![allow(dead_code)]

use std::path::PathBuf;

use revelation_to_keepassxc::{Compat, Record, flatten, parse_document};

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Wrap `body` in a Revelation root element.
pub fn revelation(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" ?>
<revelationdata version="0.4.14" dataversion="1">{body}</revelationdata>"#
    )
}

pub fn convert(body: &str) -> Vec<Record> {
    convert_with(body, Compat::Standard)
}

pub fn convert_with(body: &str, compat: Compat) -> Vec<Record> {
    let doc = parse_document(&revelation(body)).expect("valid xml");
    flatten(&doc, compat).expect("flatten").records
}
