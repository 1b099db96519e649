use serde::Serialize;

use crate::flatten::FolderPath;
use crate::kinds::Credentials;

/// One KeePassXC CSV row. Field order is the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub group: String,
    pub title: String,
    pub username: String,
    pub password: String,
    pub url: String,
    pub notes: String,
    pub last_modified: String,
    created: String,
}

impl Record {
    pub const HEADERS: [&'static str; 8] = [
        "group",
        "title",
        "username",
        "password",
        "url",
        "notes",
        "last_modified",
        "created",
    ];

    pub fn new(
        path: &FolderPath,
        title: String,
        credentials: Credentials,
        notes: String,
        last_modified: String,
    ) -> Self {
        Self {
            group: path.joined(),
            title,
            username: credentials.username,
            password: credentials.password,
            url: credentials.url,
            notes,
            last_modified,
            created: String::new(),
        }
    }

    /// Revelation has no creation timestamp, so this is always empty.
    pub fn created(&self) -> &str {
        &self.created
    }
}
