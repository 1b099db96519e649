//! The closed set of Revelation entry types and how each one maps onto the
//! KeePassXC columns.

use std::fmt;

use crate::flatten::FieldMap;

/// Revelation field identifiers.
pub mod field {
    pub const HOSTNAME: &str = "generic-hostname";
    pub const USERNAME: &str = "generic-username";
    pub const PASSWORD: &str = "generic-password";
    pub const CERTIFICATE: &str = "generic-certificate";
    pub const KEYFILE: &str = "generic-keyfile";
    pub const DATABASE: &str = "generic-database";
    pub const LOCATION: &str = "generic-location";
    pub const CODE: &str = "generic-code";
    pub const EMAIL: &str = "generic-email";
    pub const PORT: &str = "generic-port";
    pub const DOMAIN: &str = "generic-domain";
    pub const URL: &str = "generic-url";
    pub const PIN: &str = "generic-pin";
    pub const CARD_TYPE: &str = "creditcard-cardtype";
    pub const CARD_NUMBER: &str = "creditcard-cardnumber";
    pub const CARD_EXPIRY: &str = "creditcard-expirydate";
    pub const CARD_CCV: &str = "creditcard-ccv";
    pub const PHONE_NUMBER: &str = "phone-phonenumber";
}

use field::*;

/// Whether to reproduce the quirks of the legacy converter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compat {
    /// Keep description and notes, label card lines correctly, skip empty
    /// `:port` / `.domain` suffixes.
    #[default]
    Standard,
    /// Notes overwrite the description line, card expiry and CCV are both
    /// labelled `Type:`, suffixes are always joined.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryKind {
    Generic,
    CreditCard,
    CryptoKey,
    Database,
    Door,
    Email,
    Ftp,
    Phone,
    Shell,
    RemoteDesktop,
    Vnc,
    Website,
}

/// The username/password/url triple every kind reduces to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub url: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str, url: impl Into<String>) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            url: url.into(),
        }
    }
}

impl EntryKind {
    pub const ALL: [EntryKind; 12] = [
        EntryKind::Generic,
        EntryKind::CreditCard,
        EntryKind::CryptoKey,
        EntryKind::Database,
        EntryKind::Door,
        EntryKind::Email,
        EntryKind::Ftp,
        EntryKind::Phone,
        EntryKind::Shell,
        EntryKind::RemoteDesktop,
        EntryKind::Vnc,
        EntryKind::Website,
    ];

    /// `None` for anything outside the known set, including `folder`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Generic => "generic",
            EntryKind::CreditCard => "creditcard",
            EntryKind::CryptoKey => "cryptokey",
            EntryKind::Database => "database",
            EntryKind::Door => "door",
            EntryKind::Email => "email",
            EntryKind::Ftp => "ftp",
            EntryKind::Phone => "phone",
            EntryKind::Shell => "shell",
            EntryKind::RemoteDesktop => "remotedesktop",
            EntryKind::Vnc => "vnc",
            EntryKind::Website => "website",
        }
    }

    /// Field ids this kind reads, in Revelation's declaration order.
    pub fn field_ids(self) -> &'static [&'static str] {
        self.layout().ids
    }

    pub fn layout(self) -> &'static Layout {
        match self {
            EntryKind::Generic => &GENERIC,
            EntryKind::CreditCard => &CREDIT_CARD,
            EntryKind::CryptoKey => &CRYPTO_KEY,
            EntryKind::Database => &DATABASE_LAYOUT,
            EntryKind::Door => &DOOR,
            EntryKind::Email => &EMAIL_LAYOUT,
            EntryKind::Ftp | EntryKind::RemoteDesktop | EntryKind::Vnc => &HOST_PORT,
            EntryKind::Phone => &PHONE,
            EntryKind::Shell => &SHELL,
            EntryKind::Website => &WEBSITE,
        }
    }

    /// Reduce the kind-specific fields to credentials, appending any extra
    /// lines to `notes`.
    pub fn compose(
        self,
        fields: &FieldMap<'_>,
        notes: &mut String,
        compat: Compat,
    ) -> Credentials {
        let layout = self.layout();
        for line in layout.notes {
            line.append(fields, notes, compat);
        }
        Credentials {
            username: layout.username.resolve(fields, compat),
            password: layout.password.resolve(fields, compat),
            url: layout.url.resolve(fields, compat),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-kind layouts
// ---------------------------------------------------------------------------

/// Where one KeePassXC column takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Empty,
    Field(&'static str),
    /// `base`, separator, `suffix`, e.g. `host:port`.
    Join(&'static str, char, &'static str),
}

impl Column {
    fn resolve(self, fields: &FieldMap<'_>, compat: Compat) -> String {
        match self {
            Column::Empty => String::new(),
            Column::Field(id) => fields.get(id).to_string(),
            Column::Join(base, sep, suffix) => {
                let (base, suffix) = (fields.get(base), fields.get(suffix));
                if suffix.is_empty() && compat == Compat::Standard {
                    base.to_string()
                } else {
                    format!("{base}{sep}{suffix}")
                }
            }
        }
    }

    fn field_ids(self) -> Vec<&'static str> {
        match self {
            Column::Empty => vec![],
            Column::Field(id) => vec![id],
            Column::Join(base, _, suffix) => vec![base, suffix],
        }
    }
}

/// An extra line a kind appends to the synthesized notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLine {
    /// `label` immediately followed by the value and `\n`.
    Labelled {
        label: &'static str,
        legacy_label: &'static str,
        id: &'static str,
    },
    /// `\n` followed by the raw value.
    Trailing(&'static str),
}

impl NoteLine {
    const fn labelled(label: &'static str, id: &'static str) -> Self {
        NoteLine::Labelled {
            label,
            legacy_label: label,
            id,
        }
    }

    fn append(self, fields: &FieldMap<'_>, notes: &mut String, compat: Compat) {
        match self {
            NoteLine::Labelled {
                label,
                legacy_label,
                id,
            } => {
                let label = match compat {
                    Compat::Standard => label,
                    Compat::Legacy => legacy_label,
                };
                notes.push_str(&format!("{label}{}\n", fields.get(id)));
            }
            NoteLine::Trailing(id) => {
                notes.push('\n');
                notes.push_str(fields.get(id));
            }
        }
    }

    fn field_id(self) -> &'static str {
        match self {
            NoteLine::Labelled { id, .. } | NoteLine::Trailing(id) => id,
        }
    }
}

/// Everything that distinguishes one entry kind from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub ids: &'static [&'static str],
    pub username: Column,
    pub password: Column,
    pub url: Column,
    pub notes: &'static [NoteLine],
}

impl Layout {
    /// Ids the columns and note lines read; all of them must be in `ids`.
    pub fn referenced_ids(&self) -> Vec<&'static str> {
        let mut ids = self.username.field_ids();
        ids.extend(self.password.field_ids());
        ids.extend(self.url.field_ids());
        ids.extend(self.notes.iter().map(|line| line.field_id()));
        ids
    }
}

static GENERIC: Layout = Layout {
    ids: &[HOSTNAME, USERNAME, PASSWORD],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Field(HOSTNAME),
    notes: &[],
};

static CREDIT_CARD: Layout = Layout {
    ids: &[CARD_TYPE, CARD_NUMBER, CARD_EXPIRY, CARD_CCV, PIN],
    username: Column::Empty,
    password: Column::Field(PIN),
    url: Column::Empty,
    notes: &[
        NoteLine::labelled("Type:   ", CARD_TYPE),
        NoteLine::labelled("Number: ", CARD_NUMBER),
        NoteLine::Labelled {
            label: "Expiry: ",
            legacy_label: "Type:   ",
            id: CARD_EXPIRY,
        },
        NoteLine::Labelled {
            label: "CCV:    ",
            legacy_label: "Type:   ",
            id: CARD_CCV,
        },
    ],
};

static CRYPTO_KEY: Layout = Layout {
    ids: &[HOSTNAME, CERTIFICATE, KEYFILE, PASSWORD],
    username: Column::Empty,
    password: Column::Field(PASSWORD),
    url: Column::Field(HOSTNAME),
    notes: &[
        NoteLine::labelled("Cert: ", CERTIFICATE),
        NoteLine::labelled("Key:  ", KEYFILE),
    ],
};

static DATABASE_LAYOUT: Layout = Layout {
    ids: &[HOSTNAME, USERNAME, PASSWORD, DATABASE],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Field(HOSTNAME),
    notes: &[NoteLine::labelled("Database: ", DATABASE)],
};

static DOOR: Layout = Layout {
    ids: &[LOCATION, CODE],
    username: Column::Field(LOCATION),
    password: Column::Field(CODE),
    url: Column::Empty,
    notes: &[],
};

// generic-email is the mailbox address; KeePassXC has no column for it.
static EMAIL_LAYOUT: Layout = Layout {
    ids: &[EMAIL, HOSTNAME, USERNAME, PASSWORD],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Field(HOSTNAME),
    notes: &[],
};

static HOST_PORT: Layout = Layout {
    ids: &[HOSTNAME, PORT, USERNAME, PASSWORD],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Join(HOSTNAME, ':', PORT),
    notes: &[],
};

static PHONE: Layout = Layout {
    ids: &[PHONE_NUMBER, PIN],
    username: Column::Field(PHONE_NUMBER),
    password: Column::Field(PIN),
    url: Column::Empty,
    notes: &[],
};

static SHELL: Layout = Layout {
    ids: &[HOSTNAME, DOMAIN, USERNAME, PASSWORD],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Join(HOSTNAME, '.', DOMAIN),
    notes: &[],
};

static WEBSITE: Layout = Layout {
    ids: &[URL, USERNAME, EMAIL, PASSWORD],
    username: Column::Field(USERNAME),
    password: Column::Field(PASSWORD),
    url: Column::Field(URL),
    notes: &[NoteLine::Trailing(EMAIL)],
};
