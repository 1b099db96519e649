use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

mod common;
use common::{fixture, revelation};

/// Isolated working area with its own (empty) config home.
struct TestFixture {
    dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    fn command(&self) -> Command {
        let mut cmd =
            Command::cargo_bin("revelation-to-keepassxc").expect("Failed to find binary");
        cmd.env("XDG_CONFIG_HOME", self.path("config"));
        cmd.env_remove("RUST_LOG");
        cmd
    }
}

fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(path).expect("Failed to open csv");
    let headers = rdr.headers().expect("headers").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "group",
            "title",
            "username",
            "password",
            "url",
            "notes",
            "last_modified",
            "created"
        ]
    );
    rdr.records().map(|r| r.expect("row")).collect()
}

#[test]
fn converts_fixture() {
    let fx = TestFixture::new();
    let out = fx.path("out.csv");

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 5 entries"));

    let rows = read_rows(&out);
    assert_eq!(rows.len(), 5);

    assert_eq!(&rows[1][1], "Build box");
    assert_eq!(&rows[1][3], "s3cr3t, \"quoted\"");
    assert_eq!(&rows[1][4], "build.corp.lan");

    let raw = fs::read_to_string(&out).unwrap();
    assert!(raw.contains(
        "\nWork/Servers,Artifacts,deploy,ftppass,ftp.corp.lan:2121,,1583092802,\n"
    ));

    let card = &rows[3];
    assert_eq!(&card[0], "");
    assert_eq!(&card[3], "9999");
    assert_eq!(
        &card[5],
        "Description: Main card\nNotes: Call bank before travel\n\
         Type:   Visa\nNumber: 4111111111111111\nExpiry: 01/30\nCCV:    123\n"
    );
}

#[test]
fn legacy_flag_reproduces_old_notes() {
    let fx = TestFixture::new();
    let out = fx.path("out.csv");

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(&out)
        .arg("--legacy")
        .assert()
        .success();

    let rows = read_rows(&out);
    assert_eq!(
        &rows[3][5],
        "Notes: Call bank before travel\n\
         Type:   Visa\nNumber: 4111111111111111\nType:   01/30\nType:   123\n"
    );
}

#[test]
fn config_file_enables_legacy() {
    let fx = TestFixture::new();
    let out = fx.path("out.csv");
    let cfg = fx.write("config.toml", "legacy = true\n");

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(&out)
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success();

    assert!(read_rows(&out)[3][5].contains("Type:   01/30"));
}

#[test]
fn missing_config_file_is_an_error() {
    let fx = TestFixture::new();

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(fx.path("out.csv"))
        .arg("--config")
        .arg(fx.path("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn no_records_writes_nothing() {
    let fx = TestFixture::new();
    let input = fx.write(
        "empty.xml",
        &revelation(r#"<entry type="folder"><name>Empty</name></entry>"#),
    );
    let out = fx.path("out.csv");

    fx.command()
        .arg(&input)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("No data were imported"));

    assert!(!out.exists());
}

#[test]
fn malformed_entry_fails_without_touching_output() {
    let fx = TestFixture::new();
    let input = fx.write(
        "bad.xml",
        &revelation(
            r#"<entry type="folder"><name>Work</name>
                <entry type="generic"><name>ok</name></entry>
                <entry type="generic"><field id="generic-username">x</field></entry>
            </entry>"#,
        ),
    );
    let out = fx.write("out.csv", "previous export\n");

    fx.command()
        .arg(&input)
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed generic node under 'Work'"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "previous export\n");
    assert_eq!(fs::read_dir(fx.dir.path()).unwrap().count(), 2);
}

#[test]
fn unreadable_input_fails() {
    let fx = TestFixture::new();
    let out = fx.path("out.csv");

    fx.command()
        .arg(fx.path("does-not-exist.xml"))
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.xml"));

    assert!(!out.exists());
}

#[test]
fn repeated_runs_are_byte_identical() {
    let fx = TestFixture::new();
    let first = fx.path("first.csv");
    let second = fx.path("second.csv");

    for out in [&first, &second] {
        fx.command()
            .arg(fixture("sample.xml"))
            .arg(out)
            .arg("--quiet")
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn verbose_logs_folders_and_skipped_entries() {
    let fx = TestFixture::new();

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(fx.path("verbose.csv"))
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Entering folder Work/Servers"))
        .stderr(predicate::str::contains(
            "Skipping entry of unknown type \"note\" in Work",
        ));

    fx.command()
        .arg(fixture("sample.xml"))
        .arg(fx.path("plain.csv"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Entering folder").not());
}
