//! Integration tests for Umlify
//!
//! These tests drive the built binary against declaration set files on disk.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};

use base64::Engine;
use base64::alphabet::Alphabet;
use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::NO_PAD;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use tempfile::TempDir;

const ZOO_JSON: &str = r#"{
    "package": "github.com/acme/zoo",
    "types": [
        {
            "id": {"package": "github.com/acme/zoo", "name": "Animal"},
            "exported": true,
            "shape": {"kind": "interface", "methods": [
                {"name": "Cry", "exported": true, "results": [{"type": {"kind": "builtin", "name": "string"}}]}
            ]}
        },
        {
            "id": {"package": "github.com/acme/zoo", "name": "Cat"},
            "exported": true,
            "shape": {"kind": "struct", "fields": [
                {"name": "Toy", "exported": true,
                 "type": {"kind": "pointer", "elem": {"kind": "named", "id": {"package": "github.com/acme/toys", "name": "Ball"}}}}
            ]},
            "methods": [
                {"name": "Cry", "exported": true, "results": [{"type": {"kind": "builtin", "name": "string"}}]}
            ]
        }
    ]
}"#;

const TOYS_YAML: &str = "\
package: github.com/acme/toys
types:
  - id: {package: github.com/acme/toys, name: Ball}
    exported: true
    shape: {kind: basic}
constants:
  - name: Red
    owner: {package: github.com/acme/toys, name: Ball}
  - name: Blue
    owner: {package: github.com/acme/toys, name: Ball}
";

fn engine() -> GeneralPurpose {
    let alphabet =
        Alphabet::new("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_").unwrap();
    GeneralPurpose::new(&alphabet, NO_PAD)
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let decls = dir.path().join("decls");
    fs::create_dir(&decls).unwrap();
    fs::write(decls.join("zoo.json"), ZOO_JSON).unwrap();
    fs::write(decls.join("toys.yaml"), TOYS_YAML).unwrap();
    dir
}

fn umlify(cwd: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_umlify"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run umlify");
    assert!(
        output.status.success(),
        "umlify {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let output = umlify(dir.path(), &["--help"]);
    assert!(stdout(&output).contains("Class diagrams from resolved type declarations"));
}

#[test]
fn test_render_writes_document() {
    let dir = workspace();
    let output = umlify(dir.path(), &["render", "-i", "decls", "-o", "out/zoo.puml"]);
    assert_eq!(stdout(&output), "out/zoo.puml");

    let doc = fs::read_to_string(dir.path().join("out/zoo.puml")).unwrap();
    assert!(doc.starts_with("@startuml\n"));
    assert!(doc.ends_with("@enduml\n"));
    assert!(doc.contains("\tinterface \"Animal\" as zoo.Animal {\n"));
    assert!(doc.contains("\t\t+Toy: *toys.Ball\n"));
    assert!(doc.contains("\nzoo.Cat --> toys.Ball\n"));
    assert!(doc.contains("\nzoo.Cat --|> zoo.Animal\n"));
    assert!(doc.contains("\tnote as N_toys_Ball\n\t\t<b>Ball</b>\n\t\tBlue\n\t\tRed\n\tend note\n"));
    assert!(doc.contains("\nN_toys_Ball --> toys.Ball\n"));
}

#[test]
fn test_render_uses_configured_output_path() {
    let dir = workspace();
    fs::write(dir.path().join("umlify.toml"), "[output]\npath = \"diagram.puml\"\n").unwrap();

    let output = umlify(dir.path(), &["render", "-i", "decls"]);
    assert_eq!(stdout(&output), "diagram.puml");
    assert!(dir.path().join("diagram.puml").exists());
}

#[test]
fn test_encode_matches_rendered_document() {
    let dir = workspace();
    umlify(dir.path(), &["render", "-i", "decls", "-o", "zoo.puml"]);
    let doc = fs::read_to_string(dir.path().join("zoo.puml")).unwrap();

    let encoded = stdout(&umlify(dir.path(), &["encode", "-i", "decls"]));
    assert_eq!(encoded.len() % 4, 0);

    let bytes = engine().decode(&encoded).unwrap();
    let mut inflated = String::new();
    DeflateDecoder::new(&bytes[..]).read_to_string(&mut inflated).unwrap();
    assert_eq!(inflated, doc.replace('\t', ""));

    let again = stdout(&umlify(dir.path(), &["encode", "-i", "decls"]));
    assert_eq!(again, encoded);
}

#[test]
fn test_encode_zlib_framing() {
    let dir = workspace();
    let encoded = stdout(&umlify(dir.path(), &["encode", "--zlib", "-i", "decls"]));
    assert!(encoded.starts_with("UD"));

    let bytes = engine().decode(&encoded).unwrap();
    let mut inflated = String::new();
    ZlibDecoder::new(&bytes[..]).read_to_string(&mut inflated).unwrap();
    assert!(inflated.starts_with("@startuml\n"));
}

#[test]
fn test_url_uses_server_config() {
    let dir = workspace();
    fs::write(
        dir.path().join("custom.toml"),
        "[server]\nurl = \"http://localhost:8080/plantuml\"\nformat = \"png\"\n",
    )
    .unwrap();

    let encoded = stdout(&umlify(dir.path(), &["encode", "-i", "decls"]));
    let url = stdout(&umlify(dir.path(), &["--config", "custom.toml", "url", "-i", "decls"]));
    assert_eq!(url, format!("http://localhost:8080/plantuml/png/{encoded}"));
}

#[test]
fn test_excluded_package_drops_its_edges() {
    let dir = workspace();
    fs::write(dir.path().join("umlify.toml"), "[filter]\nexclude = [\"**/toys\"]\n").unwrap();

    umlify(dir.path(), &["render", "-i", "decls", "-o", "zoo.puml"]);
    let doc = fs::read_to_string(dir.path().join("zoo.puml")).unwrap();
    assert!(!doc.contains("class \"Ball\""));
    assert!(!doc.contains("--> toys.Ball"));
    assert!(doc.contains("\t\t+Toy: *toys.Ball\n"));
    assert!(doc.contains("zoo.Cat --|> zoo.Animal"));
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_umlify"))
        .args(["encode", "-i", "bad.json"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.json"));
}
