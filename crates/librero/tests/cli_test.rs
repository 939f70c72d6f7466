//! Integration tests for the `librero` CLI binary.
//!
//! These tests validate argument parsing, help output, and end-to-end
//! behavior against a wiremock server — no real book server required.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `librero` binary with env isolation.
///
/// Clears all `LIBRERO_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn librero_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("librero");
    cmd.env("HOME", "/tmp/librero-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/librero-cli-test-nonexistent")
        .env_remove("LIBRERO_SERVER_URL")
        .env_remove("LIBRERO_SERVER_TIMEOUT")
        .env_remove("LIBRERO_OUTPUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn sample_book(id: i64, titulo: &str) -> serde_json::Value {
    json!({
        "id": id,
        "titulo": titulo,
        "autor": "Autora",
        "anioPublicacion": "2001",
        "genero": "Novela"
    })
}

/// Run the command on a blocking thread (the mock server needs the runtime).
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = librero_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    librero_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("book collection")
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("add"))
            .and(predicate::str::contains("rm")),
    );
}

#[test]
fn test_version_flag() {
    librero_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("librero"));
}

#[test]
fn test_show_requires_id() {
    librero_cmd()
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_show_rejects_non_numeric_id() {
    librero_cmd()
        .args(["show", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_add_requires_all_fields() {
    librero_cmd()
        .args(["add", "--titulo", "Solo título"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--autor"));
}

#[test]
fn test_invalid_server_url_is_usage_error() {
    librero_cmd()
        .args(["list", "--server", "not a url"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid URL"));
}

// ── End-to-end against a mock server ────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_renders_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/libros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_book(1, "Rayuela"),
            sample_book(2, "Ficciones"),
        ])))
        .mount(&server)
        .await;

    let mut cmd = librero_cmd();
    cmd.args(["list", "--server", &server.uri()]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rayuela"), "{stdout}");
    assert!(stdout.contains("Ficciones"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_plain_emits_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/libros"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sample_book(1, "Rayuela"),
            sample_book(2, "Ficciones"),
        ])))
        .mount(&server)
        .await;

    let mut cmd = librero_cmd();
    cmd.args(["list", "--server", &server.uri(), "--output", "plain"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "1\n2");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/libros/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut cmd = librero_cmd();
    cmd.args(["show", "99", "--server", &server.uri()]);
    let output = run_blocking(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    let text = combined_output(&output);
    assert!(text.contains("not found"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rm_with_yes_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/libros/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_book(1, "Rayuela")))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/libros/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = librero_cmd();
    cmd.args(["rm", "1", "--yes", "--server", &server.uri()]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Libro eliminado correctamente."), "{stderr}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_posts_and_reports_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/libros"))
        .respond_with(ResponseTemplate::new(201).set_body_json(sample_book(7, "Nuevo")))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = librero_cmd();
    cmd.args([
        "add",
        "--titulo",
        "Nuevo",
        "--autor",
        "Autora",
        "--anio",
        "2001",
        "--genero",
        "Novela",
        "--server",
        &server.uri(),
    ]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Libro creado correctamente."), "{stderr}");
    assert!(stderr.contains("id 7"), "{stderr}");
}
