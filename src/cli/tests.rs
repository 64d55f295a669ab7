//! Unit tests for CLI commands

use crate::cli::{parse_param, run_cli, Cli, Commands};
use clap::Parser;
use serde_json::json;
use std::io::Write;

const SPEC: &str = r#"
swagger: "2.0"
basePath: /v1
paths:
  /users/{id}:
    get:
      operationId: getUser
      summary: Fetch one user
      parameters:
        - { name: id, in: path, required: true, type: integer }
        - { name: X-Trace, in: header, type: string }
"#;

fn spec_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(SPEC.as_bytes()).unwrap();
    file
}

fn run(args: &[&str]) -> String {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut out = Vec::new();
    run_cli(cli, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_param_values() {
    assert_eq!(parse_param("id=42").unwrap(), ("id".to_string(), json!(42)));
    assert_eq!(parse_param("flag=true").unwrap(), ("flag".to_string(), json!(true)));
    assert_eq!(parse_param("tags=[1,2]").unwrap(), ("tags".to_string(), json!([1, 2])));
    assert_eq!(parse_param("name=bob").unwrap(), ("name".to_string(), json!("bob")));
    assert_eq!(parse_param("q=a=b").unwrap(), ("q".to_string(), json!("a=b")));
    assert_eq!(parse_param("empty=").unwrap(), ("empty".to_string(), json!("")));
    assert!(parse_param("novalue").is_err());
    assert!(parse_param("=1").is_err());
}

#[test]
fn test_url_for_command_parses_repeated_params() {
    let cli = Cli::try_parse_from([
        "martian", "url-for", "--spec", "api.yaml", "--root", "http://h", "--route", "get-user",
        "-p", "id=1", "--param", "x=y",
    ])
    .unwrap();

    match cli.command {
        Commands::UrlFor(args) => {
            assert_eq!(args.spec.to_string_lossy(), "api.yaml");
            assert_eq!(args.route, "get-user");
            assert_eq!(args.params.len(), 2);
            assert!(args.config.is_none());
        }
        other => panic!("Expected UrlFor command, got {other:?}"),
    }
}

#[test]
fn test_route_is_required() {
    assert!(Cli::try_parse_from(["martian", "url-for", "--spec", "api.yaml"]).is_err());
}

#[test]
fn test_routes_lists_every_route() {
    let file = spec_file();
    let out = run(&["martian", "routes", "--spec", file.path().to_str().unwrap()]);
    assert_eq!(out, "get-user\tGET\t/users/{id}\tFetch one user\n");
}

#[test]
fn test_url_for_prints_url() {
    let file = spec_file();
    let out = run(&[
        "martian", "url-for", "--spec", file.path().to_str().unwrap(), "--root",
        "https://api.example.com", "--route", "get-user", "-p", "id=42",
    ]);
    assert_eq!(out, "https://api.example.com/v1/users/42\n");
}

#[test]
fn test_request_prints_json() {
    let file = spec_file();
    let out = run(&[
        "martian", "request", "--spec", file.path().to_str().unwrap(), "--root", "http://h",
        "--route", "get-user", "-p", "id=7", "-p", "X-Trace=abc",
    ]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["method"], "GET");
    assert_eq!(value["url"], "http://h/v1/users/7");
    assert_eq!(value["headers"], json!([["X-Trace", "abc"]]));
    assert!(value.get("body").is_none());
}

#[test]
fn test_unknown_route_fails() {
    let file = spec_file();
    let cli = Cli::try_parse_from([
        "martian", "url-for", "--spec", file.path().to_str().unwrap(), "--route", "nope",
    ])
    .unwrap();
    let err = run_cli(cli, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("no route named `nope`"));
}

#[test]
fn test_url_for_applies_options_file() {
    let file = spec_file();
    let mut config = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    config
        .write_all(b"base-path: /v9\nunknown-params: reject\n")
        .unwrap();
    let spec = file.path().to_str().unwrap();
    let config = config.path().to_str().unwrap();

    let out = run(&[
        "martian", "url-for", "--spec", spec, "--root", "http://h", "--route", "get-user", "-p",
        "id=1", "--config", config,
    ]);
    assert_eq!(out, "http://h/v9/users/1\n");

    let cli = Cli::try_parse_from([
        "martian", "url-for", "--spec", spec, "--root", "http://h", "--route", "get-user", "-p",
        "id=1", "-p", "utm=x", "--config", config,
    ])
    .unwrap();
    let err = run_cli(cli, &mut Vec::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "route `get-user`: parameter `utm` is not declared on this route"
    );
}

#[test]
fn test_missing_options_file_fails() {
    let file = spec_file();
    let cli = Cli::try_parse_from([
        "martian", "url-for", "--spec", file.path().to_str().unwrap(), "--route", "get-user",
        "-p", "id=1", "--config", "/no/such/options.yaml",
    ])
    .unwrap();
    let err = run_cli(cli, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read options file"));
}
