#![allow(clippy::unwrap_used, clippy::expect_used)]

use martian::registry::naming::derived_name;
use martian::{Client, ClientOptions, Params};
use proptest::prelude::*;

mod common;
use common::API_ROOT;

/// Two placeholders, two typed query parameters and a header.
const TEMPLATED: &str = r#"{
  "swagger": "2.0",
  "paths": {
    "/orgs/{org}/repos/{repo}": {
      "get": {
        "operationId": "getRepo",
        "parameters": [
          { "name": "org", "in": "path", "required": true, "type": "string" },
          { "name": "repo", "in": "path", "required": true, "type": "string" },
          { "name": "page", "in": "query", "type": "integer" },
          { "name": "labels", "in": "query", "type": "array", "items": { "type": "string" } }
        ]
      }
    }
  }
}"#;

fn client() -> Client {
    Client::new(API_ROOT, TEMPLATED, ClientOptions::default()).unwrap()
}

fn params(org: &str, repo: &str, page: Option<i64>, labels: &[String]) -> Params {
    let mut params = Params::new().with("org", org).with("repo", repo);
    if let Some(page) = page {
        params.insert("page", page);
    }
    if !labels.is_empty() {
        params.insert("labels", labels.to_vec());
    }
    params
}

proptest! {
    #[test]
    fn resolved_urls_never_contain_braces(
        org in "\\PC+",
        repo in "\\PC+",
        page in proptest::option::of(any::<i64>()),
        labels in proptest::collection::vec("\\PC*", 0..4),
    ) {
        let url = client().url_for_with("get-repo", &params(&org, &repo, page, &labels)).unwrap();
        prop_assert!(!url.contains('{'), "url contains '{{': {}", url);
        prop_assert!(!url.contains('}'), "url contains '}}': {}", url);
        prop_assert!(url.starts_with("https://api.example.com/orgs/"));
    }

    #[test]
    fn resolution_is_deterministic(
        org in "[a-zA-Z0-9 ./?&=-]{1,12}",
        repo in "[a-zA-Z0-9 ./?&=-]{1,12}",
        labels in proptest::collection::vec("[a-z ]{0,6}", 0..3),
    ) {
        let client = client();
        let p = params(&org, &repo, Some(1), &labels);
        prop_assert_eq!(
            client.url_for_with("get-repo", &p).unwrap(),
            client.url_for_with("get-repo", &p).unwrap()
        );
    }

    #[test]
    fn path_values_decode_back(org in "\\PC{1,16}") {
        let url = client().url_for_with("get-repo", &params(&org, "r", None, &[])).unwrap();
        let encoded = url
            .strip_prefix("https://api.example.com/orgs/")
            .and_then(|rest| rest.strip_suffix("/repos/r"))
            .unwrap();
        prop_assert!(!encoded.contains('/'));
        prop_assert_eq!(urlencoding::decode(encoded).unwrap().into_owned(), org);
    }

    #[test]
    fn missing_path_value_always_fails(repo in "[a-z]{1,8}") {
        let err = client()
            .url_for_with("get-repo", &Params::new().with("repo", repo))
            .unwrap_err();
        prop_assert_eq!(
            err.to_string(),
            "route `get-repo`: missing required parameter `org`"
        );
    }

    #[test]
    fn derived_names_are_kebab_case(segments in proptest::collection::vec("[a-z]{1,6}", 1..4)) {
        let path = format!("/{}", segments.join("/"));
        let name = derived_name(&http::Method::GET, &path);
        prop_assert!(name.starts_with("get-"));
        prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
    }
}
