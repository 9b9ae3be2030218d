use super::*;
use std::collections::HashMap;

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn no_keyring() -> Option<String> {
    None
}

#[test]
fn test_gh_token_takes_precedence() {
    let lookup = lookup_from(&[("GH_TOKEN", "gh-token"), ("GITHUB_TOKEN", "github-token")]);

    let credentials = resolve_credentials(lookup, no_keyring).unwrap();

    assert_eq!(credentials.token(), "gh-token");
    assert_eq!(credentials.source(), TokenSource::Environment("GH_TOKEN"));
}

#[test]
fn test_github_token_used_when_gh_token_missing() {
    let lookup = lookup_from(&[("GITHUB_TOKEN", "github-token")]);

    let credentials = resolve_credentials(lookup, no_keyring).unwrap();

    assert_eq!(credentials.token(), "github-token");
    assert_eq!(credentials.source(), TokenSource::Environment("GITHUB_TOKEN"));
}

#[test]
fn test_blank_environment_token_is_ignored() {
    let lookup = lookup_from(&[("GH_TOKEN", "   "), ("GITHUB_TOKEN", "github-token")]);

    let credentials = token_from_env(lookup).unwrap();

    assert_eq!(credentials.token(), "github-token");
}

#[test]
fn test_keyring_is_the_fallback() {
    let lookup = lookup_from(&[]);

    let credentials = resolve_credentials(lookup, || Some("stored-token\n".to_string())).unwrap();

    assert_eq!(credentials.token(), "stored-token");
    assert_eq!(credentials.source(), TokenSource::Keyring);
}

#[test]
fn test_keyring_not_consulted_when_environment_has_token() {
    let lookup = lookup_from(&[("GH_TOKEN", "gh-token")]);

    let credentials = resolve_credentials(lookup, || panic!("keyring should not be read")).unwrap();

    assert_eq!(credentials.token(), "gh-token");
}

#[test]
fn test_no_token_is_client_unavailable() {
    let lookup = lookup_from(&[]);

    let result = resolve_credentials(lookup, no_keyring);

    match result {
        Err(Error::ClientUnavailable(message)) => {
            assert!(message.contains("GH_TOKEN"));
            assert!(message.contains("GITHUB_TOKEN"));
            assert!(message.contains(KEY_RING_SERVICE_NAME));
        }
        other => panic!("Expected ClientUnavailable, got {:?}", other),
    }
}

#[test]
fn test_credentials_debug_redacts_token() {
    let credentials = Credentials::new("ghp_secret", TokenSource::Keyring);

    let debug_output = format!("{:?}", credentials);

    assert!(!debug_output.contains("ghp_secret"));
    assert!(debug_output.contains("<redacted>"));
}

#[test]
fn test_token_source_display() {
    assert_eq!(
        TokenSource::Environment("GH_TOKEN").to_string(),
        "environment variable GH_TOKEN"
    );
    assert_eq!(TokenSource::Keyring.to_string(), "system keyring");
}

#[test]
fn test_api_base_url_from_environment() {
    let lookup = lookup_from(&[("GITHUB_API_URL", "https://github.example.com/api/v3")]);

    assert_eq!(
        api_base_url(lookup),
        Some("https://github.example.com/api/v3".to_string())
    );
}

#[test]
fn test_api_base_url_defaults_to_none() {
    assert_eq!(api_base_url(lookup_from(&[])), None);
    assert_eq!(api_base_url(lookup_from(&[("GITHUB_API_URL", "")])), None);
}
