//! CLI argument parsing tests.

use clap::Parser;
use otxapi::cli::{Cli, Command, GetTarget};

#[test]
fn test_cli_parses_get_user() {
    let cli = Cli::parse_from(["otx", "get", "user"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { target } => assert_eq!(target, GetTarget::User),
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_get_pulse_with_id() {
    let cli = Cli::parse_from(["otx", "get", "pulse", "60a5f0c4e1b2a3d4c5f6a7b8"]);

    match cli.command {
        Command::Get { target } => assert_eq!(
            target,
            GetTarget::Pulse {
                id: "60a5f0c4e1b2a3d4c5f6a7b8".to_string()
            }
        ),
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_get_pulse_requires_id() {
    let err = Cli::try_parse_from(["otx", "get", "pulse"]).unwrap_err();
    assert_eq!(
        err.kind(),
        clap::error::ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn test_cli_entity_aliases() {
    let cli = Cli::parse_from(["otx", "get", "me"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            target: GetTarget::User
        }
    ));

    let cli = Cli::parse_from(["otx", "get", "pulses", "abc"]);
    assert!(matches!(
        cli.command,
        Command::Get {
            target: GetTarget::Pulse { .. }
        }
    ));
}

#[test]
fn test_cli_parses_list_with_paging() {
    let cli = Cli::parse_from(["otx", "list", "--page", "3", "--limit", "10"]);

    match cli.command {
        Command::List {
            page,
            limit,
            all,
            one,
        } => {
            assert_eq!(page, Some(3));
            assert_eq!(limit, Some(10));
            assert!(!all);
            assert!(!one);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_list_all_conflicts_with_page() {
    let result = Cli::try_parse_from(["otx", "list", "--all", "--page", "2"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_search() {
    let cli = Cli::parse_from(["otx", "search", "emotet", "--all", "--limit", "5"]);

    match cli.command {
        Command::Search {
            query,
            page,
            limit,
            all,
        } => {
            assert_eq!(query, "emotet");
            assert!(page.is_none());
            assert_eq!(limit, Some(5));
            assert!(all);
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_cli_search_requires_query() {
    assert!(Cli::try_parse_from(["otx", "search"]).is_err());
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from([
        "otx",
        "list",
        "--json",
        "-v",
        "--base-url",
        "http://localhost:8080",
        "--user-agent",
        "my-agent/1.0",
    ]);

    assert!(cli.json);
    assert!(cli.verbose);
    assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(cli.user_agent.as_deref(), Some("my-agent/1.0"));
}

#[test]
fn test_cli_api_key_flag() {
    let cli = Cli::parse_from(["otx", "--api-key", "abc123", "get", "user"]);
    assert_eq!(cli.api_key.as_deref(), Some("abc123"));
}

#[test]
fn test_cli_rejects_unknown_entity() {
    assert!(Cli::try_parse_from(["otx", "get", "indicator", "x"]).is_err());
}
