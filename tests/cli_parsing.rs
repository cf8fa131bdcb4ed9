use std::path::PathBuf;

use clap::Parser;
use compass::cli::{Cli, Commands};

#[test]
fn test_parse_take() {
    let cli = Cli::try_parse_from(["compass", "take", "--output", "profile.json"]).unwrap();
    assert!(!cli.json);
    match cli.command {
        Commands::Take(args) => {
            assert_eq!(args.output, Some(PathBuf::from("profile.json")));
            assert!(args.catalog.is_none());
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "compass",
        "replay",
        "script.yaml",
        "--json",
        "--config",
        "custom.yaml",
        "--catalog",
        "catalog.yaml",
    ])
    .unwrap();
    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Replay(args) => {
            assert_eq!(args.script, PathBuf::from("script.yaml"));
            assert_eq!(args.catalog, Some(PathBuf::from("catalog.yaml")));
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_guidance_scores() {
    let cli = Cli::try_parse_from([
        "compass",
        "guidance",
        "--scores",
        "9,4,8,5,9",
        "--type",
        "enfp",
        "--note",
        "engagement=painting",
    ])
    .unwrap();
    match cli.command {
        Commands::Guidance(args) => {
            assert_eq!(args.scores, vec![9.0, 4.0, 8.0, 5.0, 9.0]);
            assert_eq!(args.mbti_type.as_deref(), Some("enfp"));
            assert_eq!(args.note, vec!["engagement=painting".to_string()]);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_guidance_requires_five_scores() {
    assert!(Cli::try_parse_from(["compass", "guidance", "--scores", "9,4,8"]).is_err());
    assert!(Cli::try_parse_from(["compass", "guidance"]).is_err());
}

#[test]
fn test_parse_validate_type() {
    let cli = Cli::try_parse_from(["compass", "validate-type", "infj"]).unwrap();
    match cli.command {
        Commands::ValidateType(args) => assert_eq!(args.code, "infj"),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_catalog_export() {
    let cli = Cli::try_parse_from(["compass", "catalog", "--export", "out/catalog.yaml", "-v"]).unwrap();
    assert!(cli.verbose);
    match cli.command {
        Commands::Catalog(args) => assert_eq!(args.export, Some(PathBuf::from("out/catalog.yaml"))),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["compass", "launch"]).is_err());
}
