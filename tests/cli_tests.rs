//! Tests for the CLI report builders and argument model

use clap::{CommandFactory, Parser};

use gormat::cli::commands::{demo_report, list_report, tree_report, TreeMode, MAX_FAN_OUT};
use gormat::cli::{Cli, CliError, Commands};
use gormat::config::Settings;
use gormat::exitcode;
use gormat::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn verify_cli() {
    Cli::command().debug_assert();
}

#[test]
fn given_tree_flags_when_parsed_then_subcommand_fields_set() {
    let cli = Cli::try_parse_from(["gormat", "-dd", "tree", "--fan-out", "2", "--no-prefix"]).unwrap();
    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Tree {
            fan_out,
            no_prefix,
            both,
        }) => {
            assert_eq!(fan_out, Some(2));
            assert!(no_prefix);
            assert!(!both);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn given_conflicting_tree_flags_when_parsed_then_error() {
    assert!(Cli::try_parse_from(["gormat", "tree", "--no-prefix", "--both"]).is_err());
}

#[test]
fn given_flags_when_tree_mode_resolved_then_config_is_fallback() {
    let mut settings = Settings::default();
    assert_eq!(TreeMode::from_flags(&settings, false, false), TreeMode::Prefix);
    assert_eq!(TreeMode::from_flags(&settings, true, false), TreeMode::NoPrefix);
    assert_eq!(TreeMode::from_flags(&settings, false, true), TreeMode::Both);

    settings.tree.print_prefix = false;
    assert_eq!(TreeMode::from_flags(&settings, false, false), TreeMode::NoPrefix);
}

#[test]
fn given_fan_out_one_when_tree_report_then_single_chain() {
    let report = tree_report(1, TreeMode::Prefix).unwrap();
    assert_eq!(
        report,
        "root\n\r\
         └─ child-1\n\r\
         \u{20}  └─ grand-child-1-1\n\r\
         \u{20}     └─ grand-grand child-1-1-1\n\r"
    );
}

#[test]
fn given_both_mode_when_tree_report_then_two_sections() {
    let report = tree_report(2, TreeMode::Both).unwrap();
    let (with, without) = report.split_once("## Without prefix\n").unwrap();

    assert!(with.starts_with("## With prefix\nroot\n\r├─ child-1\n\r"));
    assert!(without.starts_with("root\n\r   child-1\n\r"));
    assert!(!without.contains('─'));
    // 1 + 2 + 4 + 8 nodes, one line each
    assert_eq!(without.matches("\n\r").count(), 15);
}

#[test]
fn given_zero_fan_out_when_tree_report_then_usage_error() {
    let err = tree_report(0, TreeMode::Prefix).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_oversized_fan_out_when_tree_report_then_usage_error() {
    assert!(tree_report(MAX_FAN_OUT, TreeMode::NoPrefix).is_ok());

    let err = tree_report(5000, TreeMode::Both).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgs(_)));
    assert_eq!(err.exit_code(), exitcode::USAGE);
}

#[test]
fn given_settings_when_demo_report_then_plain_headings_without_escapes() {
    let mut settings = Settings::default();
    settings.demo.fan_out = 1;
    let report = demo_report(&settings).unwrap();

    assert!(report.starts_with("# TREE\n## With prefix\n"));
    assert!(report.contains("# LIST\n## Initial with Prefix\n"));
    assert!(!report.contains('\u{1b}'));
}

#[test]
fn given_prefix_when_list_report_then_three_steps() {
    let report = list_report(Some('>')).unwrap();
    let sections: Vec<&str> = report.lines().filter(|l| l.starts_with("## ")).collect();

    assert_eq!(
        sections,
        [
            "## Initial with Prefix",
            "## Added 10 && without prefix",
            "## removed 10 && with prefix",
        ]
    );
    assert!(report.contains("> 0\n\r> 1\n\r"));
    assert!(report.contains("4\n\r10\n\r5"));
    assert!(report.contains("- 4\n\r- 5"));
}
