//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::sample::{list_walkthrough, sample_tree};

/// How the sample tree is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMode {
    Prefix,
    NoPrefix,
    Both,
}

impl TreeMode {
    pub fn from_flags(settings: &Settings, no_prefix: bool, both: bool) -> Self {
        match (both, no_prefix) {
            (true, _) => TreeMode::Both,
            (false, true) => TreeMode::NoPrefix,
            (false, false) if settings.tree.print_prefix => TreeMode::Prefix,
            (false, false) => TreeMode::NoPrefix,
        }
    }
}

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };

    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    match command {
        Commands::Tree {
            fan_out,
            no_prefix,
            both,
        } => {
            let fan_out = fan_out.unwrap_or(settings.demo.fan_out);
            let mode = TreeMode::from_flags(&settings, *no_prefix, *both);
            output::raw(&tree_report(fan_out, mode)?);
        }
        Commands::List { prefix } => {
            output::raw(&list_report(prefix.or(settings.list.prefix))?);
        }
        Commands::Demo => output::raw(&demo_report(&settings)?),
        Commands::Config { command } => _config(command, &settings)?,
        Commands::Completion { .. } => {}
    }
    Ok(())
}

/// Largest fan-out accepted; the sample tree holds about fan_out³ nodes.
pub const MAX_FAN_OUT: usize = 32;

/// Sample tree rendering, with "## ..." headings in [`TreeMode::Both`].
#[instrument(level = "debug")]
pub fn tree_report(fan_out: usize, mode: TreeMode) -> CliResult<String> {
    if !(1..=MAX_FAN_OUT).contains(&fan_out) {
        return Err(CliError::InvalidArgs(format!(
            "fan-out must be between 1 and {MAX_FAN_OUT}, got {fan_out}"
        )));
    }
    let mut tree = sample_tree(fan_out, mode != TreeMode::NoPrefix)?;
    if mode != TreeMode::Both {
        return Ok(tree.format());
    }

    let mut report = String::from("## With prefix\n");
    report.push_str(&tree.format());
    tree.set_print_prefix(tree.root(), false)?;
    report.push_str("## Without prefix\n");
    report.push_str(&tree.format());
    Ok(report)
}

/// Tree and list renderings under plain "# TREE" / "# LIST" headings.
pub fn demo_report(settings: &Settings) -> CliResult<String> {
    let mut report = String::from("# TREE\n");
    report.push_str(&tree_report(settings.demo.fan_out, TreeMode::Both)?);
    report.push_str("# LIST\n");
    report.push_str(&list_report(settings.list.prefix)?);
    Ok(report)
}

/// List walkthrough rendering, one heading per step.
#[instrument(level = "debug")]
pub fn list_report(prefix: Option<char>) -> CliResult<String> {
    let mut report = String::new();
    for step in list_walkthrough(prefix)? {
        report.push_str(step.heading);
        report.push('\n');
        report.push_str(&step.rendered);
        report.push('\n');
    }
    Ok(report)
}

fn _config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::raw(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
        ConfigCommands::Template => output::raw(&Settings::template()),
    }
    debug!("config command done");
    Ok(())
}
