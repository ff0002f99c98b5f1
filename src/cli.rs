//! Command-line interface for quiet-nav.
//!
//! The hooks themselves run inside the file-browser process; this binary
//! manages the settings file and dry-runs classification and fallback
//! chains against a simulated host.

use crate::debug::DiagnosticsLogger;
use crate::dispatcher::{Dispatcher, Disposition};
use crate::host::{FolderIdentity, KnownLocation};
use crate::simulation::{SimFolder, SimulatedHost, SimulatedShell};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use quiet_nav_config::{Settings, SettingsStore, UpModifier};
use quiet_nav_keybindings::{KeyEvent, parse_key_chord};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SIM_WINDOW: u32 = 0x1;

/// quiet-nav - silent fallback navigation for the Windows file browser
#[derive(Parser, Debug)]
#[command(name = "quiet-nav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file to use instead of the per-user default
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Print diagnostic log lines to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or create the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show how a key chord would be handled
    Classify {
        /// Chord such as "Shift+Backspace"
        chord: String,

        /// Override the configured up modifier
        #[arg(long, value_name = "MODIFIER", value_parser = parse_up_modifier)]
        up_modifier: Option<UpModifier>,
    },
    /// Dispatch a key chord against a simulated file-browser window
    Simulate {
        /// Chord to press
        #[arg(long, default_value = "Backspace")]
        chord: String,

        /// Folder the window is showing, e.g. "C:\Users\X\Docs"
        #[arg(long, value_name = "LOCATION")]
        at: String,

        /// Back history, oldest first (repeatable)
        #[arg(long = "history", value_name = "LOCATION")]
        history: Vec<String>,

        /// Make a navigation target fail (repeatable)
        #[arg(long = "fail", value_enum, value_name = "TARGET")]
        fail: Vec<FailTarget>,

        /// Override the configured up modifier
        #[arg(long, value_name = "MODIFIER", value_parser = parse_up_modifier)]
        up_modifier: Option<UpModifier>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the settings file path
    Path,
    /// Print the effective settings
    Show,
    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Host operation a simulation should refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailTarget {
    Back,
    Parent,
    Root,
    Desktop,
}

fn parse_up_modifier(s: &str) -> Result<UpModifier, String> {
    s.parse().map_err(|e: quiet_nav_config::ConfigError| e.to_string())
}

/// Parse process arguments.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Run a parsed command, writing results to stdout.
pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_to(cli, &mut out)
}

/// Run a parsed command, writing results to `out`.
pub fn run_to(cli: Cli, out: &mut dyn Write) -> Result<()> {
    if cli.verbose {
        let store = Arc::new(SettingsStore::new(Settings::new().with_logging(true)));
        // Ignore a second install (tests call run_to repeatedly)
        let _ = DiagnosticsLogger::to_stderr(store, LevelFilter::Trace).install();
    }

    let path = cli.settings.clone().unwrap_or_else(Settings::config_path);
    match cli.command {
        Commands::Config { action } => run_config(action, &path, out),
        Commands::Classify { chord, up_modifier } => {
            let settings = effective_settings(&path, up_modifier)?;
            let chord = parse_key_chord(&chord).with_context(|| format!("Invalid chord '{chord}'"))?;
            let dispatcher = Dispatcher::new(SimulatedHost::new(), Arc::new(SettingsStore::new(settings)));
            let action = dispatcher.classify(&KeyEvent::key_down(chord));
            writeln!(out, "{chord} -> {action} (up modifier: {})", settings.up_modifier)?;
            Ok(())
        }
        Commands::Simulate {
            chord,
            at,
            history,
            fail,
            up_modifier,
        } => {
            let settings = effective_settings(&path, up_modifier)?;
            simulate(settings, &chord, &at, &history, &fail, out)
        }
    }
}

fn run_config(action: ConfigAction, path: &Path, out: &mut dyn Write) -> Result<()> {
    match action {
        ConfigAction::Path => writeln!(out, "{}", path.display())?,
        ConfigAction::Show => {
            let settings = load_settings(path)?;
            write!(out, "{}", settings.to_yaml()?)?;
        }
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            Settings::default()
                .save_to(path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            writeln!(out, "Wrote default settings to {}", path.display())?;
        }
    }
    Ok(())
}

/// Settings from `path`, or defaults when the file does not exist.
fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    Settings::load_from(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn effective_settings(path: &Path, up_modifier: Option<UpModifier>) -> Result<Settings> {
    let settings = load_settings(path)?;
    Ok(match up_modifier {
        Some(modifier) => settings.with_up_modifier(modifier),
        None => settings,
    })
}

fn simulate(
    settings: Settings,
    chord: &str,
    at: &str,
    history: &[String],
    fail: &[FailTarget],
    out: &mut dyn Write,
) -> Result<()> {
    let chord = parse_key_chord(chord).with_context(|| format!("Invalid chord '{chord}'"))?;
    let start = SimFolder::parse(at);

    let mut shell = SimulatedShell::at(start.clone()).with_history(history.iter().map(String::as_str));
    for target in fail {
        shell = match target {
            FailTarget::Back => shell.rejecting_back(),
            FailTarget::Parent => match start.parent() {
                Some(parent) => shell.rejecting(parent),
                None => shell,
            },
            FailTarget::Root => shell.with_unresolvable(KnownLocation::AllDrives),
            FailTarget::Desktop => shell.with_unresolvable(KnownLocation::Desktop),
        };
    }

    let host = SimulatedHost::new().with_window(SIM_WINDOW, shell.clone());
    let dispatcher = Dispatcher::new(host, Arc::new(SettingsStore::new(settings)));
    let event = KeyEvent::key_down(chord);

    writeln!(out, "chord:  {chord} -> {}", dispatcher.classify(&event))?;
    let disposition = dispatcher.dispatch(SIM_WINDOW, &event);

    let calls = shell.calls();
    if calls.is_empty() {
        writeln!(out, "host calls: none")?;
    } else {
        writeln!(out, "host calls:")?;
        for (i, call) in calls.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, call)?;
        }
    }

    match disposition {
        Disposition::Handled => writeln!(out, "result: handled, now at {}", shell.current())?,
        Disposition::PassThrough => writeln!(
            out,
            "result: passed to host, still at {}",
            shell.current()
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("quiet-nav").chain(args.iter().copied()))?;
        let mut out = Vec::new();
        run_to(cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_classify_with_override() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("settings.yaml");
        let settings = settings.to_str().unwrap();

        let output = run_args(&["classify", "Alt+Backspace", "--settings", settings]).unwrap();
        assert!(output.contains("pass through"), "{output}");

        let output = run_args(&[
            "classify",
            "Alt+Backspace",
            "--up-modifier",
            "alt",
            "--settings",
            settings,
        ])
        .unwrap();
        assert!(output.contains("navigate up"), "{output}");
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.yaml");
        let path = path.to_str().unwrap();

        run_args(&["config", "init", "--settings", path]).unwrap();
        assert!(run_args(&["config", "init", "--settings", path]).is_err());
        run_args(&["config", "init", "--force", "--settings", path]).unwrap();

        let shown = run_args(&["config", "show", "--settings", path]).unwrap();
        assert!(shown.contains("up_modifier: shift"), "{shown}");
    }

    #[test]
    fn test_simulate_back_falls_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let settings = temp_dir.path().join("settings.yaml");
        let output = run_args(&[
            "simulate",
            "--at",
            r"C:\Users\X\Docs",
            "--settings",
            settings.to_str().unwrap(),
        ])
        .unwrap();

        assert!(output.contains("1. browse back"), "{output}");
        assert!(output.contains(r"2. browse to C:\Users\X"), "{output}");
        assert!(output.contains(r"handled, now at C:\Users\X"), "{output}");
    }

    #[test]
    fn test_simulate_unknown_fail_target_rejected() {
        assert!(run_args(&["simulate", "--at", "Desktop", "--fail", "sideways"]).is_err());
    }
}
