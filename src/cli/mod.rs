//! Command-line interface for xsnap
//!
//! One binary serves both roles. `xsnap run` (or a bare `xsnap`) starts the
//! daemon; every other subcommand is a thin client that talks to it over the
//! unix socket. Snap and apply fall back to driving the window system
//! directly when no daemon is reachable, so keybindings keep working either
//! way.

use crate::config::{Settings, SettingsStore};
use crate::ipc::{socket_path, IpcClient, Request, Response, StatusReport};
use crate::models::{Direction, TilingState};
use crate::services::SnapCoordinator;
use crate::ui::DesktopNotifier;
use crate::x11::{check_tools, missing_required, ToolReport, XdoWindowSystem, XrandrDisplays};
use crate::{Result, XsnapError};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, warn};

/// xsnap command-line interface
#[derive(Parser)]
#[command(
    name = "xsnap",
    about = "Context-aware window snapping for X11 desktops",
    version = env!("CARGO_PKG_VERSION"),
    author
)]
pub struct XsnapCli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run; the daemon starts when none is given
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the snapping daemon in the foreground
    Run,
    /// Snap the active window one step in a direction
    Snap {
        /// left, right, up, or down
        direction: Direction,
    },
    /// Put the active window into a named layout directly
    Apply {
        /// Layout name, e.g. left-half, maximized, top-right
        layout: TilingState,
    },
    /// Report daemon state, settings, and counters
    Status,
    /// Ask a running daemon to reload its settings file
    Reload,
    /// Stop a running daemon
    Quit,
    /// Inspect or reset the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Check that the external tools xsnap depends on are installed
    Doctor,
}

/// Settings file operations
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active settings
    Show,
    /// Print the settings file path
    Path,
    /// Overwrite the settings file with defaults
    Reset {
        /// Skip the safety check
        #[arg(long)]
        force: bool,
    },
}

/// CLI command executor for the client-side subcommands
pub struct XsnapCliExecutor {
    store: SettingsStore,
    json_output: bool,
}

impl XsnapCliExecutor {
    pub fn new(store: SettingsStore, json_output: bool) -> Self {
        Self { store, json_output }
    }

    /// Execute a CLI command
    pub async fn execute(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Run => Err(XsnapError::ConfigurationError(
                "run starts the daemon and is handled by the binary entry point".to_string(),
            )
            .into()),
            Commands::Snap { direction } => {
                self.snap_or_fall_back(Request::Snap { direction }).await
            }
            Commands::Apply { layout } => self.snap_or_fall_back(Request::Apply { layout }).await,
            Commands::Status => self.status().await,
            Commands::Reload => self.send_to_daemon(&Request::Reload).await,
            Commands::Quit => self.send_to_daemon(&Request::Quit).await,
            Commands::Config { action } => self.config(action),
            Commands::Doctor => self.doctor(),
        }
    }

    /// Forward a snap or apply to the daemon, or drive the window system
    /// directly when no daemon is listening.
    async fn snap_or_fall_back(&self, request: Request) -> Result<()> {
        let path = socket_path();
        match IpcClient::connect(&path).await {
            Ok(client) => {
                let response = client.send(&request).await?;
                self.print_response(&response)
            }
            Err(e) => {
                warn!("{}; driving the window system directly", e);
                self.run_one_shot(request).await
            }
        }
    }

    async fn run_one_shot(&self, request: Request) -> Result<()> {
        let settings = self.store.load_or_init()?;
        let coordinator = SnapCoordinator::new(
            Arc::new(XdoWindowSystem::new()),
            Arc::new(XrandrDisplays::new()),
            Arc::new(DesktopNotifier::new()),
            settings,
        );

        let outcome = match request {
            Request::Snap { direction } => coordinator.snap(direction).await?,
            Request::Apply { layout } => coordinator.apply(layout).await?,
            _ => {
                return Err(
                    XsnapError::IpcError("this command needs a running daemon".to_string()).into(),
                )
            }
        };

        self.print_response(&Response::ok_with(outcome.describe()))
    }

    async fn status(&self) -> Result<()> {
        let path = socket_path();
        match IpcClient::connect(&path).await {
            Ok(client) => {
                let response = client.send(&Request::Status).await?;
                self.print_response(&response)?;
            }
            Err(_) => {
                if self.json_output {
                    let not_running = serde_json::json!({ "running": false });
                    println!("{}", serde_json::to_string_pretty(&not_running)?);
                } else {
                    println!("xsnap daemon is not running (no socket at {})", path.display());
                }
            }
        }

        if !self.json_output {
            println!("External tools:");
            print_tool_lines(&check_tools());
        }
        Ok(())
    }

    async fn send_to_daemon(&self, request: &Request) -> Result<()> {
        let client = IpcClient::connect(&socket_path()).await?;
        let response = client.send(request).await?;
        self.print_response(&response)
    }

    fn config(&self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                let settings = self.store.load_or_init()?;
                if self.json_output {
                    println!("{}", serde_json::to_string_pretty(&settings)?);
                } else {
                    println!("Settings from {}:", self.store.path().display());
                    println!("  Outer margin: {}px", settings.margins.outer);
                    println!("  Window gap: {}px", settings.margins.gap);
                    println!("  Tolerance: {}px", settings.tolerance_px);
                    println!("  Notify on apply: {}", settings.notify_on_apply);
                    println!("  Notify on launch: {}", settings.notify_on_launch);
                }
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", self.store.path().display());
                Ok(())
            }
            ConfigAction::Reset { force } => {
                if !force {
                    return Err(XsnapError::ConfigurationError(
                        "refusing to overwrite settings without --force".to_string(),
                    )
                    .into());
                }
                self.store.save(&Settings::default())?;
                println!("Settings reset to defaults at {}", self.store.path().display());
                Ok(())
            }
        }
    }

    fn doctor(&self) -> Result<()> {
        let reports = check_tools();

        if self.json_output {
            let entries: Vec<_> = reports
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "tool": r.tool,
                        "found": r.found,
                        "required": r.required,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Array(entries))?
            );
        } else {
            println!("External tools:");
            print_tool_lines(&reports);
        }

        let missing = missing_required(&reports);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(XsnapError::ToolMissing(format!(
                "{} (install with your package manager, e.g. sudo apt install {})",
                missing.join(", "),
                missing.join(" ")
            ))
            .into())
        }
    }

    fn print_response(&self, response: &Response) -> Result<()> {
        match response {
            Response::Error { message } => Err(XsnapError::IpcError(message.clone()).into()),
            other if self.json_output => {
                println!("{}", serde_json::to_string_pretty(other)?);
                Ok(())
            }
            Response::Ok {
                message: Some(message),
            } => {
                println!("{}", message);
                Ok(())
            }
            Response::Ok { message: None } => {
                println!("ok");
                Ok(())
            }
            Response::Report(report) => {
                print_report(report);
                Ok(())
            }
        }
    }
}

fn print_report(report: &StatusReport) {
    println!("xsnap daemon v{}", report.version);
    println!(
        "  Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "  Margins: outer {}px, gap {}px",
        report.settings.margins.outer, report.settings.margins.gap
    );
    println!("  Tolerance: {}px", report.settings.tolerance_px);
    println!("  Snaps applied: {}", report.metrics.snaps_applied);
    println!("  Manual applies: {}", report.metrics.manual_applies);
    println!("  No-ops: {}", report.metrics.noops);
    println!(
        "  Events without an active window: {}",
        report.metrics.no_active_window
    );
    println!("  Aborted events: {}", report.metrics.aborted);
    println!("  Settings reloads: {}", report.metrics.settings_reloads);
}

fn print_tool_lines(reports: &[ToolReport]) {
    for report in reports {
        let state = if report.found { "found" } else { "MISSING" };
        let role = if report.required { "required" } else { "optional" };
        println!("  {:<12} {} ({})", report.tool, state, role);
    }
}

/// Run a client-side CLI command and report failures
pub async fn run_cli(command: Commands, json_output: bool, store: SettingsStore) -> Result<()> {
    let executor = XsnapCliExecutor::new(store, json_output);

    if let Err(e) = executor.execute(command).await {
        if json_output {
            let error_json = serde_json::json!({
                "error": true,
                "message": e.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&error_json)?);
        } else {
            error!("Command failed: {}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
