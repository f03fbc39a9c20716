//! xsnap - Context-Aware Window Snapping for X11 Desktops
//!
//! Daemon entry point. Builds the snap coordinator and the unix-socket IPC
//! server, then drives everything from a single event loop until a shutdown
//! signal or a quit request arrives. Client subcommands are dispatched to
//! the CLI executor instead.

use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::{
    signal,
    sync::{broadcast, mpsc},
    time::{sleep, Duration},
};
use tracing::{debug, error, info, instrument, warn};
use xsnap::{
    cli::{self, Commands, XsnapCli},
    config::{Settings, SettingsStore},
    ipc::{socket_path, EngineCommand, IpcServer, Response, StatusReport},
    logging::{init_logging, LogConfig},
    services::SnapCoordinator,
    ui::{DesktopNotifier, Notifier},
    x11::{check_tools, missing_required, XdoWindowSystem, XrandrDisplays},
    Result, XsnapError,
};

/// Command channel depth between IPC/tray producers and the engine loop
const COMMAND_QUEUE_DEPTH: usize = 32;

/// How often the daemon polls the settings file for edits
const SETTINGS_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// The running daemon: coordinator, IPC server, and the event loop state
pub struct XsnapApp {
    store: SettingsStore,
    coordinator: Arc<SnapCoordinator>,
    notifier: Arc<DesktopNotifier>,
    server: Option<IpcServer>,
    socket: PathBuf,
    commands_tx: mpsc::Sender<EngineCommand>,
    commands_rx: mpsc::Receiver<EngineCommand>,
    shutdown_tx: broadcast::Sender<()>,
    shutdown_rx: broadcast::Receiver<()>,
    started_at: DateTime<Utc>,
}

impl XsnapApp {
    /// Initialize the daemon: check tools, load settings, bind the socket.
    #[instrument(skip_all)]
    pub async fn new(store: SettingsStore) -> Result<Self> {
        info!(
            "xsnap - Context-Aware Window Snapping v{}",
            env!("CARGO_PKG_VERSION")
        );

        Self::check_external_tools()?;

        let notifier = Arc::new(DesktopNotifier::new());
        let settings = Self::load_settings(&store, notifier.as_ref()).await?;
        debug!("Settings loaded from {}", store.path().display());

        let coordinator = Arc::new(SnapCoordinator::new(
            Arc::new(XdoWindowSystem::new()),
            Arc::new(XrandrDisplays::new()),
            notifier.clone(),
            settings,
        ));
        debug!("Snap coordinator initialized");

        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let server = IpcServer::bind(socket_path()).await?;
        let socket = server.path().to_path_buf();
        info!("Listening on {}", socket.display());

        Ok(Self {
            store,
            coordinator,
            notifier,
            server: Some(server),
            socket,
            commands_tx,
            commands_rx,
            shutdown_tx,
            shutdown_rx,
            started_at: Utc::now(),
        })
    }

    /// Run the daemon event loop until shutdown
    #[instrument(skip_all)]
    pub async fn run(mut self) -> Result<()> {
        let shutdown_tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = Self::wait_for_signal(shutdown_tx).await {
                error!("Failed to install signal handlers: {}", e);
            }
        });

        if let Some(server) = self.server.take() {
            let commands_tx = self.commands_tx.clone();
            tokio::spawn(server.serve(commands_tx));
        }

        let settings = self.coordinator.settings().await;
        if settings.notify_on_launch {
            if let Err(e) = self
                .notifier
                .notify("xsnap", "Context-aware snapping is active")
                .await
            {
                warn!("Launch notification failed: {}", e);
            }
        }

        info!("xsnap is ready; waiting for snap commands");

        loop {
            tokio::select! {
                _ = self.shutdown_rx.recv() => {
                    info!("Shutdown signal received");
                    break;
                }

                command = self.commands_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }

                _ = sleep(SETTINGS_POLL_INTERVAL) => {
                    self.reload_if_changed().await;
                }
            }
        }

        self.shutdown().await
    }

    /// Answer one engine command, replying on its oneshot channel.
    async fn handle_command(&self, command: EngineCommand) {
        match command {
            EngineCommand::Snap { direction, reply } => {
                let response = match self.coordinator.snap(direction).await {
                    Ok(outcome) => Response::ok_with(outcome.describe()),
                    Err(e) => {
                        warn!("Snap failed: {}", e);
                        Response::error(e.to_string())
                    }
                };
                let _ = reply.send(response);
            }
            EngineCommand::Apply { layout, reply } => {
                let response = match self.coordinator.apply(layout).await {
                    Ok(outcome) => Response::ok_with(outcome.describe()),
                    Err(e) => {
                        warn!("Apply failed: {}", e);
                        Response::error(e.to_string())
                    }
                };
                let _ = reply.send(response);
            }
            EngineCommand::Reload { reply } => {
                let response = match self.reload_settings().await {
                    Ok(()) => Response::ok_with("Settings reloaded"),
                    Err(e) => {
                        warn!("Reload failed: {}", e);
                        Response::error(e.to_string())
                    }
                };
                let _ = reply.send(response);
            }
            EngineCommand::Status { reply } => {
                let report = StatusReport {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    started_at: self.started_at,
                    settings: self.coordinator.settings().await,
                    metrics: self.coordinator.metrics().await,
                };
                let _ = reply.send(Response::Report(report));
            }
            EngineCommand::Quit { reply } => {
                info!("Quit requested over IPC");
                let _ = reply.send(Response::ok());
                let _ = self.shutdown_tx.send(());
            }
        }
    }

    /// Settings for a fresh daemon. A file that does not parse falls back to
    /// defaults and tells the user which file is broken; a missing file is
    /// first-run territory and gets the default file written.
    async fn load_settings(store: &SettingsStore, notifier: &DesktopNotifier) -> Result<Settings> {
        if !store.path().exists() {
            return store.load_or_init();
        }
        match store.load() {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(
                    "Settings file {} is invalid, using defaults: {}",
                    store.path().display(),
                    e
                );
                let body = format!("Using defaults. Error in {}", store.path().display());
                if let Err(e) = notifier.notify("xsnap: Invalid Configuration", &body).await {
                    debug!("Configuration notification failed: {}", e);
                }
                Ok(Settings::default())
            }
        }
    }

    /// Reload settings on an explicit request, with a desktop notification.
    async fn reload_settings(&self) -> Result<()> {
        let settings = self.store.load()?;
        self.coordinator.replace_settings(settings).await;
        if let Err(e) = self.notifier.notify("xsnap", "Settings reloaded").await {
            warn!("Reload notification failed: {}", e);
        }
        Ok(())
    }

    /// Pick up settings edits between events. A file that no longer parses
    /// keeps the current settings until the user fixes it.
    async fn reload_if_changed(&self) {
        if !self.store.changed_on_disk() {
            return;
        }
        match self.store.load() {
            Ok(settings) => {
                self.coordinator.replace_settings(settings).await;
                info!("Settings file changed on disk; reloaded");
            }
            Err(e) => {
                warn!("Settings file changed but could not be loaded: {}", e);
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down xsnap...");

        if self.socket.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket) {
                warn!("Could not remove socket file {}: {}", self.socket.display(), e);
            }
        }

        info!("xsnap shutdown complete");
        Ok(())
    }

    /// Fails when a required external tool is missing from PATH; missing
    /// optional tools only cost their feature.
    fn check_external_tools() -> Result<()> {
        let reports = check_tools();

        let missing = missing_required(&reports);
        if !missing.is_empty() {
            return Err(XsnapError::ToolMissing(format!(
                "{} (install with your package manager, e.g. sudo apt install {})",
                missing.join(", "),
                missing.join(" ")
            ))
            .into());
        }

        for report in reports {
            if !report.found {
                warn!(
                    "Optional tool {} not found; desktop notifications will not appear",
                    report.tool
                );
            }
        }
        Ok(())
    }

    async fn wait_for_signal(shutdown_tx: broadcast::Sender<()>) -> Result<()> {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;

        tokio::select! {
            res = signal::ctrl_c() => {
                match res {
                    Ok(_) => info!("Received SIGINT (Ctrl+C)"),
                    Err(e) => warn!("Failed to listen for Ctrl+C: {}", e),
                }
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
        }

        if shutdown_tx.send(()).is_err() {
            warn!("Failed to send shutdown signal - no receivers");
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = XsnapCli::parse();

    let log_config = if cli.verbose {
        LogConfig::development()
    } else {
        LogConfig::from_env()
    };
    init_logging(&log_config).map_err(|e| {
        XsnapError::ConfigurationError(format!("Failed to initialize logging: {}", e))
    })?;

    let store = match &cli.config {
        Some(path) => SettingsStore::at(PathBuf::from(path)),
        None => SettingsStore::new(),
    };

    match cli.command {
        None | Some(Commands::Run) => {
            let app = XsnapApp::new(store).await?;
            if let Err(e) = app.run().await {
                error!("Daemon error: {}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Some(command) => cli::run_cli(command, cli.json, store).await,
    }
}
