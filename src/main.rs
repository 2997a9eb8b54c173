//! ReScent - extension release tooling and automation harness.
//!
//! Main entry point for the ReScent CLI.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rescent_automation::{
    spawn_dispatcher, AutomationConfig, AutomationController, AutomationSettings, Command,
    CommandResponse, MemorySettingsStore, Page, SimulatedPage,
};
use rescent_release::{BrowserType, ReleaseManager};

mod cli;

use cli::{Cli, Commands};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Release {
            version,
            build_path,
            chrome,
            firefox,
            edge,
            opera,
            releases_dir,
        } => {
            run_release(
                &version,
                build_path,
                [
                    (BrowserType::Chrome, chrome),
                    (BrowserType::Firefox, firefox),
                    (BrowserType::Edge, edge),
                    (BrowserType::Opera, opera),
                ],
                releases_dir,
            )?;
        }
        Commands::Simulate {
            refresh_time,
            scroll_speed,
            continuous_scroll,
            duration,
        } => {
            run_simulation(
                AutomationSettings {
                    refresh_time,
                    scroll_speed,
                    continuous_scroll,
                },
                Duration::from_secs(duration),
            )
            .await?;
        }
    }
    Ok(())
}

fn run_release(
    version: &str,
    build_path: PathBuf,
    artifacts: [(BrowserType, Option<PathBuf>); 4],
    releases_dir: PathBuf,
) -> anyhow::Result<()> {
    let files: BTreeMap<BrowserType, PathBuf> = artifacts
        .into_iter()
        .filter_map(|(browser, path)| path.map(|path| (browser, path)))
        .collect();
    anyhow::ensure!(
        !files.is_empty(),
        "no artifacts given; pass at least one of --chrome/--firefox/--edge/--opera"
    );

    let manager = ReleaseManager::new(&releases_dir);
    let release = manager.create_release(version, build_path, files)?;

    info!(
        "Release {} created under {}",
        release.release_dir_name(),
        releases_dir.display()
    );
    for browser in release.files.keys() {
        info!(
            "  {} -> {}",
            browser,
            releases_dir
                .join(release.release_dir_name())
                .join(browser.dir_name())
                .display()
        );
    }
    Ok(())
}

async fn run_simulation(
    settings: AutomationSettings,
    duration: Duration,
) -> anyhow::Result<()> {
    let page = Arc::new(SimulatedPage::new(800.0, 4000.0));
    let store = Arc::new(MemorySettingsStore::new());
    let controller =
        AutomationController::new(page.clone(), store, AutomationConfig::default());
    let mut events = controller.subscribe();
    let (handle, dispatcher) = spawn_dispatcher(controller.clone());

    info!("Simulating automation for {duration:?} with {settings:?}");
    handle.send(Command::Start { settings }).await?;

    let deadline = tokio::time::Instant::now() + duration;
    let mut status_tick = tokio::time::interval(Duration::from_secs(5));
    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(deadline) => break,
            event = events.recv() => {
                if let Ok(event) = event {
                    info!("Notification: {event:?}");
                }
            }
            _ = status_tick.tick() => {
                if let CommandResponse::Status(status) = handle.send(Command::Status).await? {
                    info!(
                        "Status: active={} last_activity={} inactive={: >5.1}s reloads={} position={:.0}",
                        status.is_active,
                        status.last_activity,
                        status.inactive_seconds,
                        page.reload_count(),
                        page.scroll_position(),
                    );
                }
            }
        }
    }

    handle.send(Command::Stop).await?;
    drop(handle);
    let _ = dispatcher.await;
    info!("Simulation finished");
    Ok(())
}
