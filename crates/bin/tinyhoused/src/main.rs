//! # tinyhoused — tiny-house daemon
//!
//! Composition root that wires light zones, the sync service and the MQTT
//! transport together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Build one virtual light zone per enabled room and reset them all off
//! - Connect to the broker and feed inbound messages to the sync service
//! - Read console commands from stdin as local interactions
//! - Sweep idle motion-lit rooms
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod console;

use std::sync::Arc;
use std::time::Duration;

use tinyhouse_adapter_mqtt::{MqttError, MqttTransport};
use tinyhouse_adapter_virtual::VirtualLightZone;
use tinyhouse_app::services::light_sync_service::{Announcement, LightSyncService};
use tinyhouse_app::services::occupancy::OccupancyMonitor;
use tinyhouse_app::services::publisher::Publisher;
use tinyhouse_app::services::sync_controller::SyncController;
use tokio::io::AsyncBufReadExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::console::ConsoleCommand;

type Service = LightSyncService<MqttTransport>;

const SWEEP_INTERVAL: Duration = Duration::from_millis(500);

/// Bound on waiting for the broker Disconnect to go out.
const DISCONNECT_GRACE: Duration = Duration::from_secs(2);

/// Bound on runtime teardown: a pending stdin read cannot be cancelled.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Zones
    let zones: Vec<Arc<VirtualLightZone>> = config
        .zones
        .iter()
        .filter(|(_, zone)| zone.enabled)
        .map(|(room, zone)| Arc::new(VirtualLightZone::new(room, zone.profile())))
        .collect();
    let registry = tinyhouse_adapter_virtual::registry_for(zones)?;

    let occupancy = config
        .zones
        .iter()
        .filter(|(_, zone)| zone.enabled)
        .filter_map(|(room, zone)| zone.idle_timeout().map(|idle| (room, idle)))
        .fold(OccupancyMonitor::new(), |monitor, (room, idle)| {
            monitor.with_idle_timeout(room, idle)
        });

    // Transport
    let (transport, event_loop) = tinyhouse_adapter_mqtt::connect(&config.mqtt);
    let publisher = Publisher::new(
        transport.clone(),
        config.mqtt.outbound_topic.clone(),
        config.house.name.clone(),
    );

    // Service
    let service = Arc::new(LightSyncService::new(
        SyncController::new(registry),
        publisher,
        occupancy,
    ));
    tracing::info!(
        house = %config.house.name,
        rooms = service.controller().registry().len(),
        inbound = %config.mqtt.inbound_topic,
        outbound = %config.mqtt.outbound_topic,
        "tinyhoused started"
    );

    let mut mqtt = tokio::spawn(event_loop.run(Arc::clone(&service)));
    let sweep = tokio::spawn(sweep_idle(Arc::clone(&service)));
    let console = tokio::spawn(read_console(Arc::clone(&service)));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    // No local change may be queued behind the Disconnect.
    sweep.abort();
    console.abort();

    // The event loop must keep polling until the Disconnect has been sent.
    let disconnect = async {
        transport.disconnect().await?;
        if let Err(err) = (&mut mqtt).await {
            tracing::debug!(%err, "MQTT event loop ended abnormally");
        }
        Ok::<(), MqttError>(())
    };
    match tokio::time::timeout(DISCONNECT_GRACE, disconnect).await {
        Ok(Ok(())) => tracing::info!("broker disconnected"),
        Ok(Err(err)) => tracing::warn!(%err, "broker disconnect failed"),
        Err(_) => tracing::warn!(
            grace_secs = DISCONNECT_GRACE.as_secs(),
            "broker disconnect timed out"
        ),
    }
    mqtt.abort();

    Ok(())
}

async fn sweep_idle(service: Arc<Service>) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        service.sweep_idle().await;
    }
}

async fn read_console(service: Arc<Service>) {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match line.parse::<ConsoleCommand>() {
                Ok(command) => run_command(&service, command).await,
                Err(err) => tracing::warn!(%err, "console command rejected"),
            },
            Ok(None) => {
                tracing::debug!("console closed");
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "console read failed");
                return;
            }
        }
    }
}

async fn run_command(service: &Service, command: ConsoleCommand) {
    let result = match command {
        ConsoleCommand::Toggle(room) => service.local_toggle(room).await.map(Some),
        ConsoleCommand::Set(room, on) => service.local_set(room, on).await.map(Some),
        ConsoleCommand::Motion(room) => service.motion(room).await,
        ConsoleCommand::Status => {
            for zone in service.controller().snapshot() {
                tracing::info!(room = %zone.zone, light = %zone.light(), "zone status");
            }
            return;
        }
    };

    match result {
        Ok(Some(change)) => {
            let transition = change.transition;
            match change.announcement {
                Announcement::Sent => {
                    tracing::info!(room = %transition.zone(), light = %transition.state(), "announced");
                }
                Announcement::NotNeeded => {
                    tracing::info!(room = %transition.zone(), light = %transition.state(), "unchanged");
                }
                // Already logged by the service.
                Announcement::Failed(_) => {}
            }
        }
        Ok(None) => tracing::info!("motion ignored, room is not monitored"),
        Err(err) => tracing::warn!(%err, "console command failed"),
    }
}
