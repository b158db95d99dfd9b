// Framework bootstrap for the headless console client: fixed-rate frame
// loop, stdin command task, relay connection and background saves.

use crate::domain::controls::Gesture;
use crate::domain::progression::{PurchaseOutcome, SaveData};
use crate::frameworks::config;
use crate::frameworks::runtime::init_runtime;
use crate::interface_adapters::clients::relay::{ConnectionStatus, RelayClient};
use crate::interface_adapters::clients::save::{FileSaveStore, HttpSaveStore};
use crate::interface_adapters::console::{self, Command};
use crate::interface_adapters::utils::rng::{player_id, time_seed};
use crate::use_cases::persistence::{ProgressStore, fetch_leaderboard};
use crate::use_cases::{FrameReport, GameSession, GameState};

use std::io::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

type Store = ProgressStore<HttpSaveStore, FileSaveStore>;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub relay_url: String,
    pub save_api_url: String,
    pub save_timeout: Duration,
    pub save_file_path: String,
    pub seed: u64,
    pub name_tag: Option<String>,
}

impl ClientSettings {
    pub fn from_env() -> Self {
        Self {
            relay_url: config::relay_url(),
            save_api_url: config::save_api_url(),
            save_timeout: config::save_timeout(),
            save_file_path: config::save_file_path(),
            seed: config::session_seed().unwrap_or_else(time_seed),
            name_tag: config::player_name_tag(),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();
    let settings = ClientSettings::from_env();

    let (line_tx, line_rx) = mpsc::channel(config::CONSOLE_CHANNEL_CAPACITY);
    tokio::spawn(read_stdin(line_tx));

    run(settings, line_rx).await
}

async fn read_stdin(line_tx: mpsc::Sender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line_tx.send(line).await.is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "stdin read failed");
                break;
            }
        }
    }
}

/// Runs one player session until `quit` or until the command source closes.
pub async fn run(settings: ClientSettings, mut line_rx: mpsc::Receiver<String>) -> Result<()> {
    let remote = HttpSaveStore::new(settings.save_api_url.clone(), settings.save_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize save client: {e}")))?;
    let store = Arc::new(ProgressStore {
        remote,
        local: FileSaveStore::new(&settings.save_file_path),
    });
    tracing::debug!(
        save_api_url = %settings.save_api_url,
        save_timeout_ms = settings.save_timeout.as_millis(),
        save_file = %settings.save_file_path,
        "save client configured"
    );

    let id = player_id();
    let mut session = GameSession::new(id.clone(), settings.seed);
    session.apply_loaded(store.load().await);
    if let Some(tag) = settings.name_tag {
        session.set_name_tag(tag);
    }
    info!(player_id = %id, seed = settings.seed, "session ready");

    let relay = RelayClient::connect(settings.relay_url, id, config::OUTBOUND_POSE_CAPACITY);
    let (save_tx, save_handle) = spawn_save_task(store.clone());

    println!("AeroExpress. Type `start` to boot, `help` for commands.");

    let dt = config::FRAME_INTERVAL.as_secs_f32();
    let started = Instant::now();
    let mut interval = tokio::time::interval(config::FRAME_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    'frames: loop {
        interval.tick().await;

        loop {
            match line_rx.try_recv() {
                Ok(line) => {
                    if let Flow::Quit = handle_line(&line, &mut session, &relay, &store) {
                        break 'frames;
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => break 'frames,
            }
        }

        let report = session.frame(dt, started.elapsed().as_secs_f64());
        present_frame(&report);
        if let Some(pose) = report.pose {
            relay.send_pose(pose);
        }
        queue_save(&mut session, &save_tx);
    }

    info!("shutting down");
    session.request_save();
    queue_save(&mut session, &save_tx);
    // Closing the queue lets the save task drain what is pending.
    drop(save_tx);
    if let Err(err) = save_handle.await {
        warn!(error = ?err, "save task ended abnormally");
    }
    relay.disconnect().await;
    Ok(())
}

fn spawn_save_task(store: Arc<Store>) -> (mpsc::Sender<SaveData>, JoinHandle<()>) {
    let (save_tx, mut save_rx) = mpsc::channel::<SaveData>(8);
    let handle = tokio::spawn(async move {
        // Sequential so an older snapshot never overwrites a newer one.
        while let Some(data) = save_rx.recv().await {
            if !store.save(&data).await {
                warn!("progress could not be saved");
            }
        }
    });
    (save_tx, handle)
}

fn queue_save(session: &mut GameSession, save_tx: &mpsc::Sender<SaveData>) {
    if let Some(data) = session.take_save_request() {
        if save_tx.try_send(data).is_err() {
            warn!("save queue full; dropping snapshot");
        }
    }
}

fn present_frame(report: &FrameReport) {
    match report.transition {
        Some(GameState::Success) => {
            println!("Delivery complete! Type `continue` to collect your reward.")
        }
        Some(GameState::Crashed) => println!("Hard landing, the aircraft is lost. Type `continue`."),
        _ => {}
    }
    for trophy in &report.unlocked {
        println!("Trophy unlocked: {}", trophy.title());
    }
}

fn relay_label(relay: &RelayClient) -> &'static str {
    match relay.status() {
        ConnectionStatus::Connecting => "connecting",
        ConnectionStatus::Online => "online",
        ConnectionStatus::Offline => "offline",
    }
}

fn handle_line(line: &str, session: &mut GameSession, relay: &RelayClient, store: &Arc<Store>) -> Flow {
    let command = match line.parse::<Command>() {
        Ok(command) => command,
        Err(console::CommandError::Empty) => return Flow::Continue,
        Err(err) => {
            println!("{err}");
            return Flow::Continue;
        }
    };

    match command {
        Command::Start => report(session.finish_boot().map(|()| "Systems online.".to_string())),
        Command::Missions => println!("{}", console::render_missions()),
        Command::Fly(km) => report(session.start_mission(km).map(|m| {
            format!(
                "Deliver to {} ({} km). Runway offset {:.0}. Reward {}.",
                m.destination_name, m.distance_km, m.target_offset_x, m.reward
            )
        })),
        Command::Throttle(value) => session.apply_gesture(Gesture::Throttle(value)),
        Command::Stick { x, y } => {
            session.apply_gesture(Gesture::StickPress);
            session.apply_gesture(Gesture::StickMove { dx: x, dy: y });
        }
        Command::Release => session.apply_gesture(Gesture::StickRelease),
        Command::Rudder(value) => session.apply_gesture(Gesture::Rudder(value)),
        Command::Toggle(system) => {
            let outcome = session.toggle_system(system);
            println!("{system}: {outcome:?}");
        }
        Command::Announce(text) => session.announce(text),
        Command::Shop => println!("{}", console::render_shop(session)),
        Command::Buy(item) => match session.buy(&item) {
            PurchaseOutcome::Bought => println!("Bought {item}."),
            PurchaseOutcome::AlreadyOwned => println!("{item} equipped."),
            PurchaseOutcome::InsufficientFunds => println!("Not enough money for {item}."),
            PurchaseOutcome::UnknownItem => println!("No such item: {item}."),
        },
        Command::Redeem(code) => {
            session.redeem(&code);
            if let Some(notice) = session.notice() {
                println!("{notice}");
            }
        }
        Command::Continue => report(session.continue_to_menu().map(|debrief| match debrief {
            Some(d) => format!("Collected {} coins.", d.reward),
            None => "Back to the menu.".to_string(),
        })),
        Command::Abort => report(session.abort_mission().map(|()| "Mission aborted.".to_string())),
        Command::Status => println!("{}", console::render_status(session, relay_label(relay))),
        Command::Players => println!("{}", console::render_players(&relay.roster())),
        Command::Leaderboard => {
            let store = store.clone();
            tokio::spawn(async move {
                let entries = fetch_leaderboard(&store.remote).await;
                println!("{}", console::render_leaderboard(&entries));
            });
        }
        Command::Save => {
            session.request_save();
            println!("Saving.");
        }
        Command::Help => println!("{}", console::HELP),
        Command::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn report<E: std::fmt::Debug>(result: std::result::Result<String, E>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => println!("Not now: {err:?}"),
    }
}
