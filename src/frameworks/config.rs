use std::{env, time::Duration};

// Runtime constants and environment settings (not gameplay tuning).

pub fn relay_port() -> u16 {
    env::var("RELAY_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub fn relay_url() -> String {
    env::var("RELAY_URL").unwrap_or_else(|_| "ws://127.0.0.1:3001/ws".to_string())
}

pub fn save_api_url() -> String {
    env::var("SAVE_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3003".to_string())
}

pub fn save_timeout() -> Duration {
    let millis = env::var("SAVE_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(1500);
    Duration::from_millis(millis)
}

pub fn save_file_path() -> String {
    env::var("SAVE_FILE_PATH").unwrap_or_else(|_| "aeroexpress_save.json".to_string())
}

/// Fixed seed for reproducible sessions; unset means time based.
pub fn session_seed() -> Option<u64> {
    env::var("SESSION_SEED").ok().and_then(|v| v.parse().ok())
}

pub fn player_name_tag() -> Option<String> {
    env::var("PLAYER_NAME_TAG")
        .ok()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
}

pub const RELAY_EVENT_CHANNEL_CAPACITY: usize = 1024;
pub const ROSTER_BROADCAST_CAPACITY: usize = 128;
pub const OUTBOUND_POSE_CAPACITY: usize = 32;
pub const CONSOLE_CHANNEL_CAPACITY: usize = 64;

pub const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 60);
pub const ROSTER_BROADCAST_INTERVAL: Duration = Duration::from_millis(100);
