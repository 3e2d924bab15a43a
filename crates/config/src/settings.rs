use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub engine: EngineSettings,
    pub log: LogSettings,
}

/// Tunables for a single call's synchronization engine.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineSettings {
    /// Page size for snapshot, pagination and backfill fetches.
    pub fetch_limit: u32,
    /// Seconds of silence after which a speaking rank is cleared.
    pub activity_window_secs: u64,
    /// Period of the activity decay sweep.
    pub decay_interval_secs: u64,
    /// Capacity of the per-call command channel.
    pub command_channel_capacity: usize,
    /// Capacity of the member-event broadcast channel.
    pub member_event_capacity: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub filter: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("CALLSYNC"),
            )
            .set_default("engine.fetch_limit", 50)?
            .set_default("engine.activity_window_secs", 60)?
            .set_default("engine.decay_interval_secs", 10)?
            .set_default("engine.command_channel_capacity", 256)?
            .set_default("engine.member_event_capacity", 64)?
            .set_default("log.filter", "info")?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Settings::default().engine
    }
}
