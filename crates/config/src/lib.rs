mod settings;

pub use settings::{EngineSettings, LogSettings, Settings};
