use std::{collections::HashMap, fs, net::SocketAddr, path::Path};

use anyhow::Context;
use serde::Deserialize;

const SETTINGS_FILE: &str = "controller.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub player1_name: String,
    pub player2_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8470".into(),
            player1_name: "P1".into(),
            player2_name: "P2".into(),
        }
    }
}

impl Settings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid bind address '{}'", self.bind_addr))
    }

    pub fn player_names(&self) -> [String; 2] {
        [self.player1_name.clone(), self.player2_name.clone()]
    }
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the flat TOML table at `path`, then environment variables.
fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.bind_addr = v.clone();
                }
                if let Some(v) = file_cfg.get("player1_name") {
                    settings.player1_name = v.clone();
                }
                if let Some(v) = file_cfg.get("player2_name") {
                    settings.player2_name = v.clone();
                }
            }
            Err(err) => tracing::warn!(path = %path.display(), %err, "ignoring unreadable settings file"),
        }
    }

    if let Some(v) = env("CONTROLLER_BIND") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = env("APP__PLAYER1_NAME") {
        settings.player1_name = v;
    }
    if let Some(v) = env("APP__PLAYER2_NAME") {
        settings.player2_name = v;
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
