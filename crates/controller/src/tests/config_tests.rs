use super::*;

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_settings_file(label: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("tennis_controller_{label}_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_keeps_defaults() {
    let settings = load_settings_from(Path::new("/nonexistent/controller.toml"), no_env);
    assert_eq!(settings.bind_addr, "127.0.0.1:8470");
    assert_eq!(settings.player_names(), ["P1".to_string(), "P2".to_string()]);
    assert!(settings.socket_addr().is_ok());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file("file", "bind_addr = \"0.0.0.0:9000\"\nplayer1_name = \"Ana\"\n");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
    assert_eq!(settings.player1_name, "Ana");
    assert_eq!(settings.player2_name, "P2");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_settings_file("env", "bind_addr = \"0.0.0.0:9000\"\n");

    let settings = load_settings_from(&path, |key| match key {
        "APP__BIND_ADDR" => Some("127.0.0.1:9100".to_string()),
        "APP__PLAYER2_NAME" => Some("Bea".to_string()),
        _ => None,
    });
    assert_eq!(settings.bind_addr, "127.0.0.1:9100");
    assert_eq!(settings.player2_name, "Bea");

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn invalid_bind_addr_is_reported() {
    let settings = Settings {
        bind_addr: "not-an-addr".into(),
        ..Settings::default()
    };
    let err = settings.socket_addr().expect_err("should fail");
    assert!(err.to_string().contains("not-an-addr"));
}
