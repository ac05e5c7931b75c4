use autobus_config::{
    AppConfig, ENV_ACCEPT_WORKERS, ENV_DEBUG, ENV_HANDLER_WORKERS, ENV_LISTEN_ADDR,
    ENV_LOG_MESSAGES, parse_flag,
};
use std::sync::Mutex;

// 环境变量是进程级共享状态，测试之间串行执行。
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    // Rust 2024 中 set_var/remove_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        for key in [
            ENV_LISTEN_ADDR,
            ENV_ACCEPT_WORKERS,
            ENV_HANDLER_WORKERS,
            ENV_DEBUG,
            ENV_LOG_MESSAGES,
        ] {
            std::env::remove_var(key);
        }
    }
}

#[test]
fn defaults_when_env_missing() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.listen_addr, "");
    assert_eq!(config.accept_workers, None);
    assert_eq!(config.handler_workers, None);
    assert!(!config.debug);
    assert!(!config.log_messages);
}

#[test]
fn load_config_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(ENV_LISTEN_ADDR, "127.0.0.1:9100");
        std::env::set_var(ENV_ACCEPT_WORKERS, "4");
        std::env::set_var(ENV_HANDLER_WORKERS, "16");
        std::env::set_var(ENV_DEBUG, "TRUE");
        std::env::set_var(ENV_LOG_MESSAGES, "t");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.listen_addr, "127.0.0.1:9100");
    assert_eq!(config.accept_workers, Some(4));
    assert_eq!(config.handler_workers, Some(16));
    assert!(config.debug);
    assert!(config.log_messages);
    clear_env();
}

#[test]
fn invalid_worker_count_is_rejected() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(ENV_HANDLER_WORKERS, "many");
    }

    let err = AppConfig::from_env().unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("invalid value for {ENV_HANDLER_WORKERS}: many")
    );
    clear_env();
}

#[test]
fn unknown_debug_value_is_false() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(ENV_DEBUG, "yes please");
    }

    let config = AppConfig::from_env().expect("config");
    assert!(!config.debug);
    clear_env();
}

#[test]
fn on_is_not_a_flag_value() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(ENV_DEBUG, "on");
        std::env::set_var(ENV_LOG_MESSAGES, "True");
    }

    let config = AppConfig::from_env().expect("config");
    assert!(!config.debug);
    assert!(config.log_messages);
    clear_env();
}

#[test]
fn blank_worker_counts_are_unset() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
    clear_env();
    unsafe {
        std::env::set_var(ENV_ACCEPT_WORKERS, "  ");
        std::env::set_var(ENV_HANDLER_WORKERS, " 8 ");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.accept_workers, None);
    assert_eq!(config.handler_workers, Some(8));
    clear_env();
}

#[test]
fn flag_values() {
    for raw in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(parse_flag(raw), Some(true), "{raw}");
    }
    for raw in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(parse_flag(raw), Some(false), "{raw}");
    }
    for raw in ["", "on", "yes", "tRUE"] {
        assert_eq!(parse_flag(raw), None, "{raw}");
    }
}
