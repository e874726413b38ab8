use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_lantern_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("LANTERN_PORT");
        env::remove_var("LANTERN_BIND_ADDR");
        env::remove_var("LANTERN_JUDGE_MODEL");
        env::remove_var("LANTERN_RATE_CEILING");
        env::remove_var("LANTERN_RATE_WINDOW_SECS");
        env::remove_var("LANTERN_CACHE_TTL_SECS");
        env::remove_var("LANTERN_CACHE_CAPACITY");
        env::remove_var("LANTERN_MAX_CANDIDATES");
        env::remove_var("LANTERN_REMOTE_CAP");
        env::remove_var("LANTERN_TOP_N");
        env::remove_var("LANTERN_MIN_SCORE");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8787);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.judge_model, "gpt-4o-mini");
    assert_eq!(config.rate_ceiling, 120);
    assert_eq!(config.rate_window_secs, 60);
    assert_eq!(config.cache_ttl_secs, 30);
    assert_eq!(config.max_candidates, 800);
    assert_eq!(config.remote_cap, 80);
    assert_eq!(config.top_n, 5);
    assert_eq!(config.min_score, 8);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8787");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_lantern_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.port, 8787);
    assert_eq!(config.judge_model, "gpt-4o-mini");
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_custom_bind_addr() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_BIND_ADDR", "0.0.0.0")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0))
        );
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
        assert!(err.to_string().contains("failed to parse port"));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_numeric_overrides() {
    clear_lantern_env();

    with_env_vars(
        &[
            ("LANTERN_RATE_CEILING", "10"),
            ("LANTERN_RATE_WINDOW_SECS", "5"),
            ("LANTERN_CACHE_TTL_SECS", "120"),
            ("LANTERN_REMOTE_CAP", "40"),
            ("LANTERN_TOP_N", "3"),
            ("LANTERN_MIN_SCORE", "-2"),
        ],
        || {
            let config = Config::from_env().expect("should parse");
            assert_eq!(config.rate_ceiling, 10);
            assert_eq!(config.rate_window_secs, 5);
            assert_eq!(config.cache_ttl_secs, 120);
            assert_eq!(config.remote_cap, 40);
            assert_eq!(config.top_n, 3);
            assert_eq!(config.min_score, -2);
        },
    );
}

#[test]
#[serial]
fn test_invalid_numeric_override_uses_default() {
    clear_lantern_env();

    with_env_vars(&[("LANTERN_RATE_CEILING", "not_a_number")], || {
        let config = Config::from_env().expect("should parse with fallback");
        assert_eq!(config.rate_ceiling, 120);
    });
}

#[test]
fn test_validate_rejects_zero_limits() {
    let config = Config {
        rate_ceiling: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::ZeroLimit { .. }
    ));

    let config = Config {
        rate_window_secs: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate().unwrap_err(),
        ConfigError::ZeroLimit { .. }
    ));
}

#[test]
fn test_validate_rejects_cap_inversion() {
    let config = Config {
        max_candidates: 50,
        remote_cap: 80,
        judge_model: "unknown-model".to_string(),
        ..Default::default()
    };
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ConfigError::CapOrdering { .. }));
    assert!(err.to_string().contains("80"));
}

#[test]
fn test_credential_env_for_model() {
    assert_eq!(credential_env_for_model("gpt-4o-mini"), Some("OPENAI_API_KEY"));
    assert_eq!(
        credential_env_for_model("claude-sonnet-4-20250514"),
        Some("ANTHROPIC_API_KEY")
    );
    assert_eq!(
        credential_env_for_model("gemini-2.0-flash"),
        Some("GEMINI_API_KEY")
    );
    assert_eq!(
        credential_env_for_model("deepseek-chat"),
        Some("DEEPSEEK_API_KEY")
    );
    assert_eq!(credential_env_for_model("grok-3"), Some("XAI_API_KEY"));
    assert_eq!(credential_env_for_model("local-llama"), None);
}

#[test]
#[serial]
fn test_validate_checks_judge_credential() {
    clear_lantern_env();

    let config = Config {
        judge_model: "grok-3".to_string(),
        ..Default::default()
    };

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe { env::remove_var("XAI_API_KEY") };
    let err = config.validate().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingEnvVar { name: "XAI_API_KEY" }
    ));

    with_env_vars(&[("XAI_API_KEY", "test-key")], || {
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_validate_skips_unknown_provider() {
    let config = Config {
        judge_model: "local-llama".to_string(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}
