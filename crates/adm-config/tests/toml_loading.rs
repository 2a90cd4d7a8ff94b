//! Integration tests for layered configuration loading.
//!
//! Uses `figment::Jail` for sandboxed files and env vars.

use adm_config::{AdmConfig, SessionMode};
use adm_core::enums::TransitionPolicy;
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_local_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "admissions.toml",
            r#"
[server]
bind_addr = "0.0.0.0:8080"

[database]
path = "/var/lib/admissions/app.db"

[auth]
admin_password = "s3cret"
session_days = 3
mode = "token"

[workflow]
policy = "final_decisions"

[client]
base_url = "https://apply.example.edu"
"#,
        )?;

        let config = AdmConfig::load().expect("config loads");
        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.database.path, "/var/lib/admissions/app.db");
        assert_eq!(config.auth.admin_password, "s3cret");
        assert_eq!(config.auth.session_days, 3);
        assert_eq!(config.auth.mode, SessionMode::Token);
        assert_eq!(config.auth.cookie_name, "admin_authed");
        assert_eq!(config.workflow.policy, TransitionPolicy::FinalDecisions);
        assert_eq!(config.client.base_url, "https://apply.example.edu");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "admissions.toml",
            r#"
[auth]
admin_password = "from-file"
"#,
        )?;
        jail.set_env("ADMISSIONS_AUTH__ADMIN_PASSWORD", "from-env");
        jail.set_env("ADMISSIONS_DATABASE__PATH", ":memory:");

        let config = AdmConfig::load().expect("config loads");
        assert_eq!(config.auth.admin_password, "from-env");
        assert_eq!(config.database.path, ":memory:");
        Ok(())
    });
}

#[test]
fn defaults_without_any_source() {
    Jail::expect_with(|_jail| {
        let config = AdmConfig::load().expect("defaults load");
        assert_eq!(config.auth.protected_prefix, "/admin");
        assert_eq!(config.auth.login_path, "/login");
        assert_eq!(config.workflow.policy, TransitionPolicy::Unrestricted);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_loading() {
    Jail::expect_with(|jail| {
        jail.set_env("ADMISSIONS_AUTH__SESSION_DAYS", "0");
        assert!(AdmConfig::load().is_err());
        Ok(())
    });
}
