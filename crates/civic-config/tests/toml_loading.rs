//! Integration tests for layered configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use civic_config::{CivicConfig, ConfigError};
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

fn layered(file: &str) -> Figment {
    Figment::from(Serialized::defaults(CivicConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("CIVIC_").split("__"))
}

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
host = "127.0.0.1"
port = 8080

[auth]
jwt_secret = "0123456789abcdef0123"
token_ttl_secs = 3600

[database]
path = "/var/lib/civic/issues.db"

[general]
default_limit = 50
max_limit = 80
"#,
        )?;

        let config: CivicConfig = layered("config.toml").extract()?;

        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert!(config.auth.require_secret().is_ok());
        assert_eq!(config.database.path, "/var/lib/civic/issues.db");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.max_limit, 80);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[server]\nport = 9000\n")?;

        let config: CivicConfig = layered("config.toml").extract()?;

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.token_ttl_secs, 604_800);
        assert_eq!(config.database.path, "civic.db");
        assert!(!config.auth.is_configured());
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            "[server]\nport = 9000\n\n[auth]\njwt_secret = \"from-toml-0123456789\"\n",
        )?;
        jail.set_env("CIVIC_SERVER__PORT", "7000");
        jail.set_env("CIVIC_AUTH__JWT_SECRET", "from-env-0123456789");

        let config: CivicConfig = layered("config.toml").extract()?;

        assert_eq!(config.server.port, 7000);
        assert_eq!(config.auth.jwt_secret, "from-env-0123456789");
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".civic")?;
        jail.create_file(".civic/config.toml", "[database]\npath = \"project.db\"\n")?;

        let config: CivicConfig = CivicConfig::figment().extract()?;

        assert_eq!(config.database.path, "project.db");
        Ok(())
    });
}

#[test]
fn explicit_file_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".civic")?;
        jail.create_file(".civic/config.toml", "[general]\ndefault_limit = 5\n")?;
        jail.create_file("override.toml", "[general]\ndefault_limit = 7\n")?;

        let config = CivicConfig::load_from_file(std::path::Path::new("override.toml"))
            .map_err(|e| e.to_string())?;

        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn wrong_type_is_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[server]\nport = \"not-a-port\"\n")?;

        let result: Result<CivicConfig, ConfigError> =
            layered("config.toml").extract().map_err(ConfigError::from);

        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
