#![allow(clippy::unwrap_used)]
// Config loading, token resolution, and profile → client translation.
//
// Every test touching the environment runs inside `figment::Jail`, which
// serializes access and restores variables afterwards.

use std::path::Path;
use std::time::Duration;

use figment::Jail;
use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;

use fathom_api::ApiVersion;
use fathom_config::{
    Config, ConfigError, Defaults, Profile, active_profile, build_client, load_config_from,
    profile_to_options, resolve_token, save_config_to,
};

const SAMPLE: &str = r#"
default_profile = "work"

[defaults]
timeout = 30

[profiles.work]
token = "plain-token"
base_url = "https://fathom.internal.example"

[profiles.home]
token_env = "HOME_FATHOM_TOKEN"
version = "v1"
timeout = 5
"#;

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn missing_file_yields_defaults() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let cfg = load_config_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        Ok(())
    });
}

#[test]
fn loads_profiles_from_toml() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("config.toml", SAMPLE)?;

        let cfg = load_config_from(Path::new("config.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("work"));
        assert_eq!(cfg.defaults.timeout, Some(30));
        assert_eq!(cfg.profiles.len(), 2);
        assert_eq!(cfg.profiles["work"].token.as_deref(), Some("plain-token"));
        assert_eq!(
            cfg.profiles["home"].token_env.as_deref(),
            Some("HOME_FATHOM_TOKEN")
        );
        assert_eq!(cfg.profiles["home"].timeout, Some(5));
        Ok(())
    });
}

#[test]
fn env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("config.toml", SAMPLE)?;
        jail.set_env("FATHOM_DEFAULT_PROFILE", "home");
        jail.set_env("FATHOM_PROFILES__WORK__BASE_URL", "http://localhost:9000");
        jail.set_env("FATHOM_DEFAULTS__TIMEOUT", "12");

        let cfg = load_config_from(Path::new("config.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("home"));
        assert_eq!(
            cfg.profiles["work"].base_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(cfg.profiles["work"].token.as_deref(), Some("plain-token"));
        assert_eq!(cfg.defaults.timeout, Some(12));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file("config.toml", "profiles = [not toml")?;

        let err = load_config_from(Path::new("config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "got: {err:?}");
        Ok(())
    });
}

// ── Saving ──────────────────────────────────────────────────────────

#[test]
fn save_creates_parent_dirs_and_reloads() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                token_env: Some("MY_TOKEN".into()),
                timeout: Some(10),
                ..Profile::default()
            },
        );
        save_config_to(&path, &cfg).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[profiles.default]"), "{written}");
        assert!(!written.contains("base_url"), "{written}");

        assert_eq!(load_config_from(&path).unwrap(), cfg);
        Ok(())
    });
}

// ── Profile selection ───────────────────────────────────────────────

#[test]
fn active_profile_uses_default_then_explicit_name() {
    let cfg: Config = toml::from_str(SAMPLE).unwrap();

    let (name, profile) = active_profile(&cfg, None).unwrap();
    assert_eq!(name, "work");
    assert_eq!(profile.token.as_deref(), Some("plain-token"));

    let (name, _) = active_profile(&cfg, Some("home")).unwrap();
    assert_eq!(name, "home");

    let err = active_profile(&cfg, Some("missing")).unwrap_err();
    assert_eq!(err.to_string(), "invalid profile: profile 'missing' not found");
}

// ── Token resolution ────────────────────────────────────────────────

#[test]
fn token_env_wins_over_everything() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("HOME_FATHOM_TOKEN", "from-profile-env");
        jail.set_env("FATHOM_TOKEN", "from-global-env");

        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("HOME_FATHOM_TOKEN".into()),
            ..Profile::default()
        };
        let token = resolve_token(&profile, "home").unwrap();
        assert_eq!(token.expose_secret(), "from-profile-env");
        Ok(())
    });
}

#[test]
fn global_env_then_plaintext() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let profile = Profile {
            token: Some("plain".into()),
            token_env: Some("UNSET_VARIABLE".into()),
            ..Profile::default()
        };

        assert_eq!(
            resolve_token(&profile, "work").unwrap().expose_secret(),
            "plain"
        );

        jail.set_env("FATHOM_TOKEN", "from-global-env");
        assert_eq!(
            resolve_token(&profile, "work").unwrap().expose_secret(),
            "from-global-env"
        );
        Ok(())
    });
}

#[test]
fn no_token_anywhere() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let err = resolve_token(&Profile::default(), "fathom-config-test-nobody").unwrap_err();
        assert!(
            matches!(err, ConfigError::NoCredentials { ref profile } if profile == "fathom-config-test-nobody"),
            "got: {err:?}"
        );
        Ok(())
    });
}

// ── Client options ──────────────────────────────────────────────────

#[test]
fn profile_to_options_applies_overrides() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.set_env("HOME_FATHOM_TOKEN", "secret");
        let cfg: Config = toml::from_str(SAMPLE).unwrap();

        let home = profile_to_options(&cfg.profiles["home"], "home", &cfg.defaults).unwrap();
        assert_eq!(home.token.expose_secret(), "secret");
        assert_eq!(home.version, Some(ApiVersion::V1));
        assert_eq!(home.base_url, None);
        assert_eq!(home.transport.timeout, Some(Duration::from_secs(5)));

        let work = profile_to_options(&cfg.profiles["work"], "work", &cfg.defaults).unwrap();
        assert_eq!(work.base_url.as_deref(), Some("https://fathom.internal.example"));
        assert_eq!(work.transport.timeout, Some(Duration::from_secs(30)));
        Ok(())
    });
}

#[test]
fn no_timeout_unless_configured() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let profile = Profile {
            token: Some("t".into()),
            ..Profile::default()
        };
        let options = profile_to_options(&profile, "default", &Defaults::default()).unwrap();
        assert_eq!(options.transport.timeout, None);
        Ok(())
    });
}

#[test]
fn bad_version_and_url_are_rejected() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let bad_version = Profile {
            token: Some("t".into()),
            version: Some("v2".into()),
            ..Profile::default()
        };
        let err = profile_to_options(&bad_version, "p", &Defaults::default()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "version"),
            "got: {err:?}"
        );

        let bad_url = Profile {
            token: Some("t".into()),
            base_url: Some("not a url".into()),
            ..Profile::default()
        };
        let err = profile_to_options(&bad_url, "p", &Defaults::default()).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation { ref field, .. } if field == "base_url"),
            "got: {err:?}"
        );
        Ok(())
    });
}

#[test]
fn build_client_from_default_profile() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        let cfg: Config = toml::from_str(SAMPLE).unwrap();

        let client = build_client(&cfg, None).unwrap();
        assert_eq!(
            client.http().base_url().as_str(),
            "https://fathom.internal.example/"
        );
        Ok(())
    });
}
