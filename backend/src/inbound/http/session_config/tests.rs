//! Unit tests for session configuration validation.

use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::*;

struct KeyFile {
    _dir: TempDir,
    path: PathBuf,
}

fn key_file(len: usize) -> KeyFile {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session_key");
    std::fs::write(&path, vec![b'k'; len]).expect("write key");
    KeyFile { _dir: dir, path }
}

#[fixture]
fn release_key() -> KeyFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_toggles(key: &KeyFile) -> SessionToggles {
    SessionToggles {
        key_file: Some(key.path.clone()),
        cookie_secure: Some(true),
        same_site: Some("Strict".to_owned()),
        allow_ephemeral: Some(false),
    }
}

fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
    match result {
        Ok(_) => panic!("expected session configuration to be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_explicit_safe_values(release_key: KeyFile) {
    let settings =
        session_settings(&release_toggles(&release_key), BuildMode::Release).expect("valid");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case::cookie_secure("session_cookie_secure")]
#[case::same_site("session_same_site")]
#[case::allow_ephemeral("session_allow_ephemeral")]
fn release_requires_every_toggle(release_key: KeyFile, #[case] missing: &'static str) {
    let mut toggles = release_toggles(&release_key);
    match missing {
        "session_cookie_secure" => toggles.cookie_secure = None,
        "session_same_site" => toggles.same_site = None,
        _ => toggles.allow_ephemeral = None,
    }
    let error = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(error, SessionConfigError::MissingSetting { name } if name == missing));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = key_file(SESSION_KEY_MIN_LEN - 1);
    let error = expect_error(session_settings(&release_toggles(&key), BuildMode::Release));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_accepts_short_keys() {
    let key = key_file(8);
    assert!(session_settings(&release_toggles(&key), BuildMode::Debug).is_ok());
}

#[rstest]
fn release_rejects_same_site_none_without_secure(release_key: KeyFile) {
    let toggles = SessionToggles {
        cookie_secure: Some(false),
        same_site: Some("None".to_owned()),
        ..release_toggles(&release_key)
    };
    let error = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
}

#[rstest]
fn release_rejects_unknown_same_site(release_key: KeyFile) {
    let toggles = SessionToggles {
        same_site: Some("sometimes".to_owned()),
        ..release_toggles(&release_key)
    };
    let error = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(error, SessionConfigError::InvalidSetting { .. }));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: KeyFile) {
    let toggles = SessionToggles {
        allow_ephemeral: Some(true),
        ..release_toggles(&release_key)
    };
    let error = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_missing_key_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let toggles = SessionToggles {
        key_file: Some(dir.path().join("absent")),
        cookie_secure: Some(true),
        same_site: Some("Lax".to_owned()),
        allow_ephemeral: Some(false),
    };
    let error = expect_error(session_settings(&toggles, BuildMode::Release));
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_defaults_are_permissive() {
    let dir = tempfile::tempdir().expect("temp dir");
    let toggles = SessionToggles {
        key_file: Some(dir.path().join("absent")),
        ..SessionToggles::default()
    };
    let settings = session_settings(&toggles, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}
