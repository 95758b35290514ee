use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

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

fn clear_validity_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("VALIDITY_EMBEDDER_PATH");
        env::remove_var("VALIDITY_CLASSIFIER_PATH");
        env::remove_var("VALIDITY_CLASSIFIER_LABELS");
        env::remove_var("VALIDITY_USER_AGENT");
        env::remove_var("VALIDITY_FALLBACK_MODE");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.embedder_path.is_none());
    assert!(config.classifier_path.is_none());
    assert!(config.classifier_labels.is_none());
    assert!(config.user_agent.is_none());
    assert!(!config.fallback_mode);
    assert!(!config.has_backends());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_validity_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert!(config.embedder_path.is_none());
    assert!(!config.fallback_mode);
}

#[test]
#[serial]
fn test_from_env_paths_and_labels() {
    clear_validity_env();

    let config = with_env_vars(
        &[
            ("VALIDITY_EMBEDDER_PATH", "/models/minilm"),
            ("VALIDITY_CLASSIFIER_PATH", " /models/sentiment "),
            ("VALIDITY_CLASSIFIER_LABELS", "negative, neutral ,positive"),
            ("VALIDITY_USER_AGENT", "TestAgent/1.0"),
        ],
        Config::from_env,
    )
    .expect("should parse env");

    assert_eq!(config.embedder_path, Some(PathBuf::from("/models/minilm")));
    assert_eq!(
        config.classifier_path,
        Some(PathBuf::from("/models/sentiment"))
    );
    assert_eq!(
        config.classifier_labels,
        Some(vec![
            "negative".to_string(),
            "neutral".to_string(),
            "positive".to_string()
        ])
    );
    assert_eq!(config.user_agent.as_deref(), Some("TestAgent/1.0"));
    assert!(config.has_backends());
}

#[test]
#[serial]
fn test_from_env_blank_path_is_none() {
    clear_validity_env();

    let config = with_env_vars(&[("VALIDITY_EMBEDDER_PATH", "   ")], Config::from_env)
        .expect("should parse env");

    assert!(config.embedder_path.is_none());
}

#[test]
#[serial]
fn test_from_env_fallback_mode() {
    clear_validity_env();

    let config = with_env_vars(
        &[
            ("VALIDITY_FALLBACK_MODE", "TRUE"),
            ("VALIDITY_EMBEDDER_PATH", "/models/minilm"),
        ],
        Config::from_env,
    )
    .expect("should parse env");

    assert!(config.fallback_mode);
    assert!(!config.has_backends());
}

#[test]
#[serial]
fn test_from_env_invalid_bool() {
    clear_validity_env();

    let result = with_env_vars(&[("VALIDITY_FALLBACK_MODE", "maybe")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            name: "VALIDITY_FALLBACK_MODE",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_from_env_empty_label_entry() {
    clear_validity_env();

    let result = with_env_vars(
        &[("VALIDITY_CLASSIFIER_LABELS", "negative,,positive")],
        Config::from_env,
    );

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_validate_missing_path() {
    let config = Config {
        embedder_path: Some(PathBuf::from("/nonexistent/embedder")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_file_instead_of_dir() {
    let file = tempfile::NamedTempFile::new().expect("temp file");
    let config = Config {
        classifier_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_existing_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config {
        embedder_path: Some(dir.path().to_path_buf()),
        classifier_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(config.validate().is_ok());
}

#[test]
fn test_error_display() {
    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/missing"),
    };
    assert_eq!(err.to_string(), "path does not exist: /missing");

    let err = ConfigError::InvalidValue {
        name: "VALIDITY_FALLBACK_MODE",
        value: "maybe".to_string(),
        reason: "expected a boolean".to_string(),
    };
    assert!(err.to_string().contains("VALIDITY_FALLBACK_MODE"));
    assert!(err.to_string().contains("maybe"));
}
