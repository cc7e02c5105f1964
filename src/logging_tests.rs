use super::*;
use std::path::Path;

#[test]
fn test_log_config_default() {
    let config = LogConfig::default();
    assert_eq!(config.log_level, Level::INFO);
    assert!(!config.json_format);
    assert!(config.log_dir.ends_with("logs"));
}

#[test]
fn test_log_config_default_log_dir_under_app_folder() {
    let config = LogConfig::default();
    let path_str = config.log_dir.to_string_lossy();
    assert!(path_str.contains(".thankful-wall"));
}

#[test]
fn test_from_settings() {
    let settings = LoggingConfig {
        json: true,
        rotation: "never".to_string(),
        dir: Some("/var/log/wall".into()),
    };
    let config = LogConfig::from_settings(&settings);

    assert!(config.json_format);
    assert_eq!(config.log_dir, Path::new("/var/log/wall"));
    assert_eq!(
        format!("{:?}", config.rotation),
        format!("{:?}", Rotation::NEVER)
    );
}

#[test]
fn test_from_settings_without_dir_uses_default() {
    let config = LogConfig::from_settings(&LoggingConfig::default());
    assert_eq!(config.log_dir, LogConfig::default().log_dir);
}

#[test]
fn test_parse_rotation_hourly() {
    let rotation = parse_rotation("hourly");
    // Rotation doesn't impl PartialEq, so use debug
    assert_eq!(format!("{rotation:?}"), format!("{:?}", Rotation::HOURLY));
}

#[test]
fn test_parse_rotation_case_insensitive() {
    assert_eq!(
        format!("{:?}", parse_rotation("NEVER")),
        format!("{:?}", Rotation::NEVER)
    );
}

#[test]
fn test_parse_rotation_unknown_defaults_to_daily() {
    let rotation = parse_rotation("weekly");
    let daily = format!("{:?}", parse_rotation("daily"));
    assert_eq!(format!("{rotation:?}"), daily);
}

#[test]
fn test_log_filename_constant() {
    assert_eq!(LOG_FILENAME, "thankful-wall.log");
}
