use prodtrack::theme::TokenValue;
use prodtrack::{InMemoryRepository, SchemaConfig, SchemaError, ThemeConfig, TransitionPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_config_file_drives_repository_options() {
    let file = write_config(
        r#"
[validation]
enforce_time_order = true
transitions = "strict"

[logging]
level = "warn"
"#,
    );

    let config = SchemaConfig::from_file(file.path()).unwrap();
    let options = config.repository_options();
    assert!(options.validation.enforce_time_order);
    assert_eq!(options.transitions, TransitionPolicy::Strict);
    assert!(options.check_references);

    let repo = InMemoryRepository::new(options);
    assert_eq!(repo.options(), options);
}

#[test]
fn test_theme_overrides_change_values_not_names() {
    let file = write_config(
        r##"
[theme.colors.primary]
dark = "#60a5fa"

[theme.durations]
fast = "90ms"

[theme.animations.fade-in]
duration = "450ms"
"##,
    );

    let theme = SchemaConfig::from_file(file.path()).unwrap().theme().unwrap();
    let builtin = ThemeConfig::default();

    assert_eq!(theme.token_names(), builtin.token_names());
    assert_eq!(theme.colors["primary"].dark, "#60a5fa");
    assert_eq!(theme.colors["primary"].light, builtin.colors["primary"].light);
    assert_eq!(theme.get("durations.fast"), Some(TokenValue::Plain("90ms")));

    match theme.get("animations.fade-in") {
        Some(TokenValue::Animation(animation)) => {
            assert_eq!(animation.duration, "450ms");
            assert_eq!(
                animation.keyframes,
                builtin.animations["fade-in"].keyframes
            );
        }
        other => panic!("expected animation token, got {:?}", other),
    }
}

#[test]
fn test_unknown_theme_token_is_rejected() {
    let file = write_config(
        r##"
[theme.colors.brand-magenta]
light = "#ff00ff"
"##,
    );

    let config = SchemaConfig::from_file(file.path()).unwrap();
    match config.theme() {
        Err(SchemaError::UnknownThemeToken { token }) => {
            assert_eq!(token, "colors.brand-magenta");
        }
        other => panic!("expected unknown token error, got {:?}", other),
    }
}

#[test]
fn test_builtin_token_catalogue() {
    let theme = ThemeConfig::default();
    let names = theme.token_names();

    for expected in [
        "colors.background",
        "colors.primary-foreground",
        "colors.ring",
        "radius.lg",
        "durations.normal",
        "easings.standard",
        "animations.accordion-down",
        "animations.pulse-soft",
        "shadows.glow",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
    assert_eq!(theme.colors.len(), 18);
    assert!(theme.get("colors.nope").is_none());
    assert!(theme.get("malformed").is_none());
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let result = SchemaConfig::from_file("/definitely/not/here/prodtrack.toml");
    assert!(matches!(result, Err(SchemaError::IoError(_))));
}
