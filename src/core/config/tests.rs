use super::loading::{apply_config_file, parse_config_str, parse_delimiter};
use super::validation::validate_config;
use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.email_column, "Email");
    assert_eq!(config.output_file_name, "verified_emails.xlsx");
    assert!(config.check_dns);
    assert!(!config.strict_timeouts);
}

#[test]
fn test_parse_full_config() {
    let content = r#"
[dns]
dns_timeout = 3
dns_servers = ["1.1.1.1", "9.9.9.9"]
attempts = 1

[deliverability]
check_dns = false
strict_timeouts = true

[disposable]
extra_domains = ["burner.example"]

[input]
email_column = "Address"
delimiter = ";"

[output]
file_name = "out.xlsx"
sheet_name = "Results"
"#;
    let file = parse_config_str(content).unwrap();
    let mut config = Config::default();
    apply_config_file(&mut config, file).unwrap();

    assert_eq!(config.dns_timeout, Duration::from_secs(3));
    assert_eq!(config.dns_servers, vec!["1.1.1.1", "9.9.9.9"]);
    assert_eq!(config.dns_attempts, 1);
    assert!(!config.check_dns);
    assert!(config.strict_timeouts);
    assert_eq!(config.disposable_extra_domains, vec!["burner.example"]);
    assert_eq!(config.email_column, "Address");
    assert_eq!(config.input_delimiter, b';');
    assert_eq!(config.output_file_name, "out.xlsx");
    assert_eq!(config.sheet_name, "Results");
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_unknown_keys_rejected() {
    let content = r#"
[dns]
dns_timeout = 3
retries = 9
"#;
    assert!(parse_config_str(content).is_err());
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = parse_config_str("[output]\nsheet_name = \"Checked\"\n").unwrap();
    let mut config = Config::default();
    apply_config_file(&mut config, file).unwrap();
    assert_eq!(config.sheet_name, "Checked");
    assert_eq!(config.email_column, "Email");
    assert_eq!(config.dns_timeout, Duration::from_secs(5));
}

#[test]
fn test_parse_delimiter() {
    assert_eq!(parse_delimiter(",").unwrap(), b',');
    assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
    assert!(parse_delimiter(";;").is_err());
    assert!(parse_delimiter("").is_err());
    assert!(parse_delimiter("é").is_err());
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.dns_servers = vec!["not-an-ip".to_string()];
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.dns_timeout = Duration::ZERO;
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.email_column = "  ".to_string();
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.sheet_name = "a/b".to_string();
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.sheet_name = "x".repeat(32);
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_builder_reads_explicit_file_and_applies_overrides() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.toml");
    fs::write(
        &path,
        "[input]\nemail_column = \"Mail\"\n\n[deliverability]\ncheck_dns = true\n",
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .config_path(&path)
        .check_dns(false)
        .dns_timeout(Duration::from_secs(9))
        .build()
        .unwrap();

    assert_eq!(config.email_column, "Mail");
    assert!(!config.check_dns);
    assert_eq!(config.dns_timeout, Duration::from_secs(9));
    assert_eq!(
        config.loaded_config_path.as_deref(),
        Some(path.display().to_string().as_str())
    );
}

#[test]
fn test_builder_missing_explicit_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let result = ConfigBuilder::new()
        .config_path(tmp.path().join("absent.toml"))
        .build();
    assert!(matches!(result, Err(crate::core::error::AppError::Config(_))));
}

#[test]
fn test_builder_without_file_uses_defaults() {
    let config = ConfigBuilder::new()
        .without_config_file()
        .email_column("Contact")
        .build()
        .unwrap();
    assert_eq!(config.email_column, "Contact");
    assert!(config.loaded_config_path.is_none());
}

#[test]
fn test_default_pattern_is_permissive_substring_match() {
    let config = Config::default();
    assert!(config.email_regex.is_match("user@example.com"));
    assert!(config.email_regex.is_match("contact: user@example.com please"));
    assert!(!config.email_regex.is_match("user@localhost"));
    assert!(!config.email_regex.is_match("user@example.abcdefghi"));
}

#[test]
fn test_example_config_parses() {
    let file = parse_config_str(include_str!("../../../config.example.toml")).unwrap();
    let mut config = Config::default();
    apply_config_file(&mut config, file).unwrap();
    assert!(validate_config(&config).is_ok());
    assert_eq!(config.dns_servers.len(), 2);
}
