//! Startup behavior: fatal configuration paths and a full offline
//! initialize.

use std::io::Write;
use std::path::PathBuf;

use parley::{initialize, ConfigErrorKind, FatalError};

fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&path).expect("create config file");
    file.write_all(contents.as_bytes()).expect("write config");
    path
}

fn valid_document(data_dir: &std::path::Path) -> String {
    format!(
        r#"
        [core]
        data_dir = "{}"
        logging_level = "warn"

        [llm]
        type = "openai"
        name = "gpt-4o-mini"

        [embedding]
        type = "jina"
        name = "jina-embeddings-v2-base-en"

        [openai]
        api_key = "sk-test"
        organization = "org-test"

        [jira]
        url = "https://issues.example.com"
        username = "bot@example.com"
        api_token = "jira-token"

        [source]
        kind = "confluence"
        "#,
        data_dir.join("data").display()
    )
}

#[test]
fn missing_config_file_is_fatal() {
    let error = initialize(std::path::Path::new("/nonexistent/parley.toml")).unwrap_err();
    match error {
        FatalError::Config(config_error) => {
            assert_eq!(config_error.kind, ConfigErrorKind::NotFound);
        }
        other => panic!("expected a config error, got {other}"),
    }
}

#[test]
fn invalid_config_is_fatal_before_any_resolution() {
    let dir = tempfile::tempdir().expect("tempdir");
    // openai llm without the [openai] credentials block.
    let path = write_config(
        &dir,
        r#"
        [core]
        data_dir = "/tmp/parley-test"

        [llm]
        type = "openai"
        name = "gpt-4o-mini"

        [embedding]
        type = "jina"
        name = "jina-embeddings-v2-base-en"

        [jira]
        url = "https://issues.example.com"
        username = "bot@example.com"
        api_token = "jira-token"

        [source]
        "#,
    );

    let error = initialize(&path).unwrap_err();
    match error {
        FatalError::Config(config_error) => {
            assert_eq!(config_error.kind, ConfigErrorKind::Validation);
            assert!(config_error.message.contains("[openai]"));
        }
        other => panic!("expected a config error, got {other}"),
    }
}

#[test]
fn initialize_builds_the_full_context_offline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, &valid_document(dir.path()));

    let context = initialize(&path).expect("initialize succeeds without network access");

    assert!(context.config.core.data_dir.is_dir());
    assert!(context.config.core.models_dir().is_dir());
    assert_eq!(context.chat_model.model_name(), "gpt-4o-mini");
    assert!(context.chat_model.streaming_enabled());
    assert_eq!(
        context.tools.names(),
        vec![
            "web_search",
            "calculator",
            "summarize_jira_issue",
            "get_jira_issue",
        ]
    );

    // Secrets must not leak through the context's configuration.
    let debug_output = format!("{:?}", context.config);
    assert!(debug_output.contains("[REDACTED]"));
    assert!(!debug_output.contains("sk-test"));
    assert!(!debug_output.contains("jira-token"));
}
