use pconfig::{
    parse_config, ConfigErrorKind, EmbeddingConfig, LlmConfig, LogLevel,
};

fn azure_document() -> String {
    r#"
        [core]
        data_dir = "/tmp/parley-azure"

        [llm]
        type = "azure"
        deployment = "gpt4-chat"

        [embedding]
        type = "azure"
        deployment = "ada-embed"

        [azure]
        endpoint = "https://example.openai.azure.com"
        api_key = "azure-key"
        api_version = "2024-02-01"

        [jira]
        url = "https://jira.example.com"
        username = "bot"
        api_token = "jira-token"

        [source]
    "#
    .to_string()
}

fn ollama_jina_document() -> String {
    r#"
        [core]
        data_dir = "/tmp/parley-local"
        logging_level = "trace"

        [llm]
        type = "ollama"
        endpoint = "http://localhost:11434"
        name = "llama3.2"

        [embedding]
        type = "jina"
        name = "jina-embeddings-v2-base-en"
        revision = "main"

        [jira]
        url = "https://jira.example.com"
        username = "bot"
        api_token = "jira-token"

        [jira.polling]
        project = "CORE"
        status = "Open"
        assignee = "bot"

        [source]
    "#
    .to_string()
}

#[test]
fn azure_document_selects_azure_variants_and_credentials() {
    let config = parse_config(&azure_document()).expect("azure config should parse");

    assert_eq!(
        config.llm,
        LlmConfig::Azure {
            deployment: "gpt4-chat".to_string()
        }
    );
    assert!(matches!(config.embedding, EmbeddingConfig::Azure { .. }));

    let azure = config.azure.expect("azure block should be present");
    assert_eq!(azure.api_version, "2024-02-01");
    assert_eq!(azure.api_key.expose(), "azure-key");
}

#[test]
fn local_document_needs_no_credential_blocks() {
    let config = parse_config(&ollama_jina_document()).expect("local config should parse");

    assert_eq!(config.core.logging_level, LogLevel::Trace);
    assert!(config.azure.is_none());
    assert!(config.openai.is_none());

    match &config.llm {
        LlmConfig::Ollama { endpoint, name } => {
            assert_eq!(endpoint, "http://localhost:11434");
            assert_eq!(name, "llama3.2");
        }
        other => panic!("expected ollama llm, got {other:?}"),
    }

    let polling = config.jira.polling.expect("polling block should be present");
    assert!(polling.jql().starts_with("project = \"CORE\""));
}

#[test]
fn azure_llm_without_azure_block_is_rejected() {
    let raw = azure_document().replace("[azure]", "[azure_disabled]");
    let error = parse_config(&raw).unwrap_err();
    assert_eq!(error.kind, ConfigErrorKind::Validation);
    assert!(error.message.contains("azure") || error.message.contains("unknown"));
}

#[test]
fn empty_deployment_is_rejected_for_azure_llm() {
    let raw = azure_document().replace("deployment = \"gpt4-chat\"", "deployment = \"  \"");
    let error = parse_config(&raw).unwrap_err();
    assert_eq!(error.kind, ConfigErrorKind::Validation);
    assert!(error.message.contains("llm.deployment"));
}

#[test]
fn secrets_never_surface_in_debug_output() {
    let config = parse_config(&azure_document()).expect("azure config should parse");
    let rendered = format!("{config:?}");
    assert!(!rendered.contains("azure-key"));
    assert!(!rendered.contains("jira-token"));
    assert!(rendered.contains("[REDACTED]"));
}
