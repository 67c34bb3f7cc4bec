use jfix_config::{init_tracing, LoggingConfig};

#[test]
fn init_tracing_is_idempotent() {
    let config = LoggingConfig {
        level: "jfix.quickfix=debug".to_owned(),
        json: false,
    };
    init_tracing(&config);
    init_tracing(&LoggingConfig::default());
    tracing::debug!(target = "jfix.quickfix", "visible");
}
