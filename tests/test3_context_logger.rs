use log_enhancer::testing::RecordingBackend;
use log_enhancer::{ContextLogger, EnhancerSettings, LogConfig, LoggingEnhancer, Severity};
use serde_json::json;
use std::sync::Arc;

fn settings() -> EnhancerSettings {
    EnhancerSettings::new(
        "",
        "%2$s> ",
        LogConfig::new()
            .with_level("*", Severity::Info)
            .with_level("app.db", Severity::Trace)
            .with_level("app.quiet", Severity::Off),
    )
}

#[test]
fn test_logger_binds_each_severity_once() {
    let backend = RecordingBackend::default();
    let logger = ContextLogger::new(
        &LoggingEnhancer::default(),
        Arc::new(backend.clone()),
        "web",
        &settings(),
    );

    assert_eq!(logger.context(), "web");
    for severity in Severity::ACTIVE {
        assert_eq!(logger.enabled(severity), severity >= Severity::Info, "{severity}");
    }
    assert!(!logger.enabled(Severity::Off));

    assert_eq!(logger.trace(vec![json!("dropped")]).unwrap(), None);
    assert_eq!(
        logger
            .info(vec![json!("%s requests"), json!(3), json!({ "path": "/" })])
            .unwrap(),
        Some(vec![json!("web> "), json!("3 requests"), json!({ "path": "/" })])
    );
    logger.error(vec![json!("boom")]).unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, Severity::Info);
    assert_eq!(calls[1], (Severity::Error, vec![json!("web> "), json!("boom")]));
}

#[test]
fn test_nested_context_inherits_parent_threshold() {
    let backend = RecordingBackend::default();
    let enhancer = LoggingEnhancer::default();
    let db = ContextLogger::new(&enhancer, Arc::new(backend.clone()), "app.db.pool", &settings());
    let quiet = ContextLogger::new(&enhancer, Arc::new(backend.clone()), "app.quiet.x", &settings());

    assert!(db.enabled(Severity::Trace));
    db.trace(vec![json!("checkout")]).unwrap();
    db.debug(vec![json!("checkin")]).unwrap();

    for severity in Severity::ACTIVE {
        assert_eq!(quiet.emit(severity, vec![json!("never")]).unwrap(), None);
    }

    assert_eq!(backend.count(Severity::Trace), 1);
    assert_eq!(backend.count(Severity::Debug), 1);
    assert_eq!(backend.calls().len(), 2);
}

#[test]
fn test_substitution_errors_do_not_reach_backend() {
    let backend = RecordingBackend::default();
    let logger = ContextLogger::new(
        &LoggingEnhancer::default(),
        Arc::new(backend.clone()),
        "web",
        &settings(),
    );

    assert!(logger.warn(vec![json!("%d items"), json!("many")]).is_err());
    assert!(backend.calls().is_empty());
}
