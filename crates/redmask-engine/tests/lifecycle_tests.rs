mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ClosableStore, engine};
use redmask_engine::redmask_core::{PatternConfig, default_patterns};
use redmask_engine::{
    CallContext, EngineConfig, LogRecord, MaskingEngine, MemoryStore, StartupError, StoreConfig,
    StoreError,
};

fn memory_config(fields: &[&str]) -> EngineConfig {
    EngineConfig {
        fields_to_mask: fields.iter().map(|f| f.to_string()).collect(),
        patterns: default_patterns(),
        store: StoreConfig::builder().memory(1_000).token_ttl(0).build(),
    }
}

#[tokio::test]
async fn test_start_with_memory_backend() {
    let engine = MaskingEngine::start(memory_config(&["username"])).await.unwrap();

    assert!(engine.should_mask("username"));
    assert!(!engine.should_mask("hostname"));
    assert_eq!(engine.patterns().len(), 2);
    assert_eq!(engine.store().backend_name(), "memory");
    assert_eq!(engine.store().ttl(), None);
    assert!(engine.health_check(&CallContext::new()).await.is_ok());
    assert!(engine.shutdown().await.is_ok());
}

#[tokio::test]
async fn test_bad_pattern_fails_before_connecting() {
    // Nothing listens on port 1; the pattern error must surface first.
    let config = EngineConfig {
        fields_to_mask: vec![],
        patterns: vec![PatternConfig::new("broken", "([a-z", "X-")],
        store: StoreConfig::builder().redis("127.0.0.1:1").build(),
    };

    let err = MaskingEngine::start(config).await.unwrap_err();

    assert!(matches!(err, StartupError::Masking(ref e) if e.is_pattern_error()));
    assert!(err.to_string().contains("broken"));
}

#[tokio::test]
async fn test_unreachable_redis_fails_with_connection_error() {
    let config = EngineConfig {
        fields_to_mask: vec![],
        patterns: default_patterns(),
        store: StoreConfig::builder().redis("127.0.0.1:1").build(),
    };

    let result = tokio::time::timeout(Duration::from_secs(30), MaskingEngine::start(config))
        .await
        .expect("start must give up on an unreachable server");

    let err = result.unwrap_err();
    assert!(
        matches!(err, StartupError::Store(StoreError::Connection { .. })),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_failed_health_check_closes_store() {
    let backend = Arc::new(ClosableStore::new(false));

    let err = MaskingEngine::start_with_backend(memory_config(&[]), backend.clone())
        .await
        .unwrap_err();

    assert!(backend.is_closed());
    match err {
        StartupError::Store(e) => {
            assert!(e.is_fatal());
            assert!(e.to_string().contains("NOAUTH"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_bad_pattern_closes_supplied_store() {
    let backend = Arc::new(ClosableStore::new(true));
    let mut config = memory_config(&[]);
    config.patterns = vec![PatternConfig::new("broken", "([a-z", "")];

    let err = MaskingEngine::start_with_backend(config, backend.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, StartupError::Masking(_)));
    assert!(backend.is_closed());
}

#[tokio::test]
async fn test_healthy_supplied_store_stays_open() {
    let backend = Arc::new(ClosableStore::new(true));

    let engine = MaskingEngine::start_with_backend(memory_config(&["username"]), backend.clone())
        .await
        .unwrap();

    assert!(!backend.is_closed());
    assert_eq!(engine.store().backend_name(), "closable");

    engine.shutdown().await.unwrap();
    assert!(backend.is_closed());
}

#[tokio::test]
async fn test_ttl_is_taken_from_config() {
    let mut config = memory_config(&[]);
    config.store = StoreConfig::builder().memory(10).token_ttl(3600).build();

    let engine = MaskingEngine::start(config).await.unwrap();

    assert_eq!(engine.store().ttl(), Some(Duration::from_secs(3600)));
}

#[tokio::test]
async fn test_concurrent_records_converge() {
    let backend = Arc::new(MemoryStore::new(1_000));
    let engine = engine(backend, &["username"], &default_patterns());

    let mut handles = Vec::new();
    for _ in 0..16 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            let mut record =
                LogRecord::with_body("peer 172.16.0.4").attribute("username", "carol");
            engine.mask_record(&CallContext::new(), &mut record).await;
            record
        }));
    }

    let mut records = Vec::new();
    for handle in handles {
        records.push(handle.await.unwrap());
    }

    assert!(records.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test(start_paused = true)]
async fn test_expired_deadline_leaves_field_unmasked() {
    let backend = Arc::new(MemoryStore::new(1_000));
    let engine = engine(backend, &["username"], &[]);

    let ctx = CallContext::new().with_timeout(Duration::from_millis(10));
    tokio::time::advance(Duration::from_millis(20)).await;

    assert_eq!(engine.mask_field(&ctx, "alice", "username").await, "alice");
}
