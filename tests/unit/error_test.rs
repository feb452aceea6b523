//! Tests for error types

use banner_rotation::core::{ConfigError, RotationError, StoreError};

#[test]
fn test_invalid_interval_error() {
    let err = RotationError::InvalidInterval;
    assert_eq!(format!("{}", err), "invalid interval: must be greater than zero");
}

#[test]
fn test_shutdown_error() {
    let err = RotationError::Shutdown;
    assert_eq!(format!("{}", err), "rotation loop has shut down");
}

#[test]
fn test_store_error_converts_into_rotation_error() {
    let err: RotationError = StoreError::Backend("connection reset".to_string()).into();
    assert_eq!(format!("{}", err), "store error: backend error: connection reset");
}

#[test]
fn test_store_error_variants() {
    assert_eq!(
        format!("{}", StoreError::UnknownTag("sunset".to_string())),
        "unknown tag: sunset"
    );
    assert_eq!(
        format!("{}", StoreError::UnsupportedImage("anim".to_string())),
        "unsupported image type for tag anim"
    );
}

#[test]
fn test_config_error_variants() {
    assert_eq!(
        format!("{}", ConfigError::Parse("bad".to_string())),
        "parse error: bad"
    );
    assert_eq!(
        format!("{}", ConfigError::Invalid("zero".to_string())),
        "invalid configuration: zero"
    );
}
