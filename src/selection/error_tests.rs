//! Unit tests for selection store error types

#[cfg(test)]
mod tests {
    use crate::selection::error::StoreError;
    use std::error::Error;

    #[test]
    fn test_path_error_display() {
        let error = StoreError::PathError("no data directory".to_string());
        assert_eq!(
            error.to_string(),
            "Could not determine store location: no data directory"
        );
    }

    #[test]
    fn test_serialize_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: StoreError = json_err.into();
        assert!(error.to_string().starts_with("Error during serialization"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let error = StoreError::PathError("test".to_string());
        let debug = format!("{error:?}");
        assert!(debug.contains("PathError"));
    }
}
