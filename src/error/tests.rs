//! Tests for error types.

#[cfg(test)]
mod tests {
    use super::super::*;
    use std::path::Path;

    #[test]
    fn test_error_display() {
        let err = Error::config("invalid log level");
        assert_eq!(err.to_string(), "configuration error: invalid log level");
    }

    #[test]
    fn test_tree_error_read_dir() {
        let err = TreeError::read_dir(Path::new("/srv/data"), "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to read directory '/srv/data': permission denied"
        );
    }

    #[test]
    fn test_tree_error_conversion() {
        let tree_err = TreeError::OutsideRoot {
            path: "/elsewhere".to_string(),
        };
        let err: Error = tree_err.into();
        assert!(matches!(err, Error::Tree(_)));
        assert_eq!(
            err.to_string(),
            "tree error: path '/elsewhere' is outside of the tree root"
        );
    }

    #[test]
    fn test_invalid_glob_display() {
        let err = TreeError::InvalidGlob {
            pattern: "[a".to_string(),
            reason: "unclosed character class".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid glob pattern '[a': unclosed character class"
        );
    }

    #[test]
    fn test_watcher_error_conversion() {
        let watch_err = WatcherError::WatchFailed {
            path: "/tmp/test".to_string(),
            reason: "permission denied".to_string(),
        };
        let err: Error = watch_err.into();
        assert!(matches!(err, Error::Watcher(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_internal() {
        let err = Error::internal("test internal error");
        assert_eq!(err.to_string(), "internal error: test internal error");
    }

    #[test]
    fn test_error_debug_format() {
        let err = Error::Internal("something went wrong".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Internal"));
        assert!(debug_str.contains("something went wrong"));
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn inner() -> Result<i32> {
            Err(TreeError::read_dir(Path::new("/root"), "gone").into())
        }

        fn outer() -> Result<i32> {
            let _ = inner()?;
            Ok(0)
        }

        let result = outer();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "tree error: failed to read directory '/root': gone"
        );
    }
}
