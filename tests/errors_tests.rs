use pulso::errors::{PulsoError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_reference_data_missing_error() {
        let error = PulsoError::reference_data_missing("active sources: 0");

        assert!(matches!(error, PulsoError::ReferenceDataMissing(_)));
        assert_eq!(error.code(), "E001");
        assert!(error.to_string().contains("Reference Data Missing"));
        assert!(error.to_string().contains("active sources: 0"));
    }

    #[test]
    fn test_store_operation_failed_error() {
        let error = PulsoError::store_operation_failed("insert failed");

        assert!(matches!(error, PulsoError::StoreOperationFailed(_)));
        assert_eq!(error.code(), "E002");
        assert_eq!(error.message(), "insert failed");
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            PulsoError::reference_data_missing("a"),
            PulsoError::store_operation_failed("b"),
            PulsoError::database_config("c"),
            PulsoError::database_connection("d"),
            PulsoError::validation("e"),
            PulsoError::serialization("f"),
            PulsoError::file_operation("g"),
        ];

        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_from_db_err_is_store_failure() {
        let db_err = sea_orm::DbErr::Custom("disk I/O error".to_string());
        let error: PulsoError = db_err.into();

        assert!(matches!(error, PulsoError::StoreOperationFailed(_)));
        assert!(error.message().contains("disk I/O error"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let error: PulsoError = io_err.into();

        assert!(matches!(error, PulsoError::FileOperation(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: PulsoError = json_err.into();

        assert!(matches!(error, PulsoError::Serialization(_)));
    }

    #[test]
    fn test_question_mark_propagation() {
        fn inner() -> Result<()> {
            Err::<(), _>(sea_orm::DbErr::Custom("boom".into()))?;
            Ok(())
        }

        assert!(matches!(inner(), Err(PulsoError::StoreOperationFailed(_))));
    }
}

#[cfg(test)]
mod error_format_tests {
    use super::*;

    #[test]
    fn test_format_simple() {
        let error = PulsoError::validation("volume_min > volume_max");
        assert_eq!(
            error.format_simple(),
            "Validation Error: volume_min > volume_max"
        );
    }

    #[test]
    fn test_format_colored_contains_parts() {
        colored::control::set_override(false);
        let error = PulsoError::database_connection("refused");
        let output = error.format_colored();

        assert!(output.contains("[ERROR]"));
        assert!(output.contains("E004"));
        assert!(output.contains("refused"));
    }

    #[test]
    fn test_implements_std_error() {
        let error = PulsoError::file_operation("denied");
        let dyn_err: &dyn Error = &error;
        assert!(dyn_err.source().is_none());
    }
}
