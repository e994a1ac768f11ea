use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("Role not found: {role}")]
    RoleNotFound { role: String },

    #[error("Invalid curriculum table: {message}")]
    InvalidTable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Site source error in {file}: {message}")]
    SiteSourceError { file: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Data,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CurriculumError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CurriculumError::RoleNotFound { .. } => ErrorCategory::Lookup,
            CurriculumError::InvalidTable { .. }
            | CurriculumError::SerializationError(_)
            | CurriculumError::YamlError(_)
            | CurriculumError::CsvError(_)
            | CurriculumError::SiteSourceError { .. } => ErrorCategory::Data,
            CurriculumError::IoError(_) => ErrorCategory::Io,
            CurriculumError::ConfigError { .. }
            | CurriculumError::ConfigValidationError { .. }
            | CurriculumError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CurriculumError::RoleNotFound { .. } => {
                "Run `curriculum-map roles` to list the defined roles".to_string()
            }
            CurriculumError::InvalidTable { .. } | CurriculumError::SerializationError(_) => {
                "Regenerate the table with `curriculum-map build` or fix the artifact by hand"
                    .to_string()
            }
            CurriculumError::YamlError(_) | CurriculumError::SiteSourceError { .. } => {
                "Check the YAML syntax of _quarto.yml and the page front matter".to_string()
            }
            CurriculumError::CsvError(_) => "Check the export destination".to_string(),
            CurriculumError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
            CurriculumError::ConfigError { .. }
            | CurriculumError::ConfigValidationError { .. }
            | CurriculumError::InvalidConfigValueError { .. } => {
                "Review curriculum.toml and the command line arguments".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CurriculumError::RoleNotFound { role } => {
                format!("No curriculum is defined for role '{}'", role)
            }
            CurriculumError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }

    pub(crate) fn invalid_table(message: impl Into<String>) -> Self {
        CurriculumError::InvalidTable {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurriculumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_not_found_is_lookup_error() {
        let err = CurriculumError::RoleNotFound {
            role: "nurse".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("nurse"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: CurriculumError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_configuration_errors_are_high() {
        let err = CurriculumError::ConfigValidationError {
            field: "site.root".to_string(),
            message: "empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.severity() > ErrorSeverity::Medium);
    }
}
