use std::fmt;
use thiserror::Error;

/// 單一欄位路徑上的驗證問題，例如 `widths[1].city`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    /// 檔案內容不是合法的 JSON
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Schema validation failed: {}", join_issues(.issues))]
    SchemaValidationError { issues: Vec<ValidationIssue> },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Encoding error: {message}")]
    EncodingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormatterError {
    pub fn schema(issues: Vec<ValidationIssue>) -> Self {
        Self::SchemaValidationError { issues }
    }

    /// 取得驗證問題清單（非驗證錯誤時為空）
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::SchemaValidationError { issues } => issues,
            _ => &[],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::ParseError(_) | Self::SchemaValidationError { .. } => {
                ErrorCategory::Input
            }
            Self::InvalidConfigValueError { .. } | Self::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            Self::EncodingError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SchemaValidationError { .. } | Self::ParseError(_) => ErrorSeverity::Medium,
            Self::CsvError(_)
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::EncodingError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "Check that the file exists and the output directory is writable".to_string(),
            Self::CsvError(_) => "Check the input delimiter and that every row has the same number of fields".to_string(),
            Self::ParseError(_) => "Make sure the file is valid JSON".to_string(),
            Self::SchemaValidationError { issues } => format!(
                "Fix the listed fields and import again: {}",
                issues
                    .iter()
                    .map(|issue| issue.path.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            Self::MissingConfigError { field } => format!("Set '{}'", field),
            Self::EncodingError { .. } => {
                "Define a width for every exported field and use a single-character symbol".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::CsvError(e) => format!("The input data could not be read: {}", e),
            Self::ParseError(_) => "The selected file is not valid JSON.".to_string(),
            Self::SchemaValidationError { issues } => format!(
                "The selected file is not a valid preset ({} problem{}).",
                issues.len(),
                if issues.len() == 1 { "" } else { "s" }
            ),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid '{}': {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("'{}' is required", field),
            Self::EncodingError { message } => format!("Export failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatterError>;
