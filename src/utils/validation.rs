use crate::utils::error::{FormatterError, Result, ValidationIssue};
use serde_json::Value;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FormatterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FormatterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 分隔符號或填充符號必須剛好是一個字元
pub fn validate_single_char(field_name: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FormatterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Symbol must be exactly one character".to_string(),
        }),
    }
}

/// 把來自 Preset 的名稱收斂成單一路徑片段：分隔符號換成 `_`，
/// 只剩 `.` / `..` 或空字串時回傳 `None`
pub fn file_stem(name: &str) -> Option<String> {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() || stem.chars().all(|c| c == '.') {
        return None;
    }
    Some(stem.to_string())
}

/// 先轉型再驗證：接受數字或數字字串，必須 >= 1。
/// 欄寬以字元計，小數部分無條件捨去。
pub fn coerce_width(path: &str, value: &Value) -> std::result::Result<u32, ValidationIssue> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => {
            return Err(ValidationIssue::new(path, "Enter a width."));
        }
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let Some(number) = number.filter(|n| n.is_finite()) else {
        return Err(ValidationIssue::new(path, "Enter a width."));
    };

    if number < 1.0 {
        return Err(ValidationIssue::new(path, "Width must be at least 1."));
    }
    if number > f64::from(u32::MAX) {
        return Err(ValidationIssue::new(path, "Width is too large."));
    }

    Ok(number.floor() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_single_char() {
        assert_eq!(validate_single_char("symbol", ";").unwrap(), ';');
        assert!(validate_single_char("symbol", "").is_err());
        assert!(validate_single_char("symbol", "||").is_err());
    }

    #[test]
    fn test_file_stem_stays_in_directory() {
        assert_eq!(file_stem("report_2024").as_deref(), Some("report_2024"));
        assert_eq!(file_stem("../../x").as_deref(), Some(".._.._x"));
        assert_eq!(file_stem("a\\b/c").as_deref(), Some("a_b_c"));
        assert_eq!(file_stem("/etc/passwd").as_deref(), Some("_etc_passwd"));
        assert_eq!(file_stem(".."), None);
        assert_eq!(file_stem("  "), None);
        assert_eq!(file_stem(""), None);
    }

    #[test]
    fn test_coerce_width() {
        assert_eq!(coerce_width("w", &json!(4)).unwrap(), 4);
        assert_eq!(coerce_width("w", &json!("12")).unwrap(), 12);
        assert_eq!(coerce_width("w", &json!(" 3 ")).unwrap(), 3);
        assert_eq!(coerce_width("w", &json!(2.0)).unwrap(), 2);

        let issue = coerce_width("widths[0].id", &json!(0)).unwrap_err();
        assert_eq!(issue.path, "widths[0].id");
        assert_eq!(issue.message, "Width must be at least 1.");

        assert_eq!(coerce_width("w", &json!("abc")).unwrap_err().message, "Enter a width.");
        assert_eq!(coerce_width("w", &json!("")).unwrap_err().message, "Enter a width.");
        assert_eq!(coerce_width("w", &json!(null)).unwrap_err().message, "Enter a width.");
        assert_eq!(coerce_width("w", &json!(2.5)).unwrap(), 2);
        assert_eq!(coerce_width("w", &json!("1.9")).unwrap(), 1);
        assert_eq!(
            coerce_width("w", &json!(0.5)).unwrap_err().message,
            "Width must be at least 1."
        );
        assert_eq!(
            coerce_width("w", &json!(5_000_000_000u64)).unwrap_err().message,
            "Width is too large."
        );
    }
}
