use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{L}\p{N}]+").expect("token pattern is valid"))
}

/// 將檔名切成字母與數字組成的片段，其他字元都視為分隔符號
///
/// `"report-2024"` 會得到 `["report", "2024"]`。
pub fn tokenize(name: &str) -> Vec<String> {
    token_pattern()
        .find_iter(name)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        assert_eq!(tokenize("report-2024"), vec!["report", "2024"]);
        assert_eq!(
            tokenize("Sales_Q1 (final).v2"),
            vec!["Sales", "Q1", "final", "v2"]
        );
        assert_eq!(tokenize("日報_2024"), vec!["日報", "2024"]);
    }

    #[test]
    fn test_tokenize_empty_and_delimiters_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("--__..").is_empty());
    }

    #[test]
    fn test_tokenize_is_deterministic() {
        assert_eq!(tokenize("a.b.c"), tokenize("a.b.c"));
    }
}
