use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatternError>;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern for category '{category}': {source}")]
    Invalid {
        category: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_category() {
        let source = regex::Regex::new("(").expect_err("unbalanced paren is invalid");
        let err = PatternError::Invalid {
            category: "Email Address".to_string(),
            source,
        };
        assert!(err.to_string().contains("Email Address"));
    }
}
