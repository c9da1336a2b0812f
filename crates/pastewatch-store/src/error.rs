use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no aggregate record for category '{category}'")]
    UnknownCategory { category: String },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to serialize snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write snapshot to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read snapshot from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_display() {
        let err = StoreError::UnknownCategory {
            category: "Email Address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no aggregate record for category 'Email Address'"
        );
    }
}
