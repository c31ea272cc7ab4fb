//! API 转换辅助函数

use surrealdb::RecordId;

use crate::db::repository::RepoError;
use crate::utils::AppError;

/// Map a repository error onto the API error taxonomy
pub fn from_repo(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::not_found(msg),
        RepoError::Duplicate(msg) => AppError::conflict(msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        RepoError::Database(msg) => AppError::database(msg),
    }
}

/// Parse a path segment into a record id for the given table.
///
/// Accepts both the full `table:key` form and the bare key; a prefix naming
/// a different table is rejected.
pub fn parse_record_id(table: &str, raw: &str) -> Result<RecordId, AppError> {
    match raw.split_once(':') {
        Some((prefix, key)) if prefix == table && !key.is_empty() => {
            Ok(RecordId::from_table_key(table, key))
        }
        Some(_) => Err(AppError::invalid(format!("Invalid {} id: {}", table, raw))),
        None if !raw.is_empty() => Ok(RecordId::from_table_key(table, raw)),
        None => Err(AppError::invalid(format!("Invalid {} id: {}", table, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = parse_record_id("food", "food:abc").unwrap();
        assert_eq!(id.to_string(), "food:abc");

        let id = parse_record_id("food", "abc").unwrap();
        assert_eq!(id.to_string(), "food:abc");

        assert!(parse_record_id("food", "recipe:abc").is_err());
        assert!(parse_record_id("food", "").is_err());
        assert!(parse_record_id("food", "food:").is_err());
    }
}
