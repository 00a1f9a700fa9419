use models::{filter::Expression, page::BasePage};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Upper bound of items in one batch request.
pub const BATCH_OPERATION_MAX_LIMIT: usize = 100;

/// Shared check for the `cvm_ids` of join-list requests.
pub fn validate_cvm_ids(cvm_ids: &[String]) -> Result<(), ServiceError> {
    if cvm_ids.is_empty() {
        return Err(ServiceError::invalid("cvm_ids is required"));
    }
    if cvm_ids.len() > BATCH_OPERATION_MAX_LIMIT {
        return Err(ServiceError::invalid(format!("cvm_ids should <= {BATCH_OPERATION_MAX_LIMIT}")));
    }
    if cvm_ids.iter().any(|id| id.trim().is_empty()) {
        return Err(ServiceError::invalid("cvm_ids must not contain empty ids"));
    }
    Ok(())
}

/// What a repository `list` is asked for.
#[derive(Debug, Clone)]
pub struct ListOption {
    /// Columns the caller wants back; empty means all.
    pub fields: Vec<String>,
    pub filter: Expression,
    pub page: BasePage,
}

impl ListOption {
    /// Fail on the first field `resolve` does not know.
    pub fn validate_fields<C>(&self, resolve: impl Fn(&str) -> Option<C>) -> Result<(), ServiceError> {
        match self.fields.iter().find(|f| resolve(f.as_str()).is_none()) {
            Some(unknown) => Err(ServiceError::invalid(format!("field {unknown} is not supported"))),
            None => Ok(()),
        }
    }

    pub fn wants(&self, field: &str) -> bool { wants(&self.fields, field) }
}

pub(crate) fn wants(fields: &[String], field: &str) -> bool {
    fields.is_empty() || fields.iter().any(|f| f == field)
}

/// Either a count or a page of rows, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<T>>,
}

impl<T> ListResult<T> {
    pub fn count(count: u64) -> Self { Self { count: Some(count), details: None } }

    pub fn details(details: Vec<T>) -> Self { Self { count: None, details: Some(details) } }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResult<U> {
        ListResult { count: self.count, details: self.details.map(|d| d.into_iter().map(f).collect()) }
    }

    /// Rows of a details result; empty for a count result.
    pub fn into_details(self) -> Vec<T> { self.details.unwrap_or_default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_result_serializes_without_details() {
        let r: ListResult<u8> = ListResult::count(3);
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"count":3}"#);
    }

    #[test]
    fn details_result_serializes_without_count() {
        let r = ListResult::details(Vec::<u8>::new());
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"details":[]}"#);
    }

    #[test]
    fn map_keeps_shape() {
        let r = ListResult::details(vec![1, 2]).map(|x| x * 10);
        assert_eq!(r.into_details(), vec![10, 20]);
        let c: ListResult<i32> = ListResult::<i32>::count(7).map(|x| x + 1);
        assert_eq!(c.count, Some(7));
        assert!(c.details.is_none());
    }

    #[test]
    fn cvm_ids_bounds() {
        assert!(validate_cvm_ids(&[]).is_err());
        assert!(validate_cvm_ids(&["".to_string()]).is_err());
        let too_many: Vec<String> = (0..=BATCH_OPERATION_MAX_LIMIT).map(|i| format!("cvm-{i}")).collect();
        assert!(validate_cvm_ids(&too_many).is_err());
        assert!(validate_cvm_ids(&["cvm-1".to_string()]).is_ok());
    }

    #[test]
    fn empty_fields_want_everything() {
        assert!(wants(&[], "creator"));
        assert!(wants(&["id".to_string()], "id"));
        assert!(!wants(&["id".to_string()], "creator"));
    }
}
