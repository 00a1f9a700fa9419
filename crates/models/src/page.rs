//! Page options shared by list requests.

use sea_orm::{ColumnTrait, Order, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Upper bound of `limit` and the page size used when a caller gives none.
pub const DEFAULT_MAX_PAGE_LIMIT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl From<SortOrder> for Order {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// `count` asks for the number of matching rows only and is exclusive with
/// `start`/`limit`/`sort`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasePage {
    #[serde(default)]
    pub count: bool,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl BasePage {
    /// First page of the maximum size, ordered by id.
    pub fn default_page() -> Self {
        Self { start: 0, limit: DEFAULT_MAX_PAGE_LIMIT, ..Default::default() }
    }

    pub fn count_only() -> Self {
        Self { count: true, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.count {
            if self.start != 0 || self.limit != 0 || self.sort.is_some() || self.order.is_some() {
                return Err(ModelError::validation("page.count is exclusive with start, limit, sort and order"));
            }
            return Ok(());
        }
        if self.limit == 0 {
            return Err(ModelError::validation("page.limit is required"));
        }
        if self.limit > DEFAULT_MAX_PAGE_LIMIT {
            return Err(ModelError::validation(format!("page.limit must be <= {DEFAULT_MAX_PAGE_LIMIT}")));
        }
        if matches!(self.sort.as_deref(), Some(s) if s.trim().is_empty()) {
            return Err(ModelError::validation("page.sort is empty"));
        }
        Ok(())
    }

    /// Apply ordering and the offset window to `query`. `id` is always the last
    /// ordering key so equal sort values come back in a stable order.
    pub fn apply<Q, C, F>(&self, query: Q, resolve: &F, id: C) -> Result<Q, ModelError>
    where
        Q: QuerySelect + QueryOrder,
        C: ColumnTrait,
        F: Fn(&str) -> Option<C>,
    {
        self.validate()?;
        let order: Order = self.order.unwrap_or(SortOrder::Asc).into();
        let mut query = query;
        if let Some(sort) = &self.sort {
            let col = resolve(sort)
                .ok_or_else(|| ModelError::validation(format!("page.sort field {sort} is not supported")))?;
            query = query.order_by(col, order.clone());
        }
        query = query.order_by(id, order);
        Ok(query.offset(self.start as u64).limit(self.limit as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk_cvm_rel;
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    #[test]
    fn count_only_is_valid() {
        assert!(BasePage::count_only().validate().is_ok());
    }

    #[test]
    fn count_with_limit_is_invalid() {
        let p = BasePage { count: true, limit: 10, ..Default::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn limit_bounds() {
        assert!(BasePage { limit: 0, ..Default::default() }.validate().is_err());
        assert!(BasePage { limit: DEFAULT_MAX_PAGE_LIMIT + 1, ..Default::default() }.validate().is_err());
        assert!(BasePage::default_page().validate().is_ok());
    }

    #[test]
    fn decodes_order_in_upper_case() {
        let p: BasePage = serde_json::from_str(r#"{"start":0,"limit":10,"sort":"cvm_id","order":"DESC"}"#).unwrap();
        assert_eq!(p.order, Some(SortOrder::Desc));
        assert!(!p.count);
    }

    #[test]
    fn apply_orders_by_sort_then_id() {
        let p = BasePage { start: 20, limit: 10, sort: Some("cvm_id".into()), order: Some(SortOrder::Desc), ..Default::default() };
        let q = p
            .apply(disk_cvm_rel::Entity::find(), &disk_cvm_rel::column, disk_cvm_rel::Column::Id)
            .unwrap();
        let s = q.build(DbBackend::Postgres).to_string();
        assert!(s.contains(r#"ORDER BY "disk_cvm_rel"."cvm_id" DESC, "disk_cvm_rel"."id" DESC"#), "{s}");
        assert!(s.contains("LIMIT 10 OFFSET 20"), "{s}");
    }

    #[test]
    fn apply_rejects_unknown_sort() {
        let p = BasePage { limit: 10, sort: Some("extension".into()), ..Default::default() };
        assert!(p.apply(disk_cvm_rel::Entity::find(), &disk_cvm_rel::column, disk_cvm_rel::Column::Id).is_err());
    }
}
