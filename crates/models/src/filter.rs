//! Filter expressions accepted by every `list`/`delete` request.
//!
//! ```json
//! {"op": "and", "rules": [
//!     {"field": "disk_id", "op": "eq", "value": "disk-1"},
//!     {"op": "or", "rules": [{"field": "cvm_id", "op": "in", "value": ["cvm-1", "cvm-2"]}]}
//! ]}
//! ```
//!
//! Field names are resolved through a per-table lookup so that only known
//! columns can reach the generated SQL.

use std::str::FromStr;

use chrono::DateTime;
use sea_orm::{sea_query::SimpleExpr, ColumnTrait, ColumnType, Condition, Value};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::errors::ModelError;

/// Maximum rules in a single expression level.
pub const MAX_RULES: usize = 50;
/// Top level plus one nested level.
pub const MAX_DEPTH: usize = 2;
/// Maximum elements of an `in`/`nin` value.
pub const MAX_IN_VALUES: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    /// Substring match.
    Cs,
}

impl AtomOp {
    pub fn as_str(self) -> &'static str {
        match self {
            AtomOp::Eq => "eq",
            AtomOp::Neq => "neq",
            AtomOp::Gt => "gt",
            AtomOp::Gte => "gte",
            AtomOp::Lt => "lt",
            AtomOp::Lte => "lte",
            AtomOp::In => "in",
            AtomOp::Nin => "nin",
            AtomOp::Cs => "cs",
        }
    }
}

impl FromStr for AtomOp {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(AtomOp::Eq),
            "neq" => Ok(AtomOp::Neq),
            "gt" => Ok(AtomOp::Gt),
            "gte" => Ok(AtomOp::Gte),
            "lt" => Ok(AtomOp::Lt),
            "lte" => Ok(AtomOp::Lte),
            "in" => Ok(AtomOp::In),
            "nin" => Ok(AtomOp::Nin),
            "cs" => Ok(AtomOp::Cs),
            other => Err(ModelError::validation(format!("unsupported filter op: {other}"))),
        }
    }
}

/// A single `field op value` rule. `op` stays a plain string on the wire so
/// that an unknown operator is reported as a filter error, not a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomRule {
    pub field: String,
    pub op: String,
    pub value: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rule {
    Atom(AtomRule),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub op: LogicOp,
    pub rules: Vec<Rule>,
}

impl AtomRule {
    pub fn new(field: impl Into<String>, op: AtomOp, value: impl Into<JsonValue>) -> Self {
        Self { field: field.into(), op: op.as_str().to_owned(), value: value.into() }
    }

    fn to_simple_expr<C, F>(&self, resolve: &F) -> Result<SimpleExpr, ModelError>
    where
        C: ColumnTrait,
        F: Fn(&str) -> Option<C>,
    {
        let col = resolve(&self.field)
            .ok_or_else(|| ModelError::validation(format!("filter field {} is not supported", self.field)))?;
        let op: AtomOp = self.op.parse()?;
        let kind = ValueKind::of(col.def().get_column_type());
        let field = self.field.as_str();
        let expr = match op {
            AtomOp::Eq => col.eq(kind.bind(field, &self.value)?),
            AtomOp::Neq => col.ne(kind.bind(field, &self.value)?),
            AtomOp::Gt => col.gt(kind.bind(field, &self.value)?),
            AtomOp::Gte => col.gte(kind.bind(field, &self.value)?),
            AtomOp::Lt => col.lt(kind.bind(field, &self.value)?),
            AtomOp::Lte => col.lte(kind.bind(field, &self.value)?),
            AtomOp::In => col.is_in(kind.bind_list(field, &self.value)?),
            AtomOp::Nin => col.is_not_in(kind.bind_list(field, &self.value)?),
            AtomOp::Cs => match (kind, &self.value) {
                (ValueKind::Text, JsonValue::String(s)) if !s.is_empty() => col.contains(s.as_str()),
                _ => {
                    return Err(ModelError::validation(format!(
                        "filter field {field}: cs expects a non-empty string on a text column"
                    )))
                }
            },
        };
        Ok(expr)
    }
}

/// How a JSON filter value must be bound for a given column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Integer,
    Text,
    /// RFC 3339 string bound as a zoned timestamp.
    Timestamp,
    Bool,
    Untyped,
}

impl ValueKind {
    fn of(col_type: &ColumnType) -> Self {
        match col_type {
            ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
            | ColumnType::TinyUnsigned
            | ColumnType::SmallUnsigned
            | ColumnType::Unsigned
            | ColumnType::BigUnsigned => ValueKind::Integer,
            ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text => ValueKind::Text,
            ColumnType::Timestamp | ColumnType::TimestampWithTimeZone | ColumnType::DateTime => ValueKind::Timestamp,
            ColumnType::Boolean => ValueKind::Bool,
            _ => ValueKind::Untyped,
        }
    }

    fn bind(self, field: &str, v: &JsonValue) -> Result<Value, ModelError> {
        match (self, v) {
            (ValueKind::Integer | ValueKind::Untyped, JsonValue::Number(n)) => n
                .as_i64()
                .map(Value::from)
                .ok_or_else(|| ModelError::validation(format!("filter field {field}: only integer numbers are supported"))),
            (ValueKind::Text | ValueKind::Untyped, JsonValue::String(s)) => Ok(Value::from(s.clone())),
            (ValueKind::Bool | ValueKind::Untyped, JsonValue::Bool(b)) => Ok(Value::from(*b)),
            (ValueKind::Timestamp, JsonValue::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(Value::from)
                .map_err(|e| ModelError::validation(format!("filter field {field}: expected an RFC 3339 time, {e}"))),
            (ValueKind::Integer, _) => Err(ModelError::validation(format!("filter field {field}: expected an integer value"))),
            (ValueKind::Text, _) => Err(ModelError::validation(format!("filter field {field}: expected a string value"))),
            (ValueKind::Timestamp, _) => {
                Err(ModelError::validation(format!("filter field {field}: expected an RFC 3339 time string")))
            }
            (ValueKind::Bool, _) => Err(ModelError::validation(format!("filter field {field}: expected a bool value"))),
            (ValueKind::Untyped, _) => {
                Err(ModelError::validation(format!("filter field {field}: expected a string, integer or bool value")))
            }
        }
    }

    fn bind_list(self, field: &str, v: &JsonValue) -> Result<Vec<Value>, ModelError> {
        let JsonValue::Array(items) = v else {
            return Err(ModelError::validation(format!("filter field {field}: expected an array value")));
        };
        if items.is_empty() {
            return Err(ModelError::validation(format!("filter field {field}: array value is empty")));
        }
        if items.len() > MAX_IN_VALUES {
            return Err(ModelError::validation(format!(
                "filter field {field}: array value exceeds {MAX_IN_VALUES} elements"
            )));
        }
        items.iter().map(|item| self.bind(field, item)).collect()
    }
}

impl Expression {
    pub fn new(op: LogicOp, rules: Vec<Rule>) -> Self { Self { op, rules } }

    pub fn and(rules: Vec<Rule>) -> Self { Self::new(LogicOp::And, rules) }

    /// `field = value`
    pub fn equal(field: &str, value: impl Into<JsonValue>) -> Self {
        Self::and(vec![Rule::Atom(AtomRule::new(field, AtomOp::Eq, value))])
    }

    /// `field IN (values...)`
    pub fn containers<V: Into<JsonValue>>(field: &str, values: impl IntoIterator<Item = V>) -> Self {
        let values: Vec<JsonValue> = values.into_iter().map(Into::into).collect();
        Self::and(vec![Rule::Atom(AtomRule::new(field, AtomOp::In, JsonValue::Array(values)))])
    }

    /// Build a sea-orm condition, resolving field names with `resolve`.
    pub fn to_condition<C, F>(&self, resolve: &F) -> Result<Condition, ModelError>
    where
        C: ColumnTrait,
        F: Fn(&str) -> Option<C>,
    {
        self.build(resolve, 1)
    }

    fn build<C, F>(&self, resolve: &F, depth: usize) -> Result<Condition, ModelError>
    where
        C: ColumnTrait,
        F: Fn(&str) -> Option<C>,
    {
        if depth > MAX_DEPTH {
            return Err(ModelError::validation(format!("filter nesting exceeds {MAX_DEPTH} levels")));
        }
        if self.rules.is_empty() {
            return Err(ModelError::validation("filter rules are required"));
        }
        if self.rules.len() > MAX_RULES {
            return Err(ModelError::validation(format!("filter rules exceed {MAX_RULES}")));
        }
        let mut cond = match self.op {
            LogicOp::And => Condition::all(),
            LogicOp::Or => Condition::any(),
        };
        for rule in &self.rules {
            cond = match rule {
                Rule::Atom(atom) => cond.add(atom.to_simple_expr(resolve)?),
                Rule::Expression(expr) => cond.add(expr.build(resolve, depth + 1)?),
            };
        }
        Ok(cond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk_cvm_rel;
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};
    use serde_json::json;

    fn sql(expr: &Expression) -> Result<String, ModelError> {
        let cond = expr.to_condition(&disk_cvm_rel::column)?;
        Ok(disk_cvm_rel::Entity::find().filter(cond).build(DbBackend::Postgres).to_string())
    }

    fn bound_values(expr: &Expression) -> Result<Vec<Value>, ModelError> {
        let cond = expr.to_condition(&disk_cvm_rel::column)?;
        let stmt = disk_cvm_rel::Entity::find().filter(cond).build(DbBackend::Postgres);
        Ok(stmt.values.map(|v| v.0).unwrap_or_default())
    }

    fn atom(field: &str, op: AtomOp, value: JsonValue) -> Expression {
        Expression::and(vec![Rule::Atom(AtomRule::new(field, op, value))])
    }

    #[test]
    fn decodes_nested_expression() {
        let expr: Expression = serde_json::from_value(json!({
            "op": "and",
            "rules": [
                {"field": "disk_id", "op": "eq", "value": "disk-1"},
                {"op": "or", "rules": [{"field": "cvm_id", "op": "in", "value": ["cvm-1", "cvm-2"]}]}
            ]
        }))
        .unwrap();
        assert_eq!(expr.rules.len(), 2);
        assert!(matches!(expr.rules[0], Rule::Atom(_)));
        assert!(matches!(expr.rules[1], Rule::Expression(_)));
    }

    #[test]
    fn equal_renders_where_clause() {
        let s = sql(&Expression::equal("disk_id", "disk-1")).unwrap();
        assert!(s.contains(r#""disk_cvm_rel"."disk_id" = 'disk-1'"#), "{s}");
    }

    #[test]
    fn containers_renders_in_list() {
        let s = sql(&Expression::containers("id", [1i64, 2, 3])).unwrap();
        assert!(s.contains(r#""disk_cvm_rel"."id" IN (1, 2, 3)"#), "{s}");
    }

    #[test]
    fn or_expression_joins_with_or() {
        let expr = Expression::new(
            LogicOp::Or,
            vec![
                Rule::Atom(AtomRule::new("cvm_id", AtomOp::Eq, "cvm-1")),
                Rule::Atom(AtomRule::new("cvm_id", AtomOp::Eq, "cvm-2")),
            ],
        );
        let s = sql(&expr).unwrap();
        assert!(s.contains(" OR "), "{s}");
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = sql(&Expression::equal("password", "x")).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn empty_rules_are_rejected() {
        let err = sql(&Expression::and(vec![])).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn in_requires_non_empty_array() {
        let empty = Expression::and(vec![Rule::Atom(AtomRule::new("id", AtomOp::In, json!([])))]);
        assert!(sql(&empty).is_err());
        let scalar = Expression::and(vec![Rule::Atom(AtomRule::new("id", AtomOp::In, 1))]);
        assert!(sql(&scalar).is_err());
    }

    #[test]
    fn float_and_object_values_are_rejected() {
        let float = Expression::and(vec![Rule::Atom(AtomRule::new("id", AtomOp::Gt, 1.5))]);
        assert!(sql(&float).is_err());
        let object = Expression::and(vec![Rule::Atom(AtomRule::new("id", AtomOp::Eq, json!({"a": 1})))]);
        assert!(sql(&object).is_err());
    }

    #[test]
    fn nesting_is_limited() {
        let inner = Expression::and(vec![Rule::Expression(Expression::equal("id", 1))]);
        let outer = Expression::and(vec![Rule::Expression(inner)]);
        assert!(sql(&outer).is_err());
    }

    #[test]
    fn too_many_rules_are_rejected() {
        let rules = (0..=MAX_RULES as i64)
            .map(|i| Rule::Atom(AtomRule::new("id", AtomOp::Neq, i)))
            .collect();
        assert!(sql(&Expression::and(rules)).is_err());
    }

    #[test]
    fn created_at_binds_rfc3339_as_timestamp() {
        let values = bound_values(&atom("created_at", AtomOp::Gte, json!("2000-01-01T00:00:00Z"))).unwrap();
        assert_eq!(values.len(), 1);
        let Value::ChronoDateTimeWithTimeZone(Some(ts)) = &values[0] else {
            panic!("expected a zoned timestamp, got {:?}", values[0]);
        };
        assert_eq!(ts.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn created_at_in_list_binds_every_item_as_timestamp() {
        let values = bound_values(&atom(
            "created_at",
            AtomOp::In,
            json!(["2000-01-01T00:00:00Z", "2024-05-06T07:08:09+08:00"]),
        ))
        .unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| matches!(v, Value::ChronoDateTimeWithTimeZone(Some(_)))));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let err = sql(&atom("created_at", AtomOp::Gte, json!("yesterday"))).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
        let err = sql(&atom("created_at", AtomOp::Lt, json!(946684800))).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn integer_column_binds_big_int_and_rejects_strings() {
        let values = bound_values(&Expression::equal("id", 1)).unwrap();
        assert!(matches!(values[..], [Value::BigInt(Some(1))]), "{values:?}");

        let err = sql(&Expression::equal("id", "1")).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
        let err = sql(&Expression::containers("id", ["1", "2"])).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn text_column_rejects_non_strings() {
        let values = bound_values(&Expression::equal("disk_id", "disk-1")).unwrap();
        assert!(matches!(&values[..], [Value::String(Some(s))] if s.as_str() == "disk-1"), "{values:?}");

        assert!(matches!(sql(&Expression::equal("disk_id", 7)).unwrap_err(), ModelError::Validation(_)));
        assert!(matches!(sql(&Expression::equal("cvm_id", true)).unwrap_err(), ModelError::Validation(_)));
    }

    #[test]
    fn cs_only_applies_to_text_columns() {
        assert!(sql(&atom("creator", AtomOp::Cs, json!("ali"))).unwrap().contains("LIKE '%ali%'"));
        let err = sql(&atom("id", AtomOp::Cs, json!("1"))).unwrap_err();
        assert!(matches!(err, ModelError::Validation(_)));
    }

    #[test]
    fn unknown_op_decodes_and_fails_as_validation() {
        let expr: Expression = serde_json::from_value(json!({
            "op": "and",
            "rules": [{"field": "disk_id", "op": "like", "value": "disk-%"}]
        }))
        .unwrap();
        assert!(matches!(&expr.rules[0], Rule::Atom(a) if a.op == "like"));
        let err = sql(&expr).unwrap_err();
        assert!(matches!(err, ModelError::Validation(ref m) if m.contains("like")), "{err}");
    }

    #[test]
    fn op_names_round_trip() {
        for op in [AtomOp::Eq, AtomOp::Neq, AtomOp::Gt, AtomOp::Gte, AtomOp::Lt, AtomOp::Lte, AtomOp::In, AtomOp::Nin, AtomOp::Cs] {
            assert_eq!(op.as_str().parse::<AtomOp>().unwrap(), op);
        }
    }
}
