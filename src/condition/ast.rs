// SPDX-License-Identifier: MIT

//! Expression tree for flow conditions
//!
//! Internal nodes are [`ConditionNode`]s (an operator and its operands),
//! leaves are [`OperandNode`]s that reference a variable, carry a constant,
//! or name a function. On the wire a node is a condition iff it has an
//! `operator` key:
//!
//! ```json
//! {"operator": "gt", "operands": [
//!     {"type": "variable", "value": "temp"},
//!     {"type": "constant", "value": 20, "dataType": "number"}
//! ]}
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// A node in a condition tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    /// Internal node: operator applied to operands
    Condition(ConditionNode),
    /// Leaf: variable, constant or function reference
    Operand(OperandNode),
    /// Decoded shape that is neither a condition nor an operand
    Malformed(Value),
}

/// Operator applied to an ordered list of operands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionNode {
    pub operator: OperatorTag,
    pub operands: Vec<Expression>,
}

/// Leaf of a condition tree
///
/// For `Variable` and `Function` the `value` is a name, never the resolved
/// runtime value. `data_type` is editor metadata and is not used to coerce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperandNode {
    #[serde(rename = "type")]
    pub kind: OperandKind,
    pub value: Value,
    #[serde(rename = "dataType", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

/// How an operand obtains its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandKind {
    #[default]
    Variable,
    Constant,
    Function,
}

/// Declared data type of an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    String,
    Number,
    Boolean,
    Date,
    Object,
    Array,
}

/// The closed set of supported operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    And,
    Or,
    Not,
    Contains,
    StartsWith,
    EndsWith,
    In,
    NotIn,
    IsNull,
    IsNotNull,
}

/// Operator as written in a decoded tree
///
/// Unknown tags are kept rather than failing the decode, so the validator
/// can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorTag {
    Known(Operator),
    Unknown(String),
}

/// Operator family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Comparison,
    Logical,
    String,
    Collection,
    Null,
}

/// Number of operands an operator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

/// Static description of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub symbol: &'static str,
    /// Operand count an editor starts a new node with
    pub operand_count: usize,
    pub category: Category,
    /// Operand count the validator enforces
    pub arity: Arity,
}

impl Operator {
    pub const ALL: [Operator; 16] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::In,
        Operator::NotIn,
        Operator::IsNull,
        Operator::IsNotNull,
    ];

    /// Wire tag of this operator
    pub fn tag(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::IsNull => "isNull",
            Operator::IsNotNull => "isNotNull",
        }
    }

    /// Look up an operator by its wire tag
    pub fn from_tag(tag: &str) -> Option<Operator> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    pub fn info(self) -> OperatorInfo {
        let (symbol, category) = match self {
            Operator::Eq => ("=", Category::Comparison),
            Operator::Neq => ("≠", Category::Comparison),
            Operator::Gt => (">", Category::Comparison),
            Operator::Lt => ("<", Category::Comparison),
            Operator::Gte => ("≥", Category::Comparison),
            Operator::Lte => ("≤", Category::Comparison),
            Operator::And => ("AND", Category::Logical),
            Operator::Or => ("OR", Category::Logical),
            Operator::Not => ("NOT", Category::Logical),
            Operator::Contains => ("contains", Category::String),
            Operator::StartsWith => ("starts with", Category::String),
            Operator::EndsWith => ("ends with", Category::String),
            Operator::In => ("in", Category::Collection),
            Operator::NotIn => ("not in", Category::Collection),
            Operator::IsNull => ("is null", Category::Null),
            Operator::IsNotNull => ("is not null", Category::Null),
        };
        let operand_count = match self {
            Operator::Not | Operator::IsNull | Operator::IsNotNull => 1,
            _ => 2,
        };
        // and/or fold over any non-empty operand list
        let arity = match self {
            Operator::And | Operator::Or => Arity::AtLeast(1),
            _ => Arity::Exactly(operand_count),
        };

        OperatorInfo {
            operator: self,
            symbol,
            operand_count,
            category,
            arity,
        }
    }

    pub fn category(self) -> Category {
        self.info().category
    }

    pub fn arity(self) -> Arity {
        self.info().arity
    }

    /// All operators of a category, in declaration order
    pub fn by_category(category: Category) -> Vec<Operator> {
        Self::ALL
            .into_iter()
            .filter(|op| op.category() == category)
            .collect()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

impl OperatorTag {
    /// The operator, if the tag is one of the supported ones
    pub fn known(&self) -> Option<Operator> {
        match self {
            OperatorTag::Known(op) => Some(*op),
            OperatorTag::Unknown(_) => None,
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(tag) => Operator::from_tag(tag)
                .map(OperatorTag::Known)
                .unwrap_or_else(|| OperatorTag::Unknown(tag.clone())),
            other => OperatorTag::Unknown(other.to_string()),
        }
    }
}

impl From<Operator> for OperatorTag {
    fn from(op: Operator) -> Self {
        OperatorTag::Known(op)
    }
}

impl fmt::Display for OperatorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorTag::Known(op) => f.write_str(op.tag()),
            OperatorTag::Unknown(tag) => f.write_str(tag),
        }
    }
}

impl Serialize for OperatorTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl OperandKind {
    pub fn from_tag(tag: &str) -> Option<OperandKind> {
        match tag {
            "variable" => Some(OperandKind::Variable),
            "constant" => Some(OperandKind::Constant),
            "function" => Some(OperandKind::Function),
            _ => None,
        }
    }
}

impl DataType {
    pub fn from_tag(tag: &str) -> Option<DataType> {
        match tag {
            "string" => Some(DataType::String),
            "number" => Some(DataType::Number),
            "boolean" => Some(DataType::Boolean),
            "date" => Some(DataType::Date),
            "object" => Some(DataType::Object),
            "array" => Some(DataType::Array),
            _ => None,
        }
    }
}

impl Expression {
    /// Build a condition node
    pub fn condition(operator: Operator, operands: Vec<Expression>) -> Self {
        Expression::Condition(ConditionNode::new(operator, operands))
    }

    /// Default condition for editors: `"" eq ""` with string operands
    pub fn empty_condition() -> Self {
        Expression::Condition(ConditionNode::empty())
    }

    /// Classify a decoded JSON value by shape
    ///
    /// Never fails: shapes that are neither a condition nor an operand
    /// become [`Expression::Malformed`].
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Expression::Malformed(other),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        if let Some(tag) = map.remove("operator") {
            return match map.remove("operands") {
                Some(Value::Array(items)) => Expression::Condition(ConditionNode {
                    operator: OperatorTag::from_value(&tag),
                    operands: items.into_iter().map(Self::from_value).collect(),
                }),
                operands => {
                    map.insert("operator".to_string(), tag);
                    if let Some(operands) = operands {
                        map.insert("operands".to_string(), operands);
                    }
                    Expression::Malformed(Value::Object(map))
                }
            };
        }

        let kind = map
            .get("type")
            .and_then(Value::as_str)
            .and_then(OperandKind::from_tag);
        match kind {
            Some(kind) => {
                let data_type = map.remove("dataType").and_then(|raw| {
                    let parsed = raw.as_str().and_then(DataType::from_tag);
                    if parsed.is_none() {
                        log::debug!("Dropping unrecognised dataType: {}", raw);
                    }
                    parsed
                });
                let value = map.remove("value").unwrap_or(Value::Null);
                map.remove("type");
                if !map.is_empty() {
                    let extra: Vec<&String> = map.keys().collect();
                    log::debug!("Dropping extra operand keys: {:?}", extra);
                }
                Expression::Operand(OperandNode {
                    kind,
                    value,
                    data_type,
                })
            }
            None => Expression::Malformed(Value::Object(map)),
        }
    }

    pub fn as_condition(&self) -> Option<&ConditionNode> {
        match self {
            Expression::Condition(node) => Some(node),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Expression::from_value(value))
    }
}

impl From<ConditionNode> for Expression {
    fn from(node: ConditionNode) -> Self {
        Expression::Condition(node)
    }
}

impl From<OperandNode> for Expression {
    fn from(node: OperandNode) -> Self {
        Expression::Operand(node)
    }
}

impl ConditionNode {
    pub fn new(operator: Operator, operands: Vec<Expression>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    pub fn empty() -> Self {
        Self::new(
            Operator::Eq,
            vec![
                OperandNode::empty(OperandKind::Variable).into(),
                OperandNode::empty(OperandKind::Constant).into(),
            ],
        )
    }
}

impl OperandNode {
    /// Empty string-typed operand of the given kind
    pub fn empty(kind: OperandKind) -> Self {
        Self {
            kind,
            value: Value::String(String::new()),
            data_type: Some(DataType::String),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            kind: OperandKind::Variable,
            value: Value::String(name.into()),
            data_type: None,
        }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self {
            kind: OperandKind::Constant,
            value: value.into(),
            data_type: None,
        }
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: OperandKind::Function,
            value: Value::String(name.into()),
            data_type: None,
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    /// The referenced name for variable and function operands
    pub fn name(&self) -> Option<String> {
        match &self.value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

impl Default for OperandNode {
    fn default() -> Self {
        Self::empty(OperandKind::Variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_tags_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_tag(op.tag()), Some(op));
            assert_eq!(serde_json::to_value(op).unwrap(), json!(op.tag()));
        }
        assert_eq!(Operator::from_tag("xor"), None);
    }

    #[test]
    fn test_operator_info_table() {
        assert_eq!(Operator::Gte.info().symbol, "≥");
        assert_eq!(Operator::NotIn.info().category, Category::Collection);
        assert_eq!(Operator::Not.info().operand_count, 1);
        assert_eq!(Operator::Or.info().operand_count, 2);
        assert_eq!(Operator::IsNull.arity(), Arity::Exactly(1));
        assert_eq!(Operator::Eq.arity(), Arity::Exactly(2));
        assert_eq!(Operator::And.arity(), Arity::AtLeast(1));
    }

    #[test]
    fn test_by_category() {
        assert_eq!(
            Operator::by_category(Category::String),
            vec![Operator::Contains, Operator::StartsWith, Operator::EndsWith]
        );
        assert_eq!(
            Operator::by_category(Category::Null),
            vec![Operator::IsNull, Operator::IsNotNull]
        );
        assert_eq!(Operator::by_category(Category::Comparison).len(), 6);
    }

    #[test]
    fn test_arity_accepts() {
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(4));
        assert!(!Arity::AtLeast(1).accepts(0));
    }

    #[test]
    fn test_empty_condition() {
        let expr = Expression::empty_condition();
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({
                "operator": "eq",
                "operands": [
                    {"type": "variable", "value": "", "dataType": "string"},
                    {"type": "constant", "value": "", "dataType": "string"}
                ]
            })
        );
    }

    #[test]
    fn test_empty_operand_defaults_to_variable() {
        let operand = OperandNode::default();
        assert_eq!(operand.kind, OperandKind::Variable);
        assert_eq!(operand.value, json!(""));
        assert_eq!(operand.data_type, Some(DataType::String));
    }

    #[test]
    fn test_deserialize_by_shape() {
        let expr: Expression = serde_json::from_value(json!({
            "operator": "gt",
            "operands": [
                {"type": "variable", "value": "temp"},
                {"type": "constant", "value": 20, "dataType": "number"}
            ]
        }))
        .unwrap();

        assert_eq!(
            expr,
            Expression::condition(
                Operator::Gt,
                vec![
                    OperandNode::variable("temp").into(),
                    OperandNode::constant(20)
                        .with_data_type(DataType::Number)
                        .into(),
                ]
            )
        );
    }

    #[test]
    fn test_deserialize_unknown_operator_is_kept() {
        let expr: Expression = serde_json::from_value(json!({
            "operator": "xor",
            "operands": []
        }))
        .unwrap();
        let node = expr.as_condition().unwrap();
        assert_eq!(node.operator, OperatorTag::Unknown("xor".to_string()));
        assert_eq!(node.operator.known(), None);
    }

    #[test]
    fn test_deserialize_malformed_shapes() {
        let unknown_kind: Expression =
            serde_json::from_value(json!({"type": "register", "value": "r1"})).unwrap();
        assert!(matches!(unknown_kind, Expression::Malformed(_)));

        let bad_operands: Expression =
            serde_json::from_value(json!({"operator": "and", "operands": "x"})).unwrap();
        assert_eq!(
            bad_operands,
            Expression::Malformed(json!({"operator": "and", "operands": "x"}))
        );

        let scalar: Expression = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(scalar, Expression::Malformed(json!(42)));
    }

    #[test]
    fn test_operand_without_value_is_null() {
        let expr: Expression = serde_json::from_value(json!({"type": "constant"})).unwrap();
        assert_eq!(
            expr,
            Expression::Operand(OperandNode {
                kind: OperandKind::Constant,
                value: Value::Null,
                data_type: None,
            })
        );
    }

    #[test]
    fn test_unrecognised_data_type_and_extra_keys_are_dropped() {
        let expr: Expression = serde_json::from_value(json!({
            "type": "constant",
            "value": 5,
            "dataType": "weird",
            "unit": "celsius"
        }))
        .unwrap();
        assert_eq!(expr, Expression::from(OperandNode::constant(5)));
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({"type": "constant", "value": 5})
        );

        let expr: Expression =
            serde_json::from_value(json!({"type": "variable", "value": "t", "dataType": 3}))
                .unwrap();
        assert_eq!(expr, Expression::from(OperandNode::variable("t")));
    }

    #[test]
    fn test_serialize_unknown_operator() {
        let expr = Expression::Condition(ConditionNode {
            operator: OperatorTag::Unknown("xor".to_string()),
            operands: vec![],
        });
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({"operator": "xor", "operands": []})
        );
    }

    #[test]
    fn test_operand_name() {
        assert_eq!(OperandNode::variable("temp").name(), Some("temp".to_string()));
        assert_eq!(OperandNode::constant(7).name(), Some("7".to_string()));
        assert_eq!(OperandNode::constant(json!(null)).name(), None);
    }
}
