// SPDX-License-Identifier: MIT

//! Phrase tables for rendering conditions as text

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ast::Operator;
use crate::error::FlowCondError;

/// Display language for rendered conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Word joining the operands of `and`
    pub fn conjunction(self) -> &'static str {
        match self {
            Locale::En => "and",
            Locale::Zh => "且",
        }
    }

    /// Word joining the operands of `or`
    pub fn disjunction(self) -> &'static str {
        match self {
            Locale::En => "or",
            Locale::Zh => "或",
        }
    }

    pub fn negation(self) -> &'static str {
        match self {
            Locale::En => "not",
            Locale::Zh => "非",
        }
    }

    /// Phrase placed after the operand of a null check
    pub fn null_check(self, is_null: bool) -> &'static str {
        match (self, is_null) {
            (Locale::En, true) => "is empty",
            (Locale::En, false) => "is not empty",
            (Locale::Zh, true) => "为空",
            (Locale::Zh, false) => "不为空",
        }
    }

    /// Infix phrase and optional closing phrase of a two-operand operator,
    /// rendered as `<left> <infix> <right>[ <closing>]`
    pub fn binary_phrase(self, operator: Operator) -> (&'static str, Option<&'static str>) {
        match self {
            Locale::En => {
                let infix = match operator {
                    Operator::Eq => "equals",
                    Operator::Neq => "does not equal",
                    Operator::Gt => "is greater than",
                    Operator::Lt => "is less than",
                    Operator::Gte => "is greater than or equal to",
                    Operator::Lte => "is less than or equal to",
                    Operator::Contains => "contains",
                    Operator::StartsWith => "starts with",
                    Operator::EndsWith => "ends with",
                    Operator::In => "is in",
                    Operator::NotIn => "is not in",
                    other => other.info().symbol,
                };
                (infix, None)
            }
            Locale::Zh => match operator {
                Operator::Eq => ("等于", None),
                Operator::Neq => ("不等于", None),
                Operator::Gt => ("大于", None),
                Operator::Lt => ("小于", None),
                Operator::Gte => ("大于等于", None),
                Operator::Lte => ("小于等于", None),
                Operator::Contains => ("包含", None),
                Operator::StartsWith => ("以", Some("开始")),
                Operator::EndsWith => ("以", Some("结束")),
                Operator::In => ("在", Some("中")),
                Operator::NotIn => ("不在", Some("中")),
                other => (other.info().symbol, None),
            },
        }
    }

    /// Label shown for an operator in pickers
    pub fn label(self, operator: Operator) -> &'static str {
        match (self, operator) {
            (Locale::En, Operator::Eq) => "equals",
            (Locale::En, Operator::Neq) => "not equals",
            (Locale::En, Operator::Gt) => "greater than",
            (Locale::En, Operator::Lt) => "less than",
            (Locale::En, Operator::Gte) => "greater than or equal",
            (Locale::En, Operator::Lte) => "less than or equal",
            (Locale::En, Operator::And) => "and",
            (Locale::En, Operator::Or) => "or",
            (Locale::En, Operator::Not) => "not",
            (Locale::En, Operator::Contains) => "contains",
            (Locale::En, Operator::StartsWith) => "starts with",
            (Locale::En, Operator::EndsWith) => "ends with",
            (Locale::En, Operator::In) => "in collection",
            (Locale::En, Operator::NotIn) => "not in collection",
            (Locale::En, Operator::IsNull) => "is empty",
            (Locale::En, Operator::IsNotNull) => "is not empty",
            (Locale::Zh, Operator::Eq) => "等于",
            (Locale::Zh, Operator::Neq) => "不等于",
            (Locale::Zh, Operator::Gt) => "大于",
            (Locale::Zh, Operator::Lt) => "小于",
            (Locale::Zh, Operator::Gte) => "大于等于",
            (Locale::Zh, Operator::Lte) => "小于等于",
            (Locale::Zh, Operator::And) => "与",
            (Locale::Zh, Operator::Or) => "或",
            (Locale::Zh, Operator::Not) => "非",
            (Locale::Zh, Operator::Contains) => "包含",
            (Locale::Zh, Operator::StartsWith) => "以...开始",
            (Locale::Zh, Operator::EndsWith) => "以...结束",
            (Locale::Zh, Operator::In) => "在集合中",
            (Locale::Zh, Operator::NotIn) => "不在集合中",
            (Locale::Zh, Operator::IsNull) => "为空",
            (Locale::Zh, Operator::IsNotNull) => "不为空",
        }
    }

    pub fn variable(self, name: &str) -> String {
        match self {
            Locale::En => format!("variable[{}]", name),
            Locale::Zh => format!("变量[{}]", name),
        }
    }

    pub fn function(self, name: &str) -> String {
        match self {
            Locale::En => format!("function[{}]", name),
            Locale::Zh => format!("函数[{}]", name),
        }
    }

    pub fn unknown_operand(self) -> &'static str {
        match self {
            Locale::En => "unknown operand",
            Locale::Zh => "未知操作数",
        }
    }

    /// Text returned when a tree cannot be rendered
    pub fn invalid_expression(self) -> &'static str {
        match self {
            Locale::En => "invalid expression",
            Locale::Zh => "无效的表达式",
        }
    }
}

impl FromStr for Locale {
    type Err = FlowCondError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Locale::En),
            "zh" | "zh-cn" | "chinese" => Ok(Locale::Zh),
            other => Err(FlowCondError::config(format!("Unknown locale: {}", other))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Zh => write!(f, "zh"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ZH-CN".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!(" chinese ".parse::<Locale>().unwrap(), Locale::Zh);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_display_round_trip() {
        for locale in [Locale::En, Locale::Zh] {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_zh_phrases_wrap_right_operand() {
        assert_eq!(
            Locale::Zh.binary_phrase(Operator::StartsWith),
            ("以", Some("开始"))
        );
        assert_eq!(Locale::Zh.binary_phrase(Operator::NotIn), ("不在", Some("中")));
        assert_eq!(Locale::En.binary_phrase(Operator::NotIn), ("is not in", None));
    }

    #[test]
    fn test_every_operator_has_labels() {
        for op in Operator::ALL {
            assert!(!Locale::En.label(op).is_empty());
            assert!(!Locale::Zh.label(op).is_empty());
        }
    }
}
