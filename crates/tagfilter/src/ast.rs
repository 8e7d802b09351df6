//! Tag-filter syntax tree and its canonical text rendering.
//!
//! Logical nodes are n-ary and flattened: `a AND (b AND c)` and `a AND b AND c`
//! produce the same tree, which makes the rendered text a canonical form.

use std::fmt;
use std::str::FromStr;

use crate::error::TagFilterError;

// ── Entity ──────────────────────────────────────────────────────────

/// Which side of a call a tag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    Source,
    #[default]
    Destination,
    NotApplicable,
}

impl Origin {
    /// Suffix used in text, without the `@`.
    pub fn as_text(&self) -> &'static str {
        match self {
            Origin::Source => "src",
            Origin::Destination => "dest",
            Origin::NotApplicable => "na",
        }
    }

    /// Discriminant used by the REST API.
    pub fn as_rest(&self) -> &'static str {
        match self {
            Origin::Source => "SOURCE",
            Origin::Destination => "DESTINATION",
            Origin::NotApplicable => "NOT_APPLICABLE",
        }
    }

    pub fn from_text(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "src" => Some(Origin::Source),
            "dest" => Some(Origin::Destination),
            "na" => Some(Origin::NotApplicable),
            _ => None,
        }
    }

    pub fn from_rest(s: &str) -> Result<Self, TagFilterError> {
        match s {
            "SOURCE" => Ok(Origin::Source),
            "DESTINATION" => Ok(Origin::Destination),
            "NOT_APPLICABLE" => Ok(Origin::NotApplicable),
            other => Err(TagFilterError::UnknownOrigin(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub name: String,
    pub key: Option<String>,
    pub origin: Origin,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(key) = &self.key {
            write!(f, ":{key}")?;
        }
        write!(f, "@{}", self.origin.as_text())
    }
}

// ── Operators ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEqual,
    Contains,
    NotContain,
    StartsWith,
    EndsWith,
    NotStartsWith,
    NotEndsWith,
    GreaterOrEqualThan,
    LessOrEqualThan,
    GreaterThan,
    LessThan,
    IsEmpty,
    NotEmpty,
    IsBlank,
    NotBlank,
}

impl Operator {
    pub const ALL: [Operator; 16] = [
        Operator::Equals,
        Operator::NotEqual,
        Operator::Contains,
        Operator::NotContain,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::NotStartsWith,
        Operator::NotEndsWith,
        Operator::GreaterOrEqualThan,
        Operator::LessOrEqualThan,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::IsEmpty,
        Operator::NotEmpty,
        Operator::IsBlank,
        Operator::NotBlank,
    ];

    /// Unary operators take no value.
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Operator::IsEmpty | Operator::NotEmpty | Operator::IsBlank | Operator::NotBlank
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEqual => "NOT_EQUAL",
            Operator::Contains => "CONTAINS",
            Operator::NotContain => "NOT_CONTAIN",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
            Operator::NotStartsWith => "NOT_STARTS_WITH",
            Operator::NotEndsWith => "NOT_ENDS_WITH",
            Operator::GreaterOrEqualThan => "GREATER_OR_EQUAL_THAN",
            Operator::LessOrEqualThan => "LESS_OR_EQUAL_THAN",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::LessThan => "LESS_THAN",
            Operator::IsEmpty => "IS_EMPTY",
            Operator::NotEmpty => "NOT_EMPTY",
            Operator::IsBlank => "IS_BLANK",
            Operator::NotBlank => "NOT_BLANK",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = TagFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Operator::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == upper)
            .ok_or_else(|| TagFilterError::UnknownOperator(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Values & expressions ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => {
                f.write_str("'")?;
                for ch in s.chars() {
                    if ch == '\'' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{ch}")?;
                }
                f.write_str("'")
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Comparison {
        entity: Entity,
        operator: Operator,
        value: Value,
    },
    Unary {
        entity: Entity,
        operator: Operator,
    },
    Logical {
        operator: LogicalOperator,
        operands: Vec<Expression>,
    },
}

impl Expression {
    /// Combine operands under `operator`, merging nested nodes of the same kind.
    ///
    /// A single operand is returned as is.
    pub fn logical(operator: LogicalOperator, operands: Vec<Expression>) -> Expression {
        let mut flat = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Expression::Logical { operator: inner, operands: nested } if inner == operator => {
                    flat.extend(nested)
                }
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        Expression::Logical {
            operator,
            operands: flat,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Comparison {
                entity,
                operator,
                value,
            } => write!(f, "{entity} {operator} {value}"),
            Expression::Unary { entity, operator } => write!(f, "{entity} {operator}"),
            Expression::Logical { operator, operands } => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {operator} ")?;
                    }
                    let needs_parens = matches!(
                        operand,
                        Expression::Logical { operator: inner, .. }
                            if *operator == LogicalOperator::And && *inner == LogicalOperator::Or
                    );
                    if needs_parens {
                        write!(f, "({operand})")?;
                    } else {
                        write!(f, "{operand}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, value: Value) -> Expression {
        Expression::Comparison {
            entity: Entity {
                name: name.to_string(),
                key: None,
                origin: Origin::Destination,
            },
            operator: Operator::Equals,
            value,
        }
    }

    #[test]
    fn logical_flattens_same_operator() {
        let inner = Expression::logical(
            LogicalOperator::And,
            vec![tag("a", Value::Bool(true)), tag("b", Value::Bool(true))],
        );
        let outer = Expression::logical(LogicalOperator::And, vec![inner, tag("c", Value::Bool(true))]);
        match outer {
            Expression::Logical { operands, .. } => assert_eq!(operands.len(), 3),
            other => panic!("expected logical node, got {other:?}"),
        }
    }

    #[test]
    fn or_inside_and_is_parenthesized() {
        let or = Expression::logical(
            LogicalOperator::Or,
            vec![tag("a", Value::Number(1.0)), tag("b", Value::Number(2.0))],
        );
        let and = Expression::logical(LogicalOperator::And, vec![or, tag("c", Value::Number(3.0))]);
        assert_eq!(
            and.to_string(),
            "(a@dest EQUALS 1 OR b@dest EQUALS 2) AND c@dest EQUALS 3"
        );
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(Value::String("it's".into()).to_string(), r"'it\'s'");
        assert_eq!(Value::Number(1234.0).to_string(), "1234");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
    }

    #[test]
    fn operator_names_parse_case_insensitively() {
        assert_eq!("not_blank".parse::<Operator>().unwrap(), Operator::NotBlank);
        assert!("LIKE".parse::<Operator>().is_err());
        assert!(Operator::IsEmpty.is_unary());
        assert!(!Operator::Equals.is_unary());
    }
}
