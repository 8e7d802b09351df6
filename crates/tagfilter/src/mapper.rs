//! Syntax tree → REST tag-filter tree.

use crate::ast::{Expression, Value};
use crate::model::TagFilter;

/// Map a parsed expression to its REST representation.
pub fn map_to_rest(expr: &Expression) -> TagFilter {
    match expr {
        Expression::Comparison {
            entity,
            operator,
            value,
        } => {
            let mut tag = TagFilter::tag(&entity.name, operator.as_str(), entity.origin.as_rest());
            tag.key = entity.key.clone();
            match value {
                Value::String(s) => {
                    tag.string_value = Some(s.clone());
                    if entity.key.is_some() {
                        tag.value = Some(s.clone());
                    }
                }
                Value::Number(n) => tag.number_value = Some(*n),
                Value::Bool(b) => tag.boolean_value = Some(*b),
            }
            tag
        }
        Expression::Unary { entity, operator } => {
            let mut tag = TagFilter::tag(&entity.name, operator.as_str(), entity.origin.as_rest());
            tag.key = entity.key.clone();
            tag
        }
        Expression::Logical { operator, operands } => TagFilter::expression(
            operator.as_str(),
            operands.iter().map(map_to_rest).collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagFilterType;
    use crate::parse;

    #[test]
    fn number_comparison_maps_to_leaf() {
        let rest = map_to_rest(&parse("call.http.status EQUALS 404").unwrap());
        assert_eq!(rest.element_type, TagFilterType::TagFilter);
        assert_eq!(rest.name.as_deref(), Some("call.http.status"));
        assert_eq!(rest.number_value, Some(404.0));
        assert_eq!(rest.operator.as_deref(), Some("EQUALS"));
        assert_eq!(rest.entity.as_deref(), Some("DESTINATION"));
        assert!(rest.string_value.is_none());
    }

    #[test]
    fn keyed_string_tag_carries_key_and_value() {
        let rest = map_to_rest(&parse("agent.tag:env@na EQUALS 'prod'").unwrap());
        assert_eq!(rest.key.as_deref(), Some("env"));
        assert_eq!(rest.value.as_deref(), Some("prod"));
        assert_eq!(rest.string_value.as_deref(), Some("prod"));
        assert_eq!(rest.entity.as_deref(), Some("NOT_APPLICABLE"));
    }

    #[test]
    fn logical_maps_to_expression_with_elements() {
        let rest = map_to_rest(&parse("a IS_EMPTY OR b EQUALS true").unwrap());
        assert_eq!(rest.element_type, TagFilterType::Expression);
        assert_eq!(rest.logical_operator.as_deref(), Some("OR"));
        let elements = rest.elements.unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].boolean_value, Some(true));
        assert!(elements[0].boolean_value.is_none());
    }
}
