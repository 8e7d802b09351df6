//! REST tag-filter tree → syntax tree → canonical text.

use crate::ast::{Entity, Expression, LogicalOperator, Operator, Origin, Value};
use crate::error::TagFilterError;
use crate::model::{TagFilter, TagFilterType};

/// Rebuild the expression a REST tree stands for.
///
/// Expressions without elements vanish; `Ok(None)` means "no filter".
pub fn to_expression(filter: &TagFilter) -> Result<Option<Expression>, TagFilterError> {
    match &filter.element_type {
        TagFilterType::Expression => {
            let operator = match filter.logical_operator.as_deref() {
                Some(op) if op.eq_ignore_ascii_case("OR") => LogicalOperator::Or,
                Some(op) if op.eq_ignore_ascii_case("AND") => LogicalOperator::And,
                None => LogicalOperator::And,
                Some(other) => return Err(TagFilterError::UnknownOperator(other.to_string())),
            };
            let mut operands = Vec::new();
            for element in filter.elements.iter().flatten() {
                if let Some(expr) = to_expression(element)? {
                    operands.push(expr);
                }
            }
            if operands.is_empty() {
                return Ok(None);
            }
            Ok(Some(Expression::logical(operator, operands)))
        }
        TagFilterType::TagFilter => leaf_to_expression(filter).map(Some),
        TagFilterType::Unsupported(other) => Err(TagFilterError::UnsupportedType(other.clone())),
    }
}

/// Render a REST tree as canonical tag-filter text.
pub fn normalize(filter: &TagFilter) -> Result<Option<String>, TagFilterError> {
    Ok(to_expression(filter)?.map(|expr| expr.to_string()))
}

fn leaf_to_expression(filter: &TagFilter) -> Result<Expression, TagFilterError> {
    let name = filter
        .name
        .as_deref()
        .ok_or(TagFilterError::MissingField("name"))?;
    let operator: Operator = filter
        .operator
        .as_deref()
        .ok_or(TagFilterError::MissingField("operator"))?
        .parse()?;
    let origin = match filter.entity.as_deref() {
        Some(entity) => Origin::from_rest(entity)?,
        None => Origin::default(),
    };

    let entity = Entity {
        name: name.to_string(),
        key: filter.key.clone(),
        origin,
    };

    if operator.is_unary() {
        return Ok(Expression::Unary { entity, operator });
    }

    let value = if let Some(s) = &filter.string_value {
        Value::String(s.clone())
    } else if let Some(n) = filter.number_value {
        Value::Number(n)
    } else if let Some(b) = filter.boolean_value {
        Value::Bool(b)
    } else if let Some(v) = &filter.value {
        Value::String(v.clone())
    } else {
        return Err(TagFilterError::MissingValue(operator.to_string()));
    };

    Ok(Expression::Comparison {
        entity,
        operator,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_expression_normalizes_to_none() {
        assert_eq!(normalize(&TagFilter::empty()).unwrap(), None);
    }

    #[test]
    fn nested_empty_expressions_vanish() {
        let filter = TagFilter::expression(
            "OR",
            vec![TagFilter::empty(), TagFilter::expression("AND", Vec::new())],
        );
        assert_eq!(normalize(&filter).unwrap(), None);
    }

    #[test]
    fn number_leaf_normalizes_with_origin() {
        let mut leaf = TagFilter::tag("name", "EQUALS", "DESTINATION");
        leaf.number_value = Some(1234.0);
        assert_eq!(normalize(&leaf).unwrap().as_deref(), Some("name@dest EQUALS 1234"));
    }

    #[test]
    fn single_element_expression_collapses() {
        let mut leaf = TagFilter::tag("service.name", "STARTS_WITH", "SOURCE");
        leaf.string_value = Some("shop".into());
        let filter = TagFilter::expression("AND", vec![leaf]);
        assert_eq!(
            normalize(&filter).unwrap().as_deref(),
            Some("service.name@src STARTS_WITH 'shop'")
        );
    }

    #[test]
    fn keyed_tag_from_api_uses_value_field() {
        let mut leaf = TagFilter::tag("agent.tag", "EQUALS", "NOT_APPLICABLE");
        leaf.key = Some("env".into());
        leaf.value = Some("prod".into());
        assert_eq!(
            normalize(&leaf).unwrap().as_deref(),
            Some("agent.tag:env@na EQUALS 'prod'")
        );
    }

    #[test]
    fn invalid_type_is_an_error() {
        let filter = TagFilter {
            element_type: TagFilterType::Unsupported("INVALID".into()),
            ..TagFilter::empty()
        };
        assert_eq!(
            normalize(&filter).unwrap_err(),
            TagFilterError::UnsupportedType("INVALID".into())
        );
    }

    #[test]
    fn leaf_without_value_is_an_error() {
        let leaf = TagFilter::tag("name", "EQUALS", "DESTINATION");
        assert_eq!(
            normalize(&leaf).unwrap_err(),
            TagFilterError::MissingValue("EQUALS".into())
        );
    }

    #[test]
    fn unary_leaf_needs_no_value() {
        let leaf = TagFilter::tag("host.name", "IS_BLANK", "DESTINATION");
        assert_eq!(normalize(&leaf).unwrap().as_deref(), Some("host.name@dest IS_BLANK"));
    }
}
