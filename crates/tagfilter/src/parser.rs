//! Recursive-descent parser: `OR` binds looser than `AND`, parentheses group.
//!
//! ```text
//! expression := and ( "OR" and )*
//! and        := primary ( "AND" primary )*
//! primary    := "(" expression ")" | entity OPERATOR value | entity UNARY_OPERATOR
//! entity     := name [ ":" key ] [ "@" ( "src" | "dest" | "na" ) ]
//! ```

use crate::ast::{Entity, Expression, LogicalOperator, Operator, Origin, Value};
use crate::error::TagFilterError;
use crate::lexer::{tokenize, Token, TokenKind};

/// Parse tag-filter text into a flattened expression tree.
pub fn parse(input: &str) -> Result<Expression, TagFilterError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        return Err(TagFilterError::UnexpectedToken {
            pos: token.pos,
            expected: "AND, OR or end of expression".to_string(),
            found: token.kind.describe(),
        });
    }
    Ok(expr)
}

/// Split `name[:key][@origin]`; the origin defaults to destination.
pub(crate) fn parse_entity(word: &str) -> Entity {
    let (reference, origin) = match word.rsplit_once('@') {
        Some((head, suffix)) => match Origin::from_text(suffix) {
            Some(origin) => (head, origin),
            None => (word, Origin::default()),
        },
        None => (word, Origin::default()),
    };
    let (name, key) = match reference.split_once(':') {
        Some((name, key)) => (name.to_string(), Some(key.to_string())),
        None => (reference.to_string(), None),
    };
    Entity { name, key, origin }
}

struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    fn parse_expression(&mut self) -> Result<Expression, TagFilterError> {
        let mut operands = vec![self.parse_and()?];
        while self.match_kind(&TokenKind::Or) {
            operands.push(self.parse_and()?);
        }
        Ok(Expression::logical(LogicalOperator::Or, operands))
    }

    fn parse_and(&mut self) -> Result<Expression, TagFilterError> {
        let mut operands = vec![self.parse_primary()?];
        while self.match_kind(&TokenKind::And) {
            operands.push(self.parse_primary()?);
        }
        Ok(Expression::logical(LogicalOperator::And, operands))
    }

    fn parse_primary(&mut self) -> Result<Expression, TagFilterError> {
        let token = self.advance("'(' or tag name")?;
        match token.kind {
            TokenKind::LeftParen => {
                let expr = self.parse_expression()?;
                let close = self.advance("')'")?;
                if close.kind != TokenKind::RightParen {
                    return Err(unexpected(&close, "')'"));
                }
                Ok(expr)
            }
            TokenKind::Word(ref word) => {
                let entity = parse_entity(word);
                self.parse_tag(entity)
            }
            _ => Err(unexpected(&token, "'(' or tag name")),
        }
    }

    fn parse_tag(&mut self, entity: Entity) -> Result<Expression, TagFilterError> {
        let token = self.advance("operator")?;
        let operator = match &token.kind {
            TokenKind::Word(word) => word.parse::<Operator>()?,
            _ => return Err(unexpected(&token, "operator")),
        };
        if operator.is_unary() {
            return Ok(Expression::Unary { entity, operator });
        }

        let token = self.advance("value")?;
        let value = match token.kind {
            TokenKind::Str(s) => Value::String(s),
            TokenKind::Number(n) => Value::Number(n),
            TokenKind::Bool(b) => Value::Bool(b),
            _ => return Err(unexpected(&token, "value")),
        };
        Ok(Expression::Comparison {
            entity,
            operator,
            value,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn advance(&mut self, expected: &str) -> Result<Token, TagFilterError> {
        let token = self
            .tokens
            .get(self.current)
            .cloned()
            .ok_or_else(|| TagFilterError::UnexpectedEnd {
                expected: expected.to_string(),
            })?;
        self.current += 1;
        Ok(token)
    }

    fn match_kind(&mut self, expected: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == expected) {
            self.current += 1;
            return true;
        }
        false
    }
}

fn unexpected(token: &Token, expected: &str) -> TagFilterError {
    TagFilterError::UnexpectedToken {
        pos: token.pos,
        expected: expected.to_string(),
        found: token.kind.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, key: Option<&str>, origin: Origin) -> Entity {
        Entity {
            name: name.to_string(),
            key: key.map(String::from),
            origin,
        }
    }

    #[test]
    fn parses_simple_comparison_with_default_origin() {
        let expr = parse("name EQUALS 1234").unwrap();
        assert_eq!(
            expr,
            Expression::Comparison {
                entity: entity("name", None, Origin::Destination),
                operator: Operator::Equals,
                value: Value::Number(1234.0),
            }
        );
        assert_eq!(expr.to_string(), "name@dest EQUALS 1234");
    }

    #[test]
    fn parses_key_and_origin() {
        let expr = parse("agent.tag:stage@src CONTAINS 'prod'").unwrap();
        match expr {
            Expression::Comparison { entity: e, .. } => {
                assert_eq!(e, entity("agent.tag", Some("stage"), Origin::Source))
            }
            other => panic!("expected comparison, got {other:?}"),
        }
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse("a EQUALS 1 OR b EQUALS 2 AND c IS_EMPTY").unwrap();
        match expr {
            Expression::Logical { operator, operands } => {
                assert_eq!(operator, LogicalOperator::Or);
                assert_eq!(operands.len(), 2);
                assert!(matches!(
                    operands[1],
                    Expression::Logical { operator: LogicalOperator::And, .. }
                ));
            }
            other => panic!("expected OR node, got {other:?}"),
        }
    }

    #[test]
    fn parentheses_of_same_operator_are_flattened() {
        let grouped = parse("(a EQUALS 1 AND b EQUALS 2) AND c EQUALS 3").unwrap();
        let flat = parse("a EQUALS 1 AND b EQUALS 2 AND c EQUALS 3").unwrap();
        assert_eq!(grouped, flat);
    }

    #[test]
    fn unary_operators_take_no_value() {
        assert_eq!(
            parse("host.name NOT_BLANK").unwrap(),
            Expression::Unary {
                entity: entity("host.name", None, Origin::Destination),
                operator: Operator::NotBlank,
            }
        );
    }

    #[test]
    fn missing_value_reports_end() {
        assert_eq!(
            parse("a EQUALS").unwrap_err(),
            TagFilterError::UnexpectedEnd {
                expected: "value".to_string()
            }
        );
    }

    #[test]
    fn unknown_operator_is_rejected() {
        assert_eq!(
            parse("a LIKE 'x'").unwrap_err(),
            TagFilterError::UnknownOperator("LIKE".to_string())
        );
    }

    #[test]
    fn unbalanced_parenthesis_is_rejected() {
        assert!(parse("(a EQUALS 1").is_err());
        assert!(matches!(
            parse("a EQUALS 1)").unwrap_err(),
            TagFilterError::UnexpectedToken { pos: 10, .. }
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            parse("   ").unwrap_err(),
            TagFilterError::UnexpectedEnd { .. }
        ));
    }
}
