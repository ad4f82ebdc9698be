use crate::token::Position;

use super::expression::Expression;

/// `target = value`
///
/// Multiple assignment is split into one node per target/value pair.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub target: Expression,
    pub value: Expression,
    pub position: Position,
}

/// One entry of a table constructor
///
/// Positional entries (`{1, 2}`) have no key; keyed entries (`{[k] = v}`,
/// `{name = v}`) carry the indexer expression.
#[derive(Debug, Clone)]
pub struct FieldInitialization {
    pub key: Option<Expression>,
    pub value: Expression,
    pub position: Position,
}

impl FieldInitialization {
    pub fn positional(value: Expression) -> Self {
        let position = *value.position();
        Self {
            key: None,
            value,
            position,
        }
    }

    pub fn keyed(key: Expression, value: Expression) -> Self {
        let position = key.position().merge(value.position());
        Self {
            key: Some(key),
            value,
            position,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.key.is_none()
    }
}
