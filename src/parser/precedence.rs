use std::collections::HashMap;

use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binding power and associativity of one binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryBinding {
    pub precedence: u8,
    pub associativity: Associativity,
}

impl BinaryBinding {
    /// Minimum precedence for the right operand of this operator
    pub fn right_precedence(&self) -> u8 {
        match self.associativity {
            Associativity::Left => self.precedence + 1,
            Associativity::Right => self.precedence,
        }
    }
}

/// Operator binding table for one grammar
///
/// Built once and then only read; grammars share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct PrecedenceTable {
    binary: HashMap<TokenKind, BinaryBinding>,
    unary: HashMap<TokenKind, u8>,
}

impl PrecedenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn binary(mut self, kind: TokenKind, precedence: u8, associativity: Associativity) -> Self {
        self.binary.insert(
            kind,
            BinaryBinding {
                precedence,
                associativity,
            },
        );
        self
    }

    pub fn left(self, kind: TokenKind, precedence: u8) -> Self {
        self.binary(kind, precedence, Associativity::Left)
    }

    pub fn right(self, kind: TokenKind, precedence: u8) -> Self {
        self.binary(kind, precedence, Associativity::Right)
    }

    pub fn unary(mut self, kind: TokenKind, precedence: u8) -> Self {
        self.unary.insert(kind, precedence);
        self
    }

    pub fn binary_binding(&self, kind: TokenKind) -> Option<BinaryBinding> {
        self.binary.get(&kind).copied()
    }

    pub fn unary_precedence(&self, kind: TokenKind) -> Option<u8> {
        self.unary.get(&kind).copied()
    }

    pub fn precedence(&self, kind: TokenKind) -> Option<u8> {
        self.binary_binding(kind).map(|binding| binding.precedence)
    }

    pub fn associativity(&self, kind: TokenKind) -> Option<Associativity> {
        self.binary_binding(kind).map(|binding| binding.associativity)
    }

    pub fn is_binary(&self, kind: TokenKind) -> bool {
        self.binary.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_operand_precedence_follows_associativity() {
        let table = PrecedenceTable::new()
            .left(TokenKind::Plus, 9)
            .right(TokenKind::Hat, 12);

        assert_eq!(
            table.binary_binding(TokenKind::Plus).unwrap().right_precedence(),
            10
        );
        assert_eq!(
            table.binary_binding(TokenKind::Hat).unwrap().right_precedence(),
            12
        );
        assert_eq!(table.precedence(TokenKind::Asterisk), None);
    }

    #[test]
    fn unary_and_binary_entries_are_separate() {
        let table = PrecedenceTable::new()
            .left(TokenKind::Minus, 9)
            .unary(TokenKind::Minus, 11);

        assert_eq!(table.precedence(TokenKind::Minus), Some(9));
        assert_eq!(table.unary_precedence(TokenKind::Minus), Some(11));
        assert_eq!(table.unary_precedence(TokenKind::Hat), None);
    }
}
