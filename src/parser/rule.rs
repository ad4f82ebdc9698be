//! Deferred rule handles for mutually recursive grammars
//!
//! A grammar is built in two phases. First every rule that is referenced
//! before it can be written down is declared; the returned [`Rule`] hands out
//! parsers right away. Then each rule gets its definition, and
//! [`RuleSet::finish`] checks that nothing was left undefined.
//!
//! Parsers handed out by a rule only hold a weak reference to its slot, so
//! rules that refer to each other do not keep each other alive. The slots are
//! owned by the [`Rules`] value returned from `finish`, which has to be kept
//! next to the root parser for as long as it is used.

use std::any::Any;
use std::sync::{Arc, OnceLock, Weak};

use tracing::trace;

use crate::error::GrammarError;

use super::combinators::BoxedParser;
use super::state::{ParseResult, ParseState, Parser};

type Slot<T> = OnceLock<BoxedParser<T>>;

/// A named placeholder for a parser that gets defined later
pub struct Rule<T> {
    name: &'static str,
    slot: Arc<Slot<T>>,
}

impl<T> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: 'static> Rule<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    /// A parser that runs whatever this rule gets defined as
    pub fn parser(&self) -> BoxedParser<T> {
        let name = self.name;
        let slot: Weak<Slot<T>> = Arc::downgrade(&self.slot);
        BoxedParser::new(move |state: &mut ParseState| -> ParseResult<T> {
            let Some(slot) = slot.upgrade() else {
                panic!("rule `{name}` used after its grammar was dropped");
            };
            let Some(parser) = slot.get() else {
                panic!("rule `{name}` used before it was defined");
            };
            trace!(rule = name, index = state.position(), "enter rule");
            parser.parse(state)
        })
    }
}

/// Type-erased view of a declared slot, used for the completeness check
trait DeclaredSlot: Send + Sync {
    fn name(&self) -> &'static str;
    fn is_bound(&self) -> bool;
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> DeclaredSlot for Rule<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_bound(&self) -> bool {
        self.slot.get().is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder for a set of mutually recursive rules
#[derive(Default)]
pub struct RuleSet {
    declared: Vec<Box<dyn DeclaredSlot>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a rule that can be referenced before it is defined
    pub fn declare<T: 'static>(&mut self, name: &'static str) -> Rule<T> {
        let rule = Rule {
            name,
            slot: Arc::new(OnceLock::new()),
        };
        self.declared.push(Box::new(rule.clone()));
        rule
    }

    /// Binds `rule` to its definition
    ///
    /// A rule can be defined exactly once.
    pub fn define<T: 'static>(
        &mut self,
        rule: &Rule<T>,
        parser: BoxedParser<T>,
    ) -> Result<(), GrammarError> {
        let owned = self.declared.iter().any(|declared| {
            declared
                .as_any()
                .downcast_ref::<Rule<T>>()
                .is_some_and(|candidate| Arc::ptr_eq(&candidate.slot, &rule.slot))
        });
        if !owned {
            return Err(GrammarError::ForeignRule {
                name: rule.name.to_string(),
            });
        }

        rule.slot
            .set(parser)
            .map_err(|_| GrammarError::AlreadyBound {
                name: rule.name.to_string(),
            })
    }

    /// Checks that every declared rule has a definition
    pub fn finish(self) -> Result<Rules, GrammarError> {
        if let Some(unbound) = self.declared.iter().find(|declared| !declared.is_bound()) {
            return Err(GrammarError::Unbound {
                name: unbound.name().to_string(),
            });
        }
        Ok(Rules {
            slots: self.declared,
        })
    }
}

/// The fully defined rules of a grammar
///
/// Owns every rule slot; dropping it invalidates all parsers obtained from
/// the rules.
pub struct Rules {
    slots: Vec<Box<dyn DeclaredSlot>>,
}

impl Rules {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slots.iter().map(|slot| slot.name())
    }
}
