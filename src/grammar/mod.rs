/*
    This module is for storing and validating grammars in Chomsky Normal Form
*/

mod error;
mod symbol;

use std::collections::{HashMap, HashSet};

use itertools::Itertools;

pub use error::GrammarError;
pub use symbol::{Body, Nonterminal, Symbol, Terminal};

pub type Result<T> = std::result::Result<T, GrammarError>;

// The bodies a single nonterminal can be rewritten to
pub type RuleSet = HashSet<Body>;

/// A grammar in Chomsky Normal Form, built up one validated piece at a time.
///
/// Every mutator either applies completely or fails without touching the
/// grammar, so a `Grammar` always upholds its invariants: the two alphabets
/// are disjoint, the axiom is a declared nonterminal, and every symbol a
/// production mentions has been declared.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grammar {
    nonterminals: HashSet<Nonterminal>,
    terminals: HashSet<Terminal>,
    axiom: Option<Nonterminal>,
    productions: HashMap<Nonterminal, RuleSet>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_nonterminal(&mut self, symbol: char) -> Result<()> {
        let nonterminal = Nonterminal::try_from(symbol)?;
        if self.nonterminals.contains(&nonterminal) {
            return Err(GrammarError::DuplicateNonterminal(symbol));
        }
        debug_assert!(!self.terminals.iter().any(|t| t.as_char() == symbol));

        self.nonterminals.insert(nonterminal);
        Ok(())
    }

    pub fn add_terminal(&mut self, symbol: char) -> Result<()> {
        let terminal = Terminal::try_from(symbol)?;
        if self.terminals.contains(&terminal) {
            return Err(GrammarError::DuplicateTerminal(symbol));
        }
        debug_assert!(!self.nonterminals.iter().any(|n| n.as_char() == symbol));

        self.terminals.insert(terminal);
        Ok(())
    }

    // Overwrites any previous axiom
    pub fn set_start_symbol(&mut self, symbol: char) -> Result<()> {
        let nonterminal = self
            .declared_nonterminal(symbol)
            .ok_or(GrammarError::UndeclaredStartSymbol(symbol))?;

        self.axiom = Some(nonterminal);
        Ok(())
    }

    /// Adds `nonterminal ::= body`, where `body` is one declared terminal or
    /// two nonterminals that already have productions of their own.
    ///
    /// Adding a production that is already present is accepted and changes
    /// nothing.
    pub fn add_production(&mut self, nonterminal: char, body: &str) -> Result<()> {
        let head = self
            .declared_nonterminal(nonterminal)
            .ok_or(GrammarError::UndeclaredNonterminalInProduction(nonterminal))?;
        let body = self.check_body(body)?;

        self.productions.entry(head).or_default().insert(body);
        Ok(())
    }

    fn check_body(&self, body: &str) -> Result<Body> {
        let symbols = body.chars().collect_vec();

        match symbols[..] {
            [c] => {
                if !Terminal::is_terminal_char(c) {
                    return Err(GrammarError::MalformedProduction);
                }
                let terminal = Terminal::try_from(c)?;
                if !self.terminals.contains(&terminal) {
                    return Err(GrammarError::UndefinedProductionSymbol(c));
                }
                Ok(Body::Unit(terminal))
            }
            [l, r] => {
                if !Nonterminal::is_nonterminal_char(l) || !Nonterminal::is_nonterminal_char(r) {
                    return Err(GrammarError::MalformedProduction);
                }
                let left = self.produced_nonterminal(l)?;
                let right = self.produced_nonterminal(r)?;
                Ok(Body::Binary(left, right))
            }
            _ => Err(GrammarError::MalformedProduction),
        }
    }

    // A nonterminal may only appear in a binary body once it has a rule set
    fn produced_nonterminal(&self, symbol: char) -> Result<Nonterminal> {
        Nonterminal::try_from(symbol)
            .ok()
            .filter(|n| self.productions.contains_key(n))
            .ok_or(GrammarError::UndefinedProductionSymbol(symbol))
    }

    fn declared_nonterminal(&self, symbol: char) -> Option<Nonterminal> {
        Nonterminal::try_from(symbol)
            .ok()
            .filter(|n| self.nonterminals.contains(n))
    }

    /// Renders the rules of one nonterminal as `A::=BC|a`, or an empty
    /// string if it has none.
    pub fn get_productions(&self, nonterminal: char) -> String {
        let rules = Nonterminal::try_from(nonterminal)
            .ok()
            .and_then(|n| self.productions.get(&n).map(|rules| (n, rules)));

        match rules {
            Some((head, rules)) if !rules.is_empty() => {
                format!("{}::={}", head, rules.iter().sorted().join("|"))
            }
            _ => String::new(),
        }
    }

    // One line per nonterminal with rules, in symbol order
    pub fn get_grammar(&self) -> String {
        self.productions
            .keys()
            .sorted()
            .map(|head| self.get_productions(head.as_char()))
            .filter(|line| !line.is_empty())
            .join("\n")
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn axiom(&self) -> Option<Nonterminal> {
        self.axiom
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = Nonterminal> + '_ {
        self.nonterminals.iter().copied().sorted()
    }

    pub fn terminals(&self) -> impl Iterator<Item = Terminal> + '_ {
        self.terminals.iter().copied().sorted()
    }

    pub fn is_terminal(&self, terminal: Terminal) -> bool {
        self.terminals.contains(&terminal)
    }

    pub fn rule_set(&self, nonterminal: Nonterminal) -> Option<&RuleSet> {
        self.productions.get(&nonterminal)
    }

    // Every production as a (head, body) pair
    pub fn rules(&self) -> impl Iterator<Item = (Nonterminal, Body)> + '_ {
        self.productions
            .iter()
            .flat_map(|(head, rules)| rules.iter().map(move |body| (*head, *body)))
    }

    pub fn production_count(&self) -> usize {
        self.productions.values().map(HashSet::len).sum()
    }

    // True when there is nothing to derive from
    pub fn is_empty(&self) -> bool {
        self.nonterminals.is_empty() || self.production_count() == 0
    }
}
