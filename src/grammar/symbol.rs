use std::fmt::Display;

use super::GrammarError;

// A symbol from the lowercase alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(char);

// A symbol from the uppercase alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nonterminal(char);

impl Terminal {
    pub fn is_terminal_char(c: char) -> bool {
        c.is_lowercase()
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Nonterminal {
    pub fn is_nonterminal_char(c: char) -> bool {
        c.is_uppercase()
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Terminal {
    type Error = GrammarError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if Terminal::is_terminal_char(c) {
            Ok(Terminal(c))
        } else {
            Err(GrammarError::InvalidTerminalSymbol(c))
        }
    }
}

impl TryFrom<char> for Nonterminal {
    type Error = GrammarError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if Nonterminal::is_nonterminal_char(c) {
            Ok(Nonterminal(c))
        } else {
            Err(GrammarError::InvalidNonterminalSymbol(c))
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Nonterminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The base unit in a grammar rule, classified by its alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    Nonterminal(Nonterminal),
}

impl Symbol {
    // Returns None for characters that belong to neither alphabet
    pub fn classify(c: char) -> Option<Symbol> {
        if Terminal::is_terminal_char(c) {
            Some(Symbol::Terminal(Terminal(c)))
        } else if Nonterminal::is_nonterminal_char(c) {
            Some(Symbol::Nonterminal(Nonterminal(c)))
        } else {
            None
        }
    }
}

/// The right-hand side of a production in Chomsky Normal Form.
///
/// The variant order makes binary bodies sort before unit bodies, which
/// matches the character order of the rendered text for ASCII grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Body {
    Binary(Nonterminal, Nonterminal),
    Unit(Terminal),
}

impl Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Binary(left, right) => write!(f, "{}{}", left, right),
            Body::Unit(terminal) => write!(f, "{}", terminal),
        }
    }
}
