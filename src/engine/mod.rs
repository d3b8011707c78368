/*
    This module decides membership with the Cocke-Younger-Kasami algorithm
*/

mod table;

use std::collections::HashMap;

use crate::grammar::{Body, Grammar, GrammarError, Nonterminal, Result, Symbol, Terminal};

pub use table::{Cell, Table};

// Productions keyed by their bodies, so each cell only looks up what can
// actually combine
struct ProductionIndex {
    unit: HashMap<Terminal, Vec<Nonterminal>>,
    binary: HashMap<(Nonterminal, Nonterminal), Vec<Nonterminal>>,
}

impl ProductionIndex {
    fn new(grammar: &Grammar) -> Self {
        let mut unit = HashMap::<Terminal, Vec<Nonterminal>>::new();
        let mut binary = HashMap::<(Nonterminal, Nonterminal), Vec<Nonterminal>>::new();

        for (head, body) in grammar.rules() {
            match body {
                Body::Unit(terminal) => unit.entry(terminal).or_default().push(head),
                Body::Binary(left, right) => binary.entry((left, right)).or_default().push(head),
            }
        }

        ProductionIndex { unit, binary }
    }

    fn producers_of_terminal(&self, terminal: Terminal) -> &[Nonterminal] {
        self.unit.get(&terminal).map(Vec::as_slice).unwrap_or(&[])
    }

    fn producers_of_pair(&self, left: Nonterminal, right: Nonterminal) -> &[Nonterminal] {
        self.binary.get(&(left, right)).map(Vec::as_slice).unwrap_or(&[])
    }
}

// Turns the query into terminals of the grammar, failing on the first
// character that is not one
fn parse_word(grammar: &Grammar, word: &str) -> Result<Vec<Terminal>> {
    word.chars()
        .map(|c| match Symbol::classify(c) {
            Some(Symbol::Nonterminal(_)) => Err(GrammarError::WordContainsNonterminal(c)),
            Some(Symbol::Terminal(t)) if grammar.is_terminal(t) => Ok(t),
            _ => Err(GrammarError::WordContainsUndeclaredTerminal(c)),
        })
        .collect()
}

fn check_grammar(grammar: &Grammar) -> Result<Nonterminal> {
    let axiom = grammar.axiom().ok_or(GrammarError::MissingStartSymbol)?;
    if grammar.is_empty() {
        return Err(GrammarError::EmptyGrammar);
    }
    Ok(axiom)
}

/// Validates `word` against `grammar` and fills in its derivation table.
///
/// Validation happens before any table work: the word must consist of
/// declared terminals, then the grammar must have an axiom, then it must
/// have at least one production.
pub fn build_table(grammar: &Grammar, word: &str) -> Result<Table> {
    let word = parse_word(grammar, word)?;
    check_grammar(grammar)?;

    let index = ProductionIndex::new(grammar);
    let n = word.len();
    let mut table = Table::new(n);

    for (i, terminal) in word.iter().enumerate() {
        table.cell_mut(i, i).extend(index.producers_of_terminal(*terminal));
    }

    for span in 2..=n {
        for i in 0..=(n - span) {
            let j = i + span - 1;
            let mut found = Cell::new();

            for k in i..j {
                let (Some(left), Some(right)) = (table.cell(i, k), table.cell(k + 1, j)) else {
                    continue;
                };
                for &b in left {
                    for &c in right {
                        found.extend(index.producers_of_pair(b, c));
                    }
                }
            }

            table.cell_mut(i, j).extend(found);
        }
    }

    Ok(table)
}

/// Builds the table for `word` and reports whether the axiom derives it.
///
/// An empty word is never derived since there are no epsilon productions.
pub fn membership(grammar: &Grammar, word: &str) -> Result<(bool, Table)> {
    let table = build_table(grammar, word)?;
    let derived = grammar.axiom().is_some_and(|axiom| table.derives(axiom));
    Ok((derived, table))
}

pub fn is_derived(grammar: &Grammar, word: &str) -> Result<bool> {
    membership(grammar, word).map(|(derived, _)| derived)
}

pub fn render_table(grammar: &Grammar, word: &str) -> Result<String> {
    Ok(build_table(grammar, word)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar_from(nonterminals: &str, terminals: &str, start: char, rules: &[(char, &str)]) -> Grammar {
        let mut grammar = Grammar::new();
        nonterminals.chars().for_each(|c| grammar.add_nonterminal(c).unwrap());
        terminals.chars().for_each(|c| grammar.add_terminal(c).unwrap());
        grammar.set_start_symbol(start).unwrap();
        for (head, body) in rules {
            grammar.add_production(*head, body).unwrap();
        }
        grammar
    }

    // S -> AB, A -> a, B -> b
    fn ab_grammar() -> Grammar {
        grammar_from("SAB", "ab", 'S', &[('A', "a"), ('B', "b"), ('S', "AB")])
    }

    // S -> AS | a, A -> a
    fn a_plus_grammar() -> Grammar {
        grammar_from("SA", "a", 'S', &[('A', "a"), ('S', "a"), ('S', "AS")])
    }

    // Balanced parentheses written as `l` and `r`:
    // S -> LR | LT | SS, T -> SR, L -> l, R -> r
    fn balanced_grammar() -> Grammar {
        grammar_from("SLRT", "lr", 'S', &[
            ('L', "l"),
            ('R', "r"),
            ('S', "LR"),
            ('T', "SR"),
            ('S', "LT"),
            ('S', "SS"),
        ])
    }

    fn nt(c: char) -> Nonterminal {
        Nonterminal::try_from(c).unwrap()
    }

    fn cell_of(chars: &str) -> Cell {
        chars.chars().map(nt).collect()
    }

    #[test]
    fn derive_ab() {
        let grammar = ab_grammar();
        assert_eq!(is_derived(&grammar, "ab"), Ok(true));
        assert_eq!(is_derived(&grammar, "ba"), Ok(false));
        assert_eq!(is_derived(&grammar, "a"), Ok(false));
        assert_eq!(is_derived(&grammar, "abab"), Ok(false));
    }

    #[test]
    fn table_for_ab() {
        let table = build_table(&ab_grammar(), "ab").unwrap();
        assert_eq!(table.cell(0, 0), Some(&cell_of("A")));
        assert_eq!(table.cell(1, 1), Some(&cell_of("B")));
        assert_eq!(table.cell(0, 1), Some(&cell_of("S")));
        assert_eq!(table.cell(1, 0), None);
    }

    #[test]
    fn derive_repeated_a() {
        let grammar = a_plus_grammar();
        for len in 1..10 {
            assert_eq!(is_derived(&grammar, &"a".repeat(len)), Ok(true), "length {}", len);
        }
    }

    #[test]
    fn derive_balanced_parentheses() {
        let grammar = balanced_grammar();
        let accepted = ["lr", "llrr", "lrlr", "llrlrr", "lrllrr"];
        let rejected = ["l", "r", "rl", "lrr", "llr", "lrrl", "rllr"];

        for word in accepted {
            assert_eq!(is_derived(&grammar, word), Ok(true), "{}", word);
        }
        for word in rejected {
            assert_eq!(is_derived(&grammar, word), Ok(false), "{}", word);
        }
    }

    #[test]
    fn membership_matches_is_derived_and_render_table() {
        let grammar = balanced_grammar();
        for word in ["", "lr", "rl", "llrr", "lrr", "lrllrr"] {
            let (derived, table) = membership(&grammar, word).unwrap();
            assert_eq!(is_derived(&grammar, word), Ok(derived), "{}", word);
            assert_eq!(render_table(&grammar, word), Ok(table.to_string()), "{}", word);
            assert_eq!(derived, table.derives(nt('S')), "{}", word);
        }
        assert!(matches!(membership(&grammar, "lx"), Err(GrammarError::WordContainsUndeclaredTerminal('x'))));
    }

    #[test]
    fn empty_word_is_never_derived() {
        assert_eq!(is_derived(&ab_grammar(), ""), Ok(false));
        assert_eq!(is_derived(&a_plus_grammar(), ""), Ok(false));
        assert_eq!(render_table(&ab_grammar(), ""), Ok(String::new()));
    }

    #[test]
    fn registration_order_does_not_matter() {
        let forward = balanced_grammar();
        let backward = grammar_from("TRLS", "rl", 'S', &[
            ('R', "r"),
            ('L', "l"),
            ('S', "LR"),
            ('S', "SS"),
            ('T', "SR"),
            ('S', "LT"),
        ]);

        for word in ["lr", "rl", "llrr", "lrlr", "lrr", "llrlrr", "lllrrr", "lrllr"] {
            assert_eq!(is_derived(&forward, word), is_derived(&backward, word), "{}", word);
            assert_eq!(render_table(&forward, word), render_table(&backward, word), "{}", word);
        }
    }

    #[test]
    fn reject_words_with_foreign_symbols() {
        let grammar = ab_grammar();
        assert_eq!(is_derived(&grammar, "aB"), Err(GrammarError::WordContainsNonterminal('B')));
        assert_eq!(is_derived(&grammar, "aS"), Err(GrammarError::WordContainsNonterminal('S')));
        assert_eq!(is_derived(&grammar, "ac"), Err(GrammarError::WordContainsUndeclaredTerminal('c')));
        assert_eq!(is_derived(&grammar, "a b"), Err(GrammarError::WordContainsUndeclaredTerminal(' ')));
        assert_eq!(render_table(&grammar, "a1"), Err(GrammarError::WordContainsUndeclaredTerminal('1')));
    }

    #[test]
    fn missing_start_symbol() {
        let mut grammar = Grammar::new();
        for c in ['S', 'A', 'B'] {
            grammar.add_nonterminal(c).unwrap();
        }
        for c in ['a', 'b'] {
            grammar.add_terminal(c).unwrap();
        }
        grammar.add_production('A', "a").unwrap();
        grammar.add_production('B', "b").unwrap();
        grammar.add_production('S', "AB").unwrap();

        assert_eq!(is_derived(&grammar, "ab"), Err(GrammarError::MissingStartSymbol));
        assert_eq!(is_derived(&grammar, ""), Err(GrammarError::MissingStartSymbol));
        // The word is checked before the grammar
        assert_eq!(is_derived(&grammar, "Ab"), Err(GrammarError::WordContainsNonterminal('A')));
    }

    #[test]
    fn empty_grammar() {
        let mut grammar = Grammar::new();
        grammar.add_nonterminal('S').unwrap();
        grammar.add_terminal('a').unwrap();
        grammar.set_start_symbol('S').unwrap();

        assert_eq!(is_derived(&grammar, "a"), Err(GrammarError::EmptyGrammar));
        assert_eq!(render_table(&grammar, "a"), Err(GrammarError::EmptyGrammar));
        assert_eq!(is_derived(&Grammar::new(), "a"), Err(GrammarError::WordContainsUndeclaredTerminal('a')));
    }

    #[test]
    fn render_shows_axiom_in_corner() {
        let grammar = ab_grammar();
        assert_eq!(render_table(&grammar, "ab"), Ok("{A}\t{S}\n\t{B}\n".to_string()));
        assert_eq!(render_table(&grammar, "ba"), Ok("{B}\t{}\n\t{A}\n".to_string()));

        let grammar = a_plus_grammar();
        let rendered = render_table(&grammar, "aaa").unwrap();
        let corner = rendered.lines().next().unwrap().split('\t').last().unwrap();
        assert!(corner.contains('S'));
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn reset_grammar_behaves_like_new() {
        let mut reused = balanced_grammar();
        reused.reset();
        for c in ['S', 'A', 'B'] {
            reused.add_nonterminal(c).unwrap();
        }
        for c in ['a', 'b'] {
            reused.add_terminal(c).unwrap();
        }
        reused.set_start_symbol('S').unwrap();
        reused.add_production('A', "a").unwrap();
        reused.add_production('B', "b").unwrap();
        reused.add_production('S', "AB").unwrap();

        let fresh = ab_grammar();
        assert_eq!(reused, fresh);
        for word in ["ab", "ba", "a", "", "aabb"] {
            assert_eq!(is_derived(&reused, word), is_derived(&fresh, word));
            assert_eq!(render_table(&reused, word), render_table(&fresh, word));
        }
        assert_eq!(is_derived(&reused, "lr"), Err(GrammarError::WordContainsUndeclaredTerminal('l')));
    }
}
