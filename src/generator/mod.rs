/*
    This module generates random words of a grammar
*/

use std::collections::HashMap;

use itertools::Itertools;
use rand::prelude::*;
use thiserror::Error;

use crate::grammar::*;

// Depth after which expansion heads for the shortest word
pub const DEFAULT_MAX_DEPTH: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("Grammar has no start symbol to generate from")]
    MissingStartSymbol,
    #[error("No productions for nonterminal `{0}`")]
    NoProductions(char),
}

pub type GenResult = std::result::Result<String, GenerateError>;

// Length of the shortest word each nonterminal derives. Nonterminals that
// derive nothing are missing from the map.
fn shortest_yields(grammar: &Grammar) -> HashMap<Nonterminal, usize> {
    let mut yields = HashMap::new();

    loop {
        let mut changed = false;
        for (head, body) in grammar.rules() {
            let Some(length) = body_yield(&yields, body) else {
                continue;
            };
            if yields.get(&head).map_or(true, |&known| length < known) {
                yields.insert(head, length);
                changed = true;
            }
        }
        if !changed {
            return yields;
        }
    }
}

fn body_yield(yields: &HashMap<Nonterminal, usize>, body: Body) -> Option<usize> {
    match body {
        Body::Unit(_) => Some(1),
        Body::Binary(left, right) => Some(yields.get(&left)? + yields.get(&right)?),
    }
}

struct Generator<'a> {
    grammar: &'a Grammar,
    yields: HashMap<Nonterminal, usize>,
    max_depth: usize,
}

impl Generator<'_> {
    fn generate_nonterminal<R: Rng + ?Sized>(&self, nonterminal: Nonterminal, depth: usize, rng: &mut R, word: &mut String) -> std::result::Result<(), GenerateError> {
        let candidates = self
            .grammar
            .rule_set(nonterminal)
            .into_iter()
            .flatten()
            .filter_map(|&body| body_yield(&self.yields, body).map(|length| (length, body)))
            .sorted()
            .collect_vec();

        // Only the shortest bodies once the word has grown deep enough, so
        // every step shrinks the remaining yield
        let shortest = candidates.first().map(|&(length, _)| length);
        let candidates = match shortest {
            Some(shortest) if depth >= self.max_depth => candidates
                .into_iter()
                .take_while(|&(length, _)| length == shortest)
                .collect_vec(),
            _ => candidates,
        };

        let &(_, body) = candidates
            .choose(rng)
            .ok_or(GenerateError::NoProductions(nonterminal.as_char()))?;

        match body {
            Body::Unit(terminal) => word.push(terminal.as_char()),
            Body::Binary(left, right) => {
                self.generate_nonterminal(left, depth + 1, rng, word)?;
                self.generate_nonterminal(right, depth + 1, rng, word)?;
            }
        }
        Ok(())
    }
}

// Generates a word in the given grammar starting with the axiom
pub fn generate<R: Rng + ?Sized>(grammar: &Grammar, rng: &mut R, max_depth: usize) -> GenResult {
    let axiom = grammar.axiom().ok_or(GenerateError::MissingStartSymbol)?;
    generate_from(grammar, axiom, rng, max_depth)
}

// Generates a word in the given grammar starting with the given symbol
pub fn generate_from<R: Rng + ?Sized>(grammar: &Grammar, start: Nonterminal, rng: &mut R, max_depth: usize) -> GenResult {
    let generator = Generator {
        grammar,
        yields: shortest_yields(grammar),
        max_depth,
    };

    let mut word = String::new();
    generator.generate_nonterminal(start, 0, rng, &mut word)?;
    Ok(word)
}
