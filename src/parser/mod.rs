/*
    This module loads grammar description files
*/

mod lexer;
mod verifier;

use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use itertools::Itertools;
use log::{debug, info};
use thiserror::Error;

use crate::error_handling::*;
use crate::grammar::{Grammar, GrammarError};
use lexer::*;
use verifier::verify_lines;

#[derive(Debug, Error)]
pub enum CompileErrorType {
    // A line which should contain a rule or declaration does not
    #[error("Expected `=` after `{0}`")]
    MissingEquals(String),
    // A line has multiple equals signs
    #[error("Unexpected `=` encountered")]
    UnexpectedEquals,
    // An alternative separator outside of a production
    #[error("Unexpected `|` encountered")]
    UnexpectedOr,
    // The line starts with something other than a word
    #[error("Expected a nonterminal or a declaration at the start of the line")]
    MissingHead,
    #[error("`{0}` is neither a declaration nor a single nonterminal")]
    UnknownDirective(String),
    // Symbols are single characters
    #[error("`{0}` is not a single symbol")]
    SymbolTooLong(String),
    #[error("Declaration lists no symbols")]
    EmptyDeclaration,
    #[error("Expected exactly one start symbol, found {0}")]
    StartArity(usize),
    // Nothing between two `|`, or after `=`
    #[error("Empty production body")]
    EmptyAlternative,
    // Bodies are written without spaces, `AB` and not `A B`
    #[error("Production body `{0}` is split by whitespace")]
    SplitBody(String),
    #[error("Start symbol is declared more than once")]
    DuplicateStart,
    // A blank line got too deep into the parser
    // This is a problem with the loader, not the grammar
    #[error("Blank line encountered in line parser (this is a problem with the loader, not the grammar)")]
    UnexpectedBlankLine,
    #[error("{0}")]
    Grammar(GrammarError),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::Grammar(a), CompileErrorType::Grammar(b)) => a == b,
            (CompileErrorType::MissingEquals(a), CompileErrorType::MissingEquals(b))
            | (CompileErrorType::UnknownDirective(a), CompileErrorType::UnknownDirective(b))
            | (CompileErrorType::SymbolTooLong(a), CompileErrorType::SymbolTooLong(b))
            | (CompileErrorType::SplitBody(a), CompileErrorType::SplitBody(b)) => a == b,
            (CompileErrorType::StartArity(a), CompileErrorType::StartArity(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError::at(Location::whole_file(file), CompileErrorType::FileError(error))
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

// What a single line of a grammar file asks for
#[derive(PartialEq, Debug)]
enum Statement {
    Nonterminals(Vec<char>),
    Terminals(Vec<char>),
    Start(Vec<char>),
    Rule { head: char, bodies: Vec<String> },
}

#[derive(PartialEq, Debug)]
struct Line {
    statement: Statement,
    location: Location,
}

fn single_symbol(text: &str) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CompileErrorType::SymbolTooLong(text.to_string())),
    }
}

fn parse_symbols(tokens: &[Token]) -> Result<Vec<char>> {
    tokens.iter().map(|t| match t {
        Token::Equals => Err(CompileErrorType::UnexpectedEquals),
        Token::Or => Err(CompileErrorType::UnexpectedOr),
        Token::Word(w) => single_symbol(w),
    }).collect()
}

fn parse_alternative(tokens: &[Token]) -> Result<String> {
    match tokens {
        [] => Err(CompileErrorType::EmptyAlternative),
        [Token::Word(w)] => Ok(w.clone()),
        _ if tokens.contains(&Token::Equals) => Err(CompileErrorType::UnexpectedEquals),
        _ => Err(CompileErrorType::SplitBody(tokens.iter().filter_map(|t| match t {
            Token::Word(w) => Some(w.as_str()),
            _ => None,
        }).join(" "))),
    }
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<String>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token]) -> Result<Statement> {
    let head = match tokens.first() {
        Some(Token::Word(s)) => Ok(s.as_str()),
        Some(_) => Err(CompileErrorType::MissingHead),
        None => Err(CompileErrorType::UnexpectedBlankLine),
    }?;

    if tokens.get(1) != Some(&Token::Equals) {
        return Err(CompileErrorType::MissingEquals(head.to_string()));
    }
    let rest = &tokens[2..];

    match head {
        "nonterminals" => Ok(Statement::Nonterminals(parse_symbols(rest)?)),
        "terminals" => Ok(Statement::Terminals(parse_symbols(rest)?)),
        "start" => Ok(Statement::Start(parse_symbols(rest)?)),
        _ => {
            let head = single_symbol(head)
                .map_err(|_| CompileErrorType::UnknownDirective(head.to_string()))?;
            Ok(Statement::Rule { head, bodies: parse_rewrite(rest)? })
        }
    }
}

// Lines with nothing but whitespace and comments give None
fn parse_lex_line(line: &str, location: Location) -> LineResult<Option<Line>> {
    let tokens = lexer::lex_line(line);
    if tokens.is_empty() {
        return Ok(None);
    }

    parse_line(&tokens)
        .map(|statement| Some(Line { statement, location: location.clone() }))
        .map_err(|error| CompileError::at(location, error))
}

fn apply_statement(grammar: &mut Grammar, statement: &Statement) -> Vec<GrammarError> {
    match statement {
        Statement::Nonterminals(symbols) => symbols
            .iter()
            .filter_map(|&c| grammar.add_nonterminal(c).err())
            .collect(),
        Statement::Terminals(symbols) => symbols
            .iter()
            .filter_map(|&c| grammar.add_terminal(c).err())
            .collect(),
        Statement::Start(symbols) => symbols
            .iter()
            .filter_map(|&c| grammar.set_start_symbol(c).err())
            .collect(),
        Statement::Rule { head, bodies } => bodies
            .iter()
            .filter_map(|body| grammar.add_production(*head, body).err())
            .collect(),
    }
}

// Applies the lines in file order, collecting every rejected piece
fn grammar_from_lines(lines: &[Line]) -> FileResult<Grammar> {
    verify_lines(lines)?;

    let mut grammar = Grammar::new();
    let errors = lines
        .iter()
        .flat_map(|line| {
            apply_statement(&mut grammar, &line.statement)
                .into_iter()
                .map(|e| CompileError::at(line.location.clone(), CompileErrorType::Grammar(e)))
                .collect_vec()
        })
        .collect_vec();

    if !errors.is_empty() {
        return Err(errors);
    }

    debug!(
        "Built grammar with nonterminals {{{}}}, terminals {{{}}} and {} productions",
        grammar.nonterminals().join(","),
        grammar.terminals().join(","),
        grammar.production_count()
    );
    Ok(grammar)
}

fn parse_numbered_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Grammar> {
    let parsed_lines = lines.filter_map(|(num, line_res)| {
        line_res
            .and_then(|line| parse_lex_line(&line, Location::line(path, num)))
            .transpose()
    });

    let (lines, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }
    debug!("Parsed {} statements from {}", lines.len(), path.display());

    grammar_from_lines(&lines)
}

/// Builds a grammar from the text of a grammar file. `path` is only used to
/// label errors.
pub fn parse_str(text: &str, path: &Path) -> FileResult<Grammar> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(num, line)| (num + 1, Ok(line.to_string())));

    parse_numbered_lines(lines, path)
}

pub fn parse_file(path: &Path) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .map(|(num, line)| (num + 1, line));

    let grammar = parse_numbered_lines(lines, path)?;
    info!("Loaded grammar from {}", path.display());
    Ok(grammar)
}
