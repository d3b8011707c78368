use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GrammarError {
    #[error("`{0}` is not an uppercase letter and cannot be a nonterminal")]
    InvalidNonterminalSymbol(char),
    #[error("`{0}` is already declared as a nonterminal")]
    DuplicateNonterminal(char),
    #[error("`{0}` is not a lowercase letter and cannot be a terminal")]
    InvalidTerminalSymbol(char),
    #[error("`{0}` is already declared as a terminal")]
    DuplicateTerminal(char),
    #[error("`{0}` cannot be the start symbol because it is not a declared nonterminal")]
    UndeclaredStartSymbol(char),
    #[error("`{0}` has a production but is not a declared nonterminal")]
    UndeclaredNonterminalInProduction(char),
    #[error("Production body is not in Chomsky Normal Form")]
    MalformedProduction,
    #[error("Production body uses `{0}`, which is undeclared or has no productions yet")]
    UndefinedProductionSymbol(char),
    #[error("Word contains the nonterminal `{0}`")]
    WordContainsNonterminal(char),
    #[error("Word contains `{0}`, which is not a terminal of this grammar")]
    WordContainsUndeclaredTerminal(char),
    #[error("Grammar has no start symbol")]
    MissingStartSymbol,
    #[error("Grammar has no productions")]
    EmptyGrammar,
}
