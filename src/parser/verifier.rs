use super::CompileErrorType::{DuplicateStart, EmptyDeclaration, StartArity};
use super::{CompileError, CompileErrors, FileResult, Line, Statement};

fn get_empty_declarations(lines: &[Line]) -> CompileErrors {
    lines.iter()
        .filter(|line| match &line.statement {
            Statement::Nonterminals(symbols) | Statement::Terminals(symbols) => symbols.is_empty(),
            _ => false,
        })
        .map(|line| CompileError::at(line.location.clone(), EmptyDeclaration))
        .collect()
}

fn get_start_errors(lines: &[Line]) -> CompileErrors {
    // Every start line must name one symbol, and only the first start line
    // is allowed at all
    lines.iter()
        .filter_map(|line| match &line.statement {
            Statement::Start(symbols) => Some((line, symbols.len())),
            _ => None,
        })
        .enumerate()
        .filter_map(|(nth, (line, arity))| {
            let error = if nth > 0 {
                DuplicateStart
            } else if arity != 1 {
                StartArity(arity)
            } else {
                return None;
            };
            Some(CompileError::at(line.location.clone(), error))
        })
        .collect()
}

pub fn verify_lines(lines: &[Line]) -> FileResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_empty_declarations(lines));
    errors.extend(get_start_errors(lines));

    if errors.is_empty() {
        Ok(())
    } else {
        errors.sort_by_key(|e| e.location.line);
        Err(errors)
    }
}
