use itertools::{Itertools, PeekingNext};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Word(String),
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '|' | ';')
}

pub fn lex_word(line: &mut impl PeekingNext<Item = char>) -> Token {
    Token::Word(line.peeking_take_while(|&c| is_word_char(c)).collect())
}

// Everything after a `;` is a comment
pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == ';' {
            break;
        } else if c == '=' {
            line_chars.next();
            tokens.push(Token::Equals);
        } else if c == '|' {
            line_chars.next();
            tokens.push(Token::Or);
        } else if !c.is_whitespace() {
            tokens.push(lex_word(&mut line_chars));
        } else {
            line_chars.next();
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn lex_normal_word() {
        let lines = vec![
            "AB | a",
            "nonterminals= S",
            "b|c",
            "S",
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (word("AB"), " | a"),
            (word("nonterminals"), "= S"),
            (word("b"), "|c"),
            (word("S"), ""),
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_word(&mut chars), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = AB | a",
            "terminals = a b c",
            "S=AB|BA",
        ];
        let answers = vec![
            vec![word("S"), Token::Equals, word("AB"), Token::Or, word("a")],
            vec![word("terminals"), Token::Equals, word("a"), word("b"), word("c")],
            vec![word("S"), Token::Equals, word("AB"), Token::Or, word("BA")],
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_comments_and_blanks() {
        assert_eq!(lex_line("; a whole comment line"), vec![]);
        assert_eq!(lex_line("   \t "), vec![]);
        assert_eq!(lex_line("A = a ; trailing remark"), vec![word("A"), Token::Equals, word("a")]);
    }
}
