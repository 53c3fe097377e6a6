use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String)
}

fn ends_nonterminal(c: char) -> bool {
    c.is_whitespace() || matches!(c, '=' | '|' | '"' | ';')
}

pub fn lex_terminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let token_text = line.peeking_take_while(|&c| c != '"').collect();

    // Check if there is a close quote and consume it if there is
    if line.next() != Some('"') {
        return Err(CompileErrorType::UnmatchedQuote);
    }

    Ok(Token::Terminal(token_text))
}

pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Token {
    Token::Nonterminal(line.peeking_take_while(|&c| !ends_nonterminal(c)).collect())
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        match c {
            // Everything after a semicolon is a comment
            ';' => break,
            '=' => {
                line_chars.next();
                tokens.push(Token::Equals);
            }
            '|' => {
                line_chars.next();
                tokens.push(Token::Or);
            }
            '"' => tokens.push(lex_terminal(&mut line_chars)?),
            c if c.is_whitespace() => {
                line_chars.next();
            }
            _ => tokens.push(lex_nonterminal(&mut line_chars)),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"a\" S \"b\"",
            "\"b\"",
            "\"(\"\")\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("a".to_string()), " S \"b\""),
            (Token::Terminal("b".to_string()), ""),
            (Token::Terminal("(".to_string()), "\")\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        for line in ["\"a", "\"a S b"] {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_nonterminal_stops_at_operators() {
        let lines = vec![
            "expr term",
            "expr=term",
            "expr|\"a\""
        ];
        let answers = vec![
            " term",
            "=term",
            "|\"a\""
        ];

        for (line, answer_rest) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars), Token::Nonterminal("expr".to_string()));
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = \"a\" S \"b\" | \"a\" \"b\"",
            "opt=\"x\"|\"\" ; trailing comment"
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Terminal("a".to_string()),
                Token::Nonterminal("S".to_string()),
                Token::Terminal("b".to_string()),
                Token::Or,
                Token::Terminal("a".to_string()),
                Token::Terminal("b".to_string())
            ],
            vec![
                Token::Nonterminal("opt".to_string()),
                Token::Equals,
                Token::Terminal("x".to_string()),
                Token::Or,
                Token::Terminal("".to_string())
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }

    #[test]
    fn lex_quoted_operators_are_terminals() {
        assert_eq!(lex_line("\"|\" \"=\" \";\"").unwrap(), vec![
            Token::Terminal("|".to_string()),
            Token::Terminal("=".to_string()),
            Token::Terminal(";".to_string())
        ]);
    }
}
