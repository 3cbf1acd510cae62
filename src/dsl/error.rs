//! Error types for the GMakefile compiler.

use thiserror::Error;

use super::token::TokenKind;

/// Why a lexing pass failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    IllegalCharacter,
    UnclosedDependencyList,
    UnclosedCommandBlock,
}

/// A fatal lexical error. The pass that raised it produced no tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_lex(.kind, .found))]
pub struct LexError {
    pub line: usize,
    /// The offending character, or `None` when input ended early.
    pub found: Option<char>,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn illegal(ch: char, line: usize) -> Self {
        Self {
            line,
            found: Some(ch),
            kind: LexErrorKind::IllegalCharacter,
        }
    }

    pub fn unclosed(kind: LexErrorKind, line: usize) -> Self {
        Self {
            line,
            found: None,
            kind,
        }
    }
}

fn describe_lex(kind: &LexErrorKind, found: &Option<char>) -> String {
    match (kind, found) {
        (LexErrorKind::IllegalCharacter, Some(ch)) => format!("illegal character '{ch}'"),
        (LexErrorKind::IllegalCharacter, None) => "illegal character".to_string(),
        (LexErrorKind::UnclosedDependencyList, _) => "unclosed dependency list".to_string(),
        (LexErrorKind::UnclosedCommandBlock, _) => "unclosed command block".to_string(),
    }
}

/// A fatal parse error. Directives closed before it remain valid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {found}, expecting {}", join_kinds(.expected))]
pub struct ParseError {
    pub line: usize,
    pub found: TokenKind,
    pub expected: &'static [TokenKind],
}

fn join_kinds(kinds: &[TokenKind]) -> String {
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Either stage of compilation failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CompileError {
    pub fn line(&self) -> usize {
        match self {
            CompileError::Lex(e) => e.line,
            CompileError::Parse(e) => e.line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_character_message() {
        let err = LexError::illegal('{', 3);
        assert_eq!(err.to_string(), "illegal character '{'");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn unclosed_messages() {
        let deps = LexError::unclosed(LexErrorKind::UnclosedDependencyList, 1);
        let block = LexError::unclosed(LexErrorKind::UnclosedCommandBlock, 2);
        assert_eq!(deps.to_string(), "unclosed dependency list");
        assert_eq!(block.to_string(), "unclosed command block");
        assert_eq!(block.found, None);
    }

    #[test]
    fn parse_error_lists_expected_kinds() {
        let err = ParseError {
            line: 4,
            found: TokenKind::Comma,
            expected: &[TokenKind::CommandPart, TokenKind::Semicolon],
        };
        assert_eq!(
            err.to_string(),
            "unexpected ',', expecting command-part or semicolon"
        );
    }

    #[test]
    fn compile_error_line() {
        let err: CompileError = LexError::illegal('@', 7).into();
        assert_eq!(err.line(), 7);
        assert_eq!(err.to_string(), "illegal character '@'");
    }
}
