//! Lexer for GMakefile sources.
//!
//! Converts source text into a stream of [`Token`]s. Scanning runs as a small
//! state machine over three modes: top level, inside a dependency list
//! `( ... )` and inside a command block `{ ... }`. Each mode handler consumes
//! characters until it either switches mode or finishes the pass.

use super::charset::{self, CharClass};
use super::error::{LexError, LexErrorKind};
use super::token::{Token, TokenKind};

/// The lexical mode the scanner is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    TopLevel,
    Block(Block),
}

/// A delimited region scanned as command parts separated by a single
/// character and closed by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    separator: char,
    separator_kind: TokenKind,
    close: char,
    close_kind: TokenKind,
    parts: CharClass,
    unclosed: LexErrorKind,
}

const DEPENDENCIES: Block = Block {
    separator: ',',
    separator_kind: TokenKind::Comma,
    close: ')',
    close_kind: TokenKind::RightParen,
    parts: charset::PART.without(','),
    unclosed: LexErrorKind::UnclosedDependencyList,
};

const COMMANDS: Block = Block {
    separator: ';',
    separator_kind: TokenKind::Semicolon,
    close: '}',
    close_kind: TokenKind::RightBrace,
    parts: charset::PART,
    unclosed: LexErrorKind::UnclosedCommandBlock,
};

/// Outcome of running one mode handler.
enum Step {
    Switch(Mode),
    Finished,
}

pub struct Lexer {
    chars: Vec<char>,
    start: usize,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    /// Scan the whole source.
    ///
    /// On success the returned tokens end with exactly one
    /// [`TokenKind::EndOfInput`]. On failure nothing scanned so far is
    /// returned.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut mode = Mode::TopLevel;
        loop {
            let step = match mode {
                Mode::TopLevel => self.lex_top_level()?,
                Mode::Block(block) => self.lex_block(block)?,
            };
            match step {
                Step::Switch(next) => mode = next,
                Step::Finished => return Ok(self.tokens),
            }
        }
    }

    fn lex_top_level(&mut self) -> Result<Step, LexError> {
        while let Some(ch) = self.next() {
            if charset::is_blank(ch) {
                self.ignore();
            } else if ch == '\n' {
                self.line += 1;
                self.ignore();
            } else if charset::ALPHA.contains(ch) {
                self.accept_run(charset::ALPHA);
                self.emit(TokenKind::DirectiveName);
            } else if ch == '{' {
                self.emit(TokenKind::LeftBrace);
                return Ok(Step::Switch(Mode::Block(COMMANDS)));
            } else if ch == '(' {
                self.emit(TokenKind::LeftParen);
                return Ok(Step::Switch(Mode::Block(DEPENDENCIES)));
            } else {
                return Err(LexError::illegal(ch, self.line));
            }
        }

        self.tokens.push(Token::new(TokenKind::EndOfInput, "", self.line));
        Ok(Step::Finished)
    }

    fn lex_block(&mut self, block: Block) -> Result<Step, LexError> {
        while let Some(ch) = self.next() {
            if ch == block.close {
                self.emit(block.close_kind);
                return Ok(Step::Switch(Mode::TopLevel));
            } else if charset::is_blank(ch) {
                self.ignore();
            } else if ch == '\n' {
                self.line += 1;
                self.ignore();
            } else if ch == block.separator {
                self.emit(block.separator_kind);
            } else if block.parts.contains(ch) {
                self.accept_run(block.parts);
                self.emit(TokenKind::CommandPart);
            } else {
                return Err(LexError::illegal(ch, self.line));
            }
        }

        Err(LexError::unclosed(block.unclosed, self.line))
    }

    /// Consume and return the next character, or `None` at end of input.
    fn next(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consume the longest run of characters from `class`.
    fn accept_run(&mut self, class: CharClass) {
        while self.peek().is_some_and(|ch| class.contains(ch)) {
            self.pos += 1;
        }
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) {
        let lexeme: String = self.chars[self.start..self.pos].iter().collect();
        self.tokens.push(Token::new(kind, lexeme, self.line));
        self.start = self.pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_simple_directive() {
        let tokens = Lexer::new("all { echo hello; }").tokenize().unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::DirectiveName,
                TokenKind::LeftBrace,
                TokenKind::CommandPart,
                TokenKind::CommandPart,
                TokenKind::Semicolon,
                TokenKind::RightBrace,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[0].lexeme, "all");
        assert_eq!(tokens[1].lexeme, "{");
        assert_eq!(tokens[2].lexeme, "echo");
        assert_eq!(tokens[3].lexeme, "hello");
        assert_eq!(tokens[4].lexeme, ";");
        assert_eq!(tokens[5].lexeme, "}");
        assert_eq!(tokens[6].lexeme, "");
    }

    #[test]
    fn lex_empty_input() {
        let tokens = Lexer::new("").tokenize().unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndOfInput);
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn lex_maximal_munch() {
        let tokens = Lexer::new("x { abc123 }").tokenize().unwrap();
        assert_eq!(tokens[2].kind, TokenKind::CommandPart);
        assert_eq!(tokens[2].lexeme, "abc123");
        assert_eq!(tokens[3].kind, TokenKind::RightBrace);
    }

    #[test]
    fn lex_single_character_part() {
        let tokens = Lexer::new("x { a; }").tokenize().unwrap();
        assert_eq!(tokens[2].lexeme, "a");
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    }

    #[test]
    fn lex_directive_name_stops_at_non_letter() {
        let tokens = Lexer::new("build{}").tokenize().unwrap();
        assert_eq!(tokens[0].lexeme, "build");
        assert_eq!(tokens[1].kind, TokenKind::LeftBrace);
        assert_eq!(tokens[2].kind, TokenKind::RightBrace);
    }

    #[test]
    fn lex_punctuation_in_parts() {
        let tokens = Lexer::new(r#"x { gcc -o out/main.o "a,b" x>y; }"#)
            .tokenize()
            .unwrap();
        let parts: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::CommandPart)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(parts, vec!["gcc", "-o", "out/main.o", r#""a,b""#, "x>y"]);
    }

    #[test]
    fn lex_semicolon_splits_parts() {
        let tokens = Lexer::new("x { a;b; }").tokenize().unwrap();
        assert_eq!(
            kinds(&tokens[2..6]),
            vec![
                TokenKind::CommandPart,
                TokenKind::Semicolon,
                TokenKind::CommandPart,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn lex_dependency_list() {
        let tokens = Lexer::new("all(dep1,dep2) { echo hi; }").tokenize().unwrap();
        assert_eq!(
            kinds(&tokens[..6]),
            vec![
                TokenKind::DirectiveName,
                TokenKind::LeftParen,
                TokenKind::CommandPart,
                TokenKind::Comma,
                TokenKind::CommandPart,
                TokenKind::RightParen,
            ]
        );
        assert_eq!(tokens[2].lexeme, "dep1");
        assert_eq!(tokens[4].lexeme, "dep2");
        assert_eq!(tokens[6].kind, TokenKind::LeftBrace);
    }

    #[test]
    fn lex_empty_dependency_list() {
        let tokens = Lexer::new("()").tokenize().unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::EndOfInput
            ]
        );
    }

    #[test]
    fn lex_line_tracking() {
        let src = "a {\n  x;\n}\n\nb (\nd\n)\n";
        let tokens = Lexer::new(src).tokenize().unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        // a { x ; } b ( d ) EOF
        assert_eq!(lines, vec![1, 1, 2, 2, 3, 5, 5, 6, 7, 8]);
    }

    #[test]
    fn lex_crlf_counts_one_line() {
        let tokens = Lexer::new("a {\r\n x;\r\n}").tokenize().unwrap();
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[4].line, 3);
    }

    #[test]
    fn lex_illegal_character_at_top_level() {
        let err = Lexer::new("all { a; }\n1").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
        assert_eq!(err.found, Some('1'));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn lex_illegal_character_in_block() {
        let err = Lexer::new("all {\n echo (x); }").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
        assert_eq!(err.found, Some('('));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn lex_non_ascii_is_illegal() {
        let err = Lexer::new("all { café; }").tokenize().unwrap_err();
        assert_eq!(err.found, Some('é'));
    }

    #[test]
    fn lex_unclosed_command_block() {
        let err = Lexer::new("all { echo hi;").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnclosedCommandBlock);
        assert_eq!(err.line, 1);
        assert_eq!(err.found, None);
    }

    #[test]
    fn lex_unclosed_block_reports_last_line() {
        let err = Lexer::new("all {\n echo hi;\n").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnclosedCommandBlock);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn lex_unclosed_dependency_list() {
        let err = Lexer::new("all(dep").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnclosedDependencyList);
    }

    #[test]
    fn lex_brace_inside_dependency_list_is_illegal() {
        let err = Lexer::new("all(a{").tokenize().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
        assert_eq!(err.found, Some('{'));
    }
}
