//! Parser for GMakefile token streams.
//!
//! Consumes tokens with a cursor and builds the [`Program`]. The grammar has
//! two states: looking for the next directive, and collecting the commands
//! inside its braces. A parse error ends the pass but keeps every directive
//! that was already closed.

use super::ast::{Command, Directive, Program};
use super::error::ParseError;
use super::token::{Token, TokenKind};

const EXPECT_DIRECTIVE: &[TokenKind] = &[TokenKind::DirectiveName];
const EXPECT_COMMAND: &[TokenKind] = &[TokenKind::CommandPart, TokenKind::Semicolon];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekingDirective,
    CollectingCommands,
}

/// Result of a parse pass: the directives closed so far, plus the error that
/// stopped the pass if there was one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub program: Program,
    pub error: Option<ParseError>,
}

impl ParseOutcome {
    /// Treat any parse error as a failure, dropping the partial program.
    pub fn into_result(self) -> Result<Program, ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.program),
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    program: Program,
    current: Option<Directive>,
    command: Command,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            program: Program::default(),
            current: None,
            command: Command::default(),
        }
    }

    pub fn parse(mut self) -> ParseOutcome {
        let mut state = State::SeekingDirective;
        let error = loop {
            let step = match state {
                State::SeekingDirective => self.seek_directive(),
                State::CollectingCommands => self.collect_commands(),
            };
            match step {
                Ok(Some(next)) => state = next,
                Ok(None) => break None,
                Err(err) => break Some(err),
            }
        };

        ParseOutcome {
            program: self.program,
            error,
        }
    }

    fn seek_directive(&mut self) -> Result<Option<State>, ParseError> {
        loop {
            let Some(token) = self.advance() else {
                return Ok(None);
            };
            match token.kind {
                TokenKind::EndOfInput => return Ok(None),
                TokenKind::DirectiveName => {
                    self.current = Some(Directive::new(token.lexeme));
                    self.command = Command::default();
                }
                TokenKind::LeftBrace if self.current.is_some() => {
                    return Ok(Some(State::CollectingCommands));
                }
                found => return Err(unexpected(found, token.line, EXPECT_DIRECTIVE)),
            }
        }
    }

    fn collect_commands(&mut self) -> Result<Option<State>, ParseError> {
        loop {
            // A sequence cut short behaves like one ending here.
            let token = self
                .advance()
                .unwrap_or_else(|| Token::new(TokenKind::EndOfInput, "", self.last_line()));
            match token.kind {
                TokenKind::CommandPart => self.command.parts.push(token.lexeme),
                TokenKind::Semicolon => self.flush_command(),
                TokenKind::RightBrace => {
                    self.close_directive();
                    return Ok(Some(State::SeekingDirective));
                }
                found => return Err(unexpected(found, token.line, EXPECT_COMMAND)),
            }
        }
    }

    fn flush_command(&mut self) {
        let command = std::mem::take(&mut self.command);
        if let Some(directive) = self.current.as_mut() {
            directive.commands.push(command);
        }
    }

    /// Commit the open directive. Parts after its last `;` are dropped.
    fn close_directive(&mut self) {
        self.command = Command::default();
        if let Some(directive) = self.current.take() {
            self.program.directives.push(directive);
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map_or(1, |t| t.line)
    }
}

fn unexpected(found: TokenKind, line: usize, expected: &'static [TokenKind]) -> ParseError {
    ParseError {
        line,
        found,
        expected,
    }
}
