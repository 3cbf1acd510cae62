//! GMakefile compiler: source text → tokens → directive/command AST.

pub mod ast;
pub mod charset;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::*;
pub use error::{CompileError, LexError, LexErrorKind, ParseError};
pub use parser::ParseOutcome;
pub use token::{Token, TokenKind};

use lexer::Lexer;
use parser::Parser;

/// The GMakefile compiler.
pub struct Compiler;

impl Compiler {
    /// Lex source text into tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        log::debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Lex and parse source text.
    ///
    /// A lexical error yields an empty program, since the lexer produces no
    /// tokens at all when it fails. A parse error keeps the directives closed
    /// before it.
    pub fn parse(source: &str) -> Compiled {
        let tokens = match Self::tokenize(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                return Compiled {
                    program: Program::default(),
                    error: Some(err.into()),
                }
            }
        };

        let outcome = Parser::new(tokens).parse();
        log::debug!("parsed {} directives", outcome.program.directives.len());
        Compiled {
            program: outcome.program,
            error: outcome.error.map(CompileError::from),
        }
    }

    /// Lex and parse, failing on any error.
    pub fn compile(source: &str) -> Result<Program, CompileError> {
        Self::parse(source).into_result()
    }
}

/// A program together with the error that cut compilation short, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub program: Program,
    pub error: Option<CompileError>,
}

impl Compiled {
    pub fn into_result(self) -> Result<Program, CompileError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.program),
        }
    }
}
