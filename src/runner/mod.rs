//! Sequential execution of a directive's commands.
//!
//! Commands run one at a time through a [`CommandRunner`]; the first failure
//! stops the directive. [`ProcessRunner`] spawns real processes, tests can
//! supply their own runner.

pub mod process;

pub use process::ProcessRunner;

use std::io;

use thiserror::Error;

use crate::dsl::{Command, Directive};

/// An error running a single command.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("empty command")]
    EmptyCommand,
    #[error("could not run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' {}", describe_exit(.code))]
    Failed { program: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// Something that can run one command to completion.
pub trait CommandRunner {
    fn run(&mut self, command: &Command) -> Result<(), RunError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &Command) -> Result<(), RunError> {
        (**self).run(command)
    }
}

/// Run every command of `directive` in order, stopping at the first failure.
///
/// Empty commands (a bare `;`) have nothing to run and are skipped.
pub fn run_directive<R: CommandRunner>(
    directive: &Directive,
    mut runner: R,
) -> Result<(), RunError> {
    log::debug!(
        "running directive '{}' ({} commands)",
        directive.name,
        directive.commands.len()
    );
    for command in &directive.commands {
        if command.is_empty() {
            log::debug!("skipping empty command in '{}'", directive.name);
            continue;
        }
        if let Err(err) = runner.run(command) {
            log::error!("'{}' failed: {err}", directive.name);
            return Err(err);
        }
    }
    Ok(())
}
