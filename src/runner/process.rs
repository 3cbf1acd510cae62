//! Runs commands as child processes.

use std::io::{self, Write};
use std::process::Command as Process;

use super::{CommandRunner, RunError};
use crate::dsl::Command;

/// Spawns each command as a child process and waits for it.
///
/// The first part of a command is the program, the rest are its arguments;
/// no shell is involved. With `echo` set, the command line is written to
/// `out` before the process starts. With `dry_run` set, nothing is spawned.
pub struct ProcessRunner<W: Write> {
    out: W,
    echo: bool,
    dry_run: bool,
}

impl ProcessRunner<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ProcessRunner<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            echo: true,
            dry_run: false,
        }
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn announce(&mut self, command: &Command) {
        // Echo failures are not worth aborting the build over.
        if let Err(err) = writeln!(self.out, "{command}").and_then(|_| self.out.flush()) {
            log::warn!("could not echo command: {err}");
        }
    }
}

impl<W: Write> CommandRunner for ProcessRunner<W> {
    fn run(&mut self, command: &Command) -> Result<(), RunError> {
        let program = command.program().ok_or(RunError::EmptyCommand)?;

        if self.echo || self.dry_run {
            self.announce(command);
        }
        if self.dry_run {
            return Ok(());
        }

        log::info!("spawning {program}");
        let status = Process::new(program)
            .args(command.args())
            .status()
            .map_err(|source| RunError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::Failed {
                program: program.to_string(),
                code: status.code(),
            })
        }
    }
}
