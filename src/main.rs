//! gmake — run one directive of the GMakefile in the working directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use gmake::config::Config;
use gmake::dsl::Compiler;
use gmake::runner::{run_directive, ProcessRunner};

#[derive(Parser, Debug)]
#[command(name = "gmake", version, about = "A very lightweight build tool.")]
struct Cli {
    /// Directive to run [default: all]
    directive: Option<String>,

    /// Read this build file instead of GMakefile
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Don't echo commands before running them
    #[arg(short, long)]
    quiet: bool,

    /// Print the commands of the directive without running them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print the parsed build file as YAML and exit
    #[arg(long)]
    dump: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().unwrap_or_else(|err| {
        log::warn!("{err}; using defaults");
        Config::default()
    });

    let path = cli.file.clone().unwrap_or_else(|| config.file.clone());
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            log::debug!("reading {}: {err}", path.display());
            println!("gmake: fatal: could not read {}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let compiled = Compiler::parse(&source);
    if let Some(err) = &compiled.error {
        println!("gmake:{}: {err}", err.line());
    }
    let program = compiled.program;

    if cli.dump {
        return match serde_yaml::to_string(&program) {
            Ok(yaml) => {
                print!("{yaml}");
                if compiled.error.is_some() {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(err) => {
                println!("gmake: fatal: {err}");
                ExitCode::FAILURE
            }
        };
    }

    let name = cli.directive.as_deref().unwrap_or(&config.default_directive);
    let Some(directive) = program.directive(name) else {
        println!("gmake: fatal: no '{name}' directive defined");
        return ExitCode::FAILURE;
    };

    let runner = ProcessRunner::stdout()
        .echo(config.echo && !cli.quiet)
        .dry_run(cli.dry_run);
    match run_directive(directive, runner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("gmake: fatal: {err}");
            ExitCode::FAILURE
        }
    }
}
