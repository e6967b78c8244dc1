//! forthy CLI
//!
//! Runs a program from a file, from `-e CODE`, or from standard input.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use forthy::{Lexer, Machine, MachineConfig, TokenDumper};

#[derive(ClapParser, Debug)]
#[command(name = "forthy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A tiny Forth-like stack interpreter", long_about = None)]
struct Cli {
    /// Program file to run (reads standard input when omitted)
    #[arg(conflicts_with = "code")]
    file: Option<PathBuf>,

    /// Run CODE instead of a file
    #[arg(short = 'e', value_name = "CODE")]
    code: Option<String>,

    /// Print the final stack once the program finishes
    #[arg(long)]
    stack: bool,

    /// Emit JSON for --stack and --tokens
    #[arg(long)]
    json: bool,

    /// Show tokens only, without evaluating
    #[arg(long)]
    tokens: bool,

    /// Disable ANSI colors in --tokens output
    #[arg(long)]
    no_color: bool,

    /// Print tokens as source text instead of their debug form
    #[arg(long)]
    pretty: bool,

    /// Maximum nesting of user-defined word calls (unbounded by default)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Maximum number of values on the stack (unbounded by default)
    #[arg(long, value_name = "N")]
    max_stack: Option<usize>,

    /// Log definitions and evaluation to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read '{}': {}", .path.display(), .source)]
    Open { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Eval(#[from] forthy::Error),

    #[error("output error: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    init_tracing(cli.verbose);

    if !io::stdout().is_terminal() {
        cli.no_color = true;
    }

    let result = open_input(&cli).and_then(|input| run(&cli, input, io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("forthy=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("forthy=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(cli: &Cli) -> Result<Box<dyn BufRead>, CliError> {
    match (&cli.code, &cli.file) {
        (Some(code), _) => Ok(Box::new(io::Cursor::new(code.clone().into_bytes()))),
        (None, Some(path)) => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "reading program");
            Ok(Box::new(BufReader::new(file)))
        }
        (None, None) => Ok(Box::new(io::stdin().lock())),
    }
}

fn machine_config(cli: &Cli) -> MachineConfig {
    let mut config = MachineConfig::default();
    if let Some(depth) = cli.max_depth {
        config = config.with_max_call_depth(depth);
    }
    if let Some(size) = cli.max_stack {
        config = config.with_max_stack_size(size);
    }
    config
}

fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: W) -> Result<(), CliError> {
    if cli.tokens {
        return dump_tokens(cli, input, out);
    }

    let mut machine = Machine::with_config(out, machine_config(cli));
    machine.eval(input)?;

    let stack = machine.stack().to_vec();
    debug!(stack_len = stack.len(), "program finished");

    let mut out = machine.into_output();
    writeln!(out)?;
    if cli.stack {
        if cli.json {
            serde_json::to_writer(&mut out, &stack).map_err(io::Error::from)?;
            writeln!(out)?;
        } else {
            let values: Vec<String> = stack.iter().map(|v| v.to_string()).collect();
            writeln!(out, "[{}]", values.join(" "))?;
        }
    }
    out.flush()?;
    Ok(())
}

fn dump_tokens<R: BufRead, W: Write>(cli: &Cli, input: R, mut out: W) -> Result<(), CliError> {
    let mut dumper = TokenDumper::new();
    if cli.no_color {
        dumper = dumper.no_color();
    }
    if cli.pretty {
        dumper = dumper.pretty();
    }
    if cli.json {
        dumper = dumper.json();
    }

    for spanned in Lexer::new(input) {
        let spanned = spanned.map_err(forthy::Error::from)?;
        dumper.dump_one(&mut out, &spanned)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["forthy"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_cli(args: &[&str]) -> (Result<(), CliError>, String) {
        let cli = cli(args);
        let mut out = Vec::new();
        let result = open_input(&cli).and_then(|input| run(&cli, input, &mut out));
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inline_code_prints_trailing_newline() {
        let (result, out) = run_cli(&["-e", "1 2 + ."]);
        assert!(result.is_ok());
        assert_eq!(out, "3 \n");
    }

    #[test]
    fn test_stack_flag() {
        let (result, out) = run_cli(&["-e", "1 2 3", "--stack"]);
        assert!(result.is_ok());
        assert_eq!(out, "\n[1 2 3]\n");

        let (_, out) = run_cli(&["-e", "", "--stack"]);
        assert_eq!(out, "\n[]\n");
    }

    #[test]
    fn test_stack_flag_json() {
        let (result, out) = run_cli(&["-e", "2 -1", "--stack", "--json"]);
        assert!(result.is_ok());
        assert_eq!(out, "\n[2,-1]\n");
    }

    #[test]
    fn test_evaluation_error() {
        let (result, out) = run_cli(&["-e", "42 emit nope"]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Eval(forthy::Error::UnknownWord(_))));
        assert_eq!(err.to_string(), "unknown word: \"nope\"");
        // output already produced stays, no trailing newline
        assert_eq!(out, "*");
    }

    #[test]
    fn test_program_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ": square dup * ;").unwrap();
        writeln!(file, "7 SQUARE .").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (result, out) = run_cli(&[&path]);
        assert!(result.is_ok());
        assert_eq!(out, "49 \n");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.fs");
        let path = path.to_str().unwrap();

        let (result, _) = run_cli(&[path]);
        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Open { .. }));
        assert!(err.to_string().starts_with("failed to read"), "msg was: {}", err);
    }

    #[test]
    fn test_file_and_code_conflict() {
        let err = Cli::try_parse_from(["forthy", "prog.fs", "-e", "1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_limits_from_flags() {
        let config = machine_config(&cli(&["--max-depth", "3", "--max-stack", "10"]));
        assert_eq!(config.max_call_depth, Some(3));
        assert_eq!(config.max_stack_size, Some(10));
        assert_eq!(machine_config(&cli(&[])), MachineConfig::default());

        let (result, _) = run_cli(&["-e", "1 2 3", "--max-stack", "2"]);
        assert!(matches!(
            result,
            Err(CliError::Eval(forthy::Error::StackOverflow { limit: 2 }))
        ));

        let (result, _) = run_cli(&["-e", ": a 1 ; : b a ; b", "--max-depth", "1"]);
        assert!(matches!(
            result,
            Err(CliError::Eval(forthy::Error::CallDepthExceeded { limit: 1 }))
        ));
    }

    #[test]
    fn test_tokens_mode_does_not_evaluate() {
        let (result, out) = run_cli(&["-e", "1 nope", "--tokens", "--no-color", "--pretty"]);
        assert!(result.is_ok());
        assert_eq!(out, "[01:01] NUMBER   1\n[01:03] WORD     nope\n");
    }

    #[test]
    fn test_tokens_json() {
        let (result, out) = run_cli(&["-e", ":", "--tokens", "--json"]);
        assert!(result.is_ok());
        assert_eq!(
            out,
            "{\"token\":\"DefinitionStart\",\"span\":{\"line\":1,\"col\":1}}\n"
        );
    }
}
