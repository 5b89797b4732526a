use clap::{Args, CommandFactory, Parser, Subcommand};
use db_audit_tools::commands::convert::{self, ConvertOptions, OutputShape};
use db_audit_tools::error;
use std::ffi::OsString;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "db-audit")]
#[command(about = "Convert database audit log lines into JSON records", long_about = None)]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    convert: ConvertArgs,
}

#[derive(Args)]
struct ConvertArgs {
    /// Path to the audit log file (.gz and .zst are decompressed)
    #[arg(short, long, default_value = "audit.log")]
    file: String,

    /// Write JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Record layout: nested operation object or the older flat layout
    #[arg(long, value_enum, default_value_t = OutputShape::Nested)]
    shape: OutputShape,

    /// Stop at the first line that fails to parse
    #[arg(long)]
    strict: bool,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Print processing statistics on stderr when done
    #[arg(long)]
    summary: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Rewrite the single-dash `-file` flag into the `--file` form clap expects.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some("-file") => OsString::from("--file"),
            Some(s) if s.starts_with("-file=") => OsString::from(format!("-{}", s)),
            _ => arg,
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if let Some(Commands::GenerateCompletion { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "db-audit", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let args = cli.convert;
    let options = ConvertOptions {
        file: &args.file,
        output: args.output.as_deref(),
        shape: args.shape,
        strict: args.strict,
        progress: args.progress,
        summary: args.summary,
    };

    match convert::run(&options) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(error::exit_code(&err))
        }
    }
}
