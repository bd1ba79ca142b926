use std::collections::BTreeSet;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use pathdiff::diff_paths;
use rtype_checker::{
    builtins, parse_source, render_report, CheckOptions, CheckResult, Checker, Diagnostic,
    DiagnosticLevel, SourceFile, TokenTable, TypeContext,
};
use serde::Serialize;
use walkdir::WalkDir;

const AFTER_HELP: &str = "\
Subcommands:
  rtype check <PATH>...        Check R scripts for type drift between assignments.
  rtype infer <EXPR>           Print the type inferred for a single R expression.
  rtype reveal <PATH> <NAME>   Print the final inferred type of a variable.
  rtype builtins               List the functions with known result types.

Set RUST_LOG (e.g. `RUST_LOG=rtype_checker=trace`) for pipeline logging.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Annotated,
    Json,
    Yaml,
}

#[derive(Parser)]
#[command(
    name = "rtype",
    version,
    about = "Best-effort static type checks for R scripts.",
    after_help = AFTER_HELP
)]
struct Cli {
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check R files or directories of R files.
    Check(CheckCli),
    /// Infer the type of an R expression.
    Infer(InferCli),
    /// Reveal the final inferred type of a variable in an R file.
    Reveal(RevealCli),
    /// List builtin functions by group, with the argument type each expects.
    Builtins,
}

#[derive(Args)]
struct TypeArgs {
    /// Treat objects of this class as their own type (repeatable).
    #[arg(long = "custom-type", value_name = "TAG")]
    custom_types: Vec<String>,
}

#[derive(Args)]
struct CheckCli {
    /// R source files or directories containing them.
    #[arg(value_name = "PATH", required = true)]
    inputs: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Reserved for stricter checking; currently has no effect.
    #[arg(long)]
    strict: bool,

    /// Exit with an error when any warning is reported.
    #[arg(long)]
    deny_warnings: bool,

    /// Print the parse table of each file before checking it.
    #[arg(long)]
    dump_tokens: bool,

    #[command(flatten)]
    types: TypeArgs,
}

#[derive(Args)]
struct InferCli {
    /// R expression, e.g. `c(1L, 2L)`.
    #[arg(value_name = "EXPR")]
    expression: String,

    /// Print the full descriptor as JSON.
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    types: TypeArgs,
}

#[derive(Args)]
struct RevealCli {
    /// R source file.
    #[arg(value_name = "PATH")]
    input: PathBuf,

    /// Variable to reveal.
    #[arg(value_name = "NAME")]
    name: String,

    #[command(flatten)]
    types: TypeArgs,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: String,
    #[serde(flatten)]
    result: &'a CheckResult,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Check(check) => run_check(&check),
        Command::Infer(infer) => run_infer(&infer),
        Command::Reveal(reveal) => run_reveal(&reveal),
        Command::Builtins => {
            run_builtins();
            Ok(())
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn build_checker(types: &TypeArgs, strict: bool) -> Result<Checker> {
    let options = CheckOptions {
        strict,
        custom_types: types.custom_types.clone(),
    };
    Checker::try_new(options).context("invalid --custom-type")
}

fn run_check(cli: &CheckCli) -> Result<()> {
    let checker = build_checker(&cli.types, cli.strict)?;

    let mut files = BTreeSet::new();
    for input in &cli.inputs {
        collect_r_files(input, &mut files)?;
    }
    if files.is_empty() {
        bail!("no R files found");
    }
    log::info!("checking {} file(s)", files.len());

    let mut results = Vec::with_capacity(files.len());
    for path in &files {
        if cli.dump_tokens {
            dump_tokens(path)?;
        }
        results.push((path, checker.check_file(path)));
    }

    match cli.format {
        Format::Text => {
            for (index, (path, result)) in results.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("{}", display_path(path));
                print!("{}", render_report(result));
            }
        }
        Format::Annotated => {
            for (path, result) in &results {
                let source = SourceFile::from_path(path).ok();
                for diagnostic in result.diagnostics() {
                    print_diagnostic(path, source.as_ref(), diagnostic);
                }
            }
        }
        Format::Json | Format::Yaml => {
            let reports = results
                .iter()
                .map(|(path, result)| FileReport {
                    path: display_path(path),
                    result,
                })
                .collect::<Vec<_>>();
            let rendered = if cli.format == Format::Json {
                serde_json::to_string_pretty(&reports)?
            } else {
                serde_yaml::to_string(&reports)?
            };
            println!("{rendered}");
        }
    }

    let failed = results
        .iter()
        .filter(|(_, result)| result.has_errors() || (cli.deny_warnings && result.has_warnings()))
        .count();
    if failed > 0 {
        bail!("{failed} file(s) failed type checking");
    }
    Ok(())
}

fn run_infer(cli: &InferCli) -> Result<()> {
    let checker = build_checker(&cli.types, false)?;
    let (_, module) = match parse_source(&cli.expression) {
        Ok(parsed) => parsed,
        Err(error) => bail!("cannot parse expression: {error}"),
    };
    let descriptor = checker
        .inferrer()
        .infer_module(&module, &TypeContext::new());
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&descriptor)?);
    } else {
        println!("{descriptor}");
    }
    Ok(())
}

fn run_reveal(cli: &RevealCli) -> Result<()> {
    let checker = build_checker(&cli.types, false)?;
    let result = checker.check_file(&cli.input);
    if result.has_errors() {
        for diagnostic in &result.errors {
            eprintln!("error: {}", diagnostic.message);
        }
        bail!("failed to check {}", display_path(&cli.input));
    }
    match result.final_context.lookup(&cli.name) {
        Some(descriptor) => {
            println!("{}: {descriptor}", cli.name);
            Ok(())
        }
        None => bail!(
            "`{}` is never assigned in {}",
            cli.name,
            display_path(&cli.input)
        ),
    }
}

fn run_builtins() {
    for (index, group) in builtins::GROUPS.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}: {}", group.name, group.description);
        for function in group.functions {
            match &function.argument {
                Some(argument) => println!("  {} (expects {argument})", function.name),
                None => println!("  {}", function.name),
            }
        }
    }
}

fn dump_tokens(path: &Path) -> Result<()> {
    let source = SourceFile::from_path(path)?;
    match parse_source(&source.contents) {
        Ok((tokens, module)) => {
            println!("{}", display_path(path));
            print!("{}", TokenTable::build(&tokens, &module));
        }
        Err(error) => log::warn!("{}: {error}", display_path(path)),
    }
    Ok(())
}

fn collect_r_files(path: &Path, targets: &mut BTreeSet<PathBuf>) -> Result<()> {
    if path.is_file() {
        targets.insert(path.to_path_buf());
        return Ok(());
    }

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;
        let is_r = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "R" || ext == "r");
        if entry.file_type().is_file() && is_r {
            targets.insert(entry.into_path());
        }
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    env::current_dir()
        .ok()
        .and_then(|cwd| diff_paths(path, cwd))
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn print_diagnostic(path: &Path, source: Option<&SourceFile>, diagnostic: &Diagnostic) {
    let (level_label, level_marker) = match diagnostic.level {
        DiagnosticLevel::Error => ("error", "  -"),
        DiagnosticLevel::Warning => ("warning", "  ~"),
        DiagnosticLevel::Info => ("info", "  *"),
    };
    eprintln!("{} {}: {}", level_marker, level_label, diagnostic.message);
    if !diagnostic.has_location() {
        eprintln!("     --> {}", display_path(path));
        return;
    }
    eprintln!(
        "     --> {}:{}:{}",
        display_path(path),
        diagnostic.line,
        diagnostic.col
    );

    if let Some(raw_line) = source.and_then(|source| source.line(diagnostic.line)) {
        eprintln!("      {}", raw_line.replace('\t', "    "));

        let mut caret_line = String::from("      ");
        for ch in raw_line.chars().take(diagnostic.col.saturating_sub(1)) {
            match ch {
                '\t' => caret_line.push_str("    "),
                _ => caret_line.push(' '),
            }
        }
        caret_line.push('^');
        eprintln!("{caret_line}");
    }
}
