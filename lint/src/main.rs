use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use color_print::cprintln;
use indexmap::IndexMap;
use manolint::{complete, report, Analysis, Error, Position, Settings, Severity};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Print debug logs
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report spelling, syntax and logic problems
    Check {
        /// Input files
        #[clap(required = true)]
        input: Vec<String>,

        /// Settings file (YAML, editor key names)
        #[clap(short, long)]
        config: Option<String>,

        /// Override maxNumberOfProblems
        #[clap(long)]
        max_problems: Option<usize>,

        #[clap(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List completion candidates at a position
    Complete {
        input: String,

        /// 0-based line
        #[clap(long)]
        line: usize,

        /// 0-based column
        #[clap(long)]
        character: usize,

        #[clap(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Show label addresses and the memory image
    Dump { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            if let Some(source) = std::error::Error::source(&err) {
                cprintln!("       <blue>caused by</>: {}", source);
            }
            ExitCode::FAILURE
        }
    }
}

/// Ok(false) when an error level diagnostic was found.
fn run(command: Command) -> Result<bool, Error> {
    match command {
        Command::Check {
            input,
            config,
            max_problems,
            format,
        } => {
            let mut settings = match config {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            if let Some(max) = max_problems {
                settings.max_number_of_problems = max;
            }

            let mut clean = true;
            let mut results = IndexMap::new();
            for path in &input {
                let analysis = Analysis::run(&read(path)?, &settings);
                clean &= !analysis
                    .diagnostics
                    .iter()
                    .any(|d| d.severity == Severity::Error);
                match format {
                    Format::Text => {
                        for diag in &analysis.diagnostics {
                            report::print_diag(diag, path, &analysis);
                        }
                    }
                    Format::Yaml => {
                        results.insert(path.clone(), analysis.diagnostics);
                    }
                }
            }
            if format == Format::Yaml {
                print!("{}", serde_yaml::to_string(&results)?);
            }
            Ok(clean)
        }

        Command::Complete {
            input,
            line,
            character,
            format,
        } => {
            let text = read(&input)?;
            if line >= text.split('\n').count() {
                return Err(Error::Position(format!("{}:{}", input, line + 1)));
            }
            let items = complete(&text, Position::new(line, character));
            match format {
                Format::Text => items.iter().for_each(report::print_completion),
                Format::Yaml => print!("{}", serde_yaml::to_string(&items)?),
            }
            Ok(true)
        }

        Command::Dump { input } => {
            let analysis = Analysis::run(&read(&input)?, &Settings::default());
            report::print_dump(&input, &analysis);
            Ok(true)
        }
    }
}

fn read(path: &str) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead(path.to_string(), e))
}
