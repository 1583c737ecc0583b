mod error_formatter;
mod formatter;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use formatter::{CheckOutcome, CheckRow, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use traininglog::{serializers, Engine, LogError, SessionDefaults};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "traininglog")]
#[command(about = "Validated training sessions from plain-text workout logs.")]
#[command(
    long_about = "Reads workout logs written between BEGIN and END markers and turns them into validated training sessions.\nThe CLI prints the canonical JSON form, checks whole directories of logs, shows a session as tables, and renders canonical JSON back into log text."
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    defaults: DefaultsArgs,

    /// Log pipeline details to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Values for session fields a log leaves out
#[derive(Args)]
struct DefaultsArgs {
    /// User id
    #[arg(long, global = true, env = "TRAININGLOG_USER")]
    user: Option<String>,
    /// User display name
    #[arg(long = "user-name", global = true, env = "TRAININGLOG_USER_NAME")]
    user_name: Option<String>,
    /// Program name
    #[arg(long, global = true, env = "TRAININGLOG_PROGRAM")]
    program: Option<String>,
    /// Program author
    #[arg(long, global = true, env = "TRAININGLOG_AUTHOR")]
    author: Option<String>,
    /// Program length in weeks; bounds the Week field
    #[arg(long = "program-length", global = true, env = "TRAININGLOG_PROGRAM_LENGTH")]
    program_length: Option<u32>,
}

impl DefaultsArgs {
    fn session_defaults(&self) -> SessionDefaults {
        let mut defaults = SessionDefaults::default();
        if let Some(user) = &self.user {
            defaults.user_id = user.clone();
        }
        if let Some(name) = &self.user_name {
            defaults.user_name = name.clone();
        }
        if let Some(program) = &self.program {
            defaults.program = program.clone();
        }
        if let Some(author) = &self.author {
            defaults.program_author = author.clone();
        }
        if let Some(weeks) = self.program_length {
            defaults.program_length_weeks = weeks;
        }
        defaults
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a log file and print the canonical JSON
    ///
    /// Fails when the file has no BEGIN/END block or when any line breaks
    /// a rule; the error names the line.
    Parse {
        /// Log file to parse
        file: PathBuf,
        /// Print the JSON on a single line
        #[arg(short, long)]
        compact: bool,
    },
    /// Parse every .log and .txt file under a directory
    ///
    /// Prints one table row per file. Exits with status 1 when any file
    /// fails to parse; files without a BEGIN/END block are skipped.
    Check {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Show a parsed session as tables
    Show {
        /// Log file to show
        file: PathBuf,
    },
    /// Render canonical JSON back into log text
    Render {
        /// File holding a canonical session as JSON
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let engine = Engine::new().with_defaults(cli.defaults.session_defaults());
    let result = match &cli.command {
        Commands::Parse { file, compact } => parse_command(&engine, file, *compact),
        Commands::Check { dir } => check_command(&engine, dir),
        Commands::Show { file } => show_command(&engine, file),
        Commands::Render { file } => render_command(file),
    };

    if let Err(e) = result {
        // Log errors carry a location and are drawn against the source text
        if let Some(log_err) = e.downcast_ref::<LogError>() {
            eprintln!("{}", error_formatter::format_error(log_err));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "traininglog=warn",
        1 => "traininglog=debug",
        _ => "traininglog=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_command(engine: &Engine, file: &Path, compact: bool) -> Result<()> {
    let session = load_session(engine, file)?;
    let json = if compact {
        serializers::to_json_compact(&session)?
    } else {
        serializers::to_json_string(&session)?
    };
    println!("{}", json);
    Ok(())
}

fn check_command(engine: &Engine, dir: &Path) -> Result<()> {
    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_log_file(path) {
            continue;
        }
        debug!(file = %path.display(), "checking log file");

        let source_id = path.to_string_lossy().to_string();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let outcome = match engine.parse_session(&text, &source_id) {
            Ok(Some(session)) => CheckOutcome::Valid(Box::new(session)),
            Ok(None) => CheckOutcome::NoSession,
            Err(err) => {
                let outcome = CheckOutcome::Invalid(err.to_string());
                failures.push(err);
                outcome
            }
        };
        rows.push(CheckRow {
            file: source_id,
            outcome,
        });
    }

    let formatter = Formatter::default();
    print!("{}", formatter.format_check_summary(&rows));

    for err in &failures {
        eprintln!("{}", error_formatter::format_error(err));
    }
    if !failures.is_empty() {
        bail!("{} of {} log file(s) failed to parse", failures.len(), rows.len());
    }
    Ok(())
}

fn show_command(engine: &Engine, file: &Path) -> Result<()> {
    let session = load_session(engine, file)?;
    let formatter = Formatter::default();
    print!("{}", formatter.format_session(&session));
    Ok(())
}

fn render_command(file: &Path) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let session = serializers::from_json_str(&json)?;
    print!("{}", serializers::render(&session));
    Ok(())
}

/// Read and parse one log file; a file without a session is an error here
fn load_session(engine: &Engine, file: &Path) -> Result<traininglog::TrainingSession> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let source_id = file.to_string_lossy().to_string();
    match engine.parse_session(&text, &source_id)? {
        Some(session) => Ok(session),
        None => bail!("no BEGIN/END block found in {}", file.display()),
    }
}

fn is_log_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("log") | Some("txt")
    )
}
