//! roster2sql CLI - Convert the team roster export to SQL row literals
//!
//! # Main Command
//!
//! ```bash
//! roster2sql                       # Convert "Team Roster - Main Sheet.csv"
//! roster2sql convert -i roster.csv # Same, with explicit paths
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! roster2sql parse                 # Print normalized members as JSON
//! roster2sql teams                 # Show the team alias table
//! ```

use clap::{Args, Parser, Subcommand};
use roster2sql::error::{PipelineError, PipelineResult};
use roster2sql::logs::{log_error, log_success, log_warning, LogFormat, LOGGER};
use roster2sql::transform::pipeline::{
    DEFAULT_INPUT, DEFAULT_MEMBERS_OUTPUT, DEFAULT_TEAMS_OUTPUT, EXCLUDED_NICKNAME,
};
use roster2sql::{
    convert_file, load_members, members_json, ConvertOptions, SortKey, TeamTable, FIRST_MEMBER_ID,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "roster2sql")]
#[command(about = "Convert the team roster CSV export to SQL row literals", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Conversion options used when no subcommand is given
    #[command(flatten)]
    convert: ConvertArgs,

    /// Suppress pipeline logs
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the roster export to member and team literal files (default)
    Convert(ConvertArgs),

    /// Print normalized, ordered member records as JSON
    Parse(ParseArgs),

    /// Show the built-in team alias table
    Teams,
}

#[derive(Args)]
struct SelectionArgs {
    /// Member ordering (va, date-added, date-added-chrono, nickname, none)
    #[arg(long, default_value_t = SortKey::DateAdded)]
    sort_by: SortKey,

    /// Nickname to leave out (repeatable)
    #[arg(long = "exclude", default_value = EXCLUDED_NICKNAME)]
    exclude: Vec<String>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Roster CSV export
    #[arg(short, long, env = "ROSTER2SQL_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Member literals output file
    #[arg(short, long, env = "ROSTER2SQL_OUTPUT", default_value = DEFAULT_MEMBERS_OUTPUT)]
    output: PathBuf,

    /// Team association literals output file
    #[arg(short, long, env = "ROSTER2SQL_TEAM_OUTPUT", default_value = DEFAULT_TEAMS_OUTPUT)]
    team_output: PathBuf,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Id of the first member
    #[arg(long, default_value_t = FIRST_MEMBER_ID)]
    first_id: u32,
}

#[derive(Args)]
struct ParseArgs {
    /// Roster CSV export
    #[arg(short, long, env = "ROSTER2SQL_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ConvertArgs {
    fn into_options(self) -> ConvertOptions {
        ConvertOptions {
            input: self.input,
            members_output: self.output,
            teams_output: self.team_output,
            sort_by: self.selection.sort_by,
            excluded: self.selection.exclude,
            first_id: self.first_id,
        }
    }
}

impl ParseArgs {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            input: self.input.clone(),
            sort_by: self.selection.sort_by,
            excluded: self.selection.exclude.clone(),
            ..Default::default()
        }
    }
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOGGER.set_quiet(cli.quiet);
    LOGGER.set_format(cli.log_format);

    let result = match cli.command.unwrap_or(Commands::Convert(cli.convert)) {
        Commands::Convert(args) => cmd_convert(args),
        Commands::Parse(args) => cmd_parse(&args),
        Commands::Teams => cmd_teams(),
    };

    if let Err(e) = result {
        log_error(format!("Error: {}", e));
        std::process::exit(1);
    }
}

fn cmd_convert(args: ConvertArgs) -> PipelineResult<()> {
    let options = args.into_options();
    let report = convert_file(&options, TeamTable::builtin())?;

    if !options.excluded.is_empty() && report.excluded_count == 0 {
        log_warning(format!("No member matched --exclude {}", options.excluded.join(", ")));
    }
    log_success("✨ Done!");
    Ok(())
}

fn cmd_parse(args: &ParseArgs) -> PipelineResult<()> {
    let members = load_members(&args.options())?;
    let json = members_json(&members)?;
    write_output(&json, args.output.as_deref())?;
    Ok(())
}

fn cmd_teams() -> PipelineResult<()> {
    let table = TeamTable::builtin();
    println!("{} aliases:\n", table.len());
    for (id, names) in table.by_id() {
        println!("  {:>3}  {}", id, names.join(", "));
    }
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> PipelineResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content).map_err(|source| PipelineError::Write {
                path: p.display().to_string(),
                source,
            })?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
