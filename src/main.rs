//! Chairside - stats and achievements for a dental professionals directory
//!
//! CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use chairside::cli::{local_today, DirectoryInput, ProfileInput};
use chairside::config::Config;
use chairside::core::{parse_date, ActivityCategory};
use chairside::demo::ActivityLevel;
use chairside::error::exit_codes;
use chairside::stats::LeaderboardKey;

// =============================================================================
// CLI Definition
// =============================================================================

/// Chairside - stats and achievements for a dental professionals directory
#[derive(Parser)]
#[command(name = "chairside")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, points, streaks, rating and badges for a profile
    Stats {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Rank a directory of profiles by points or longest streak
    Leaderboard {
        /// JSON file holding one profile or an array of profiles
        #[arg(long, conflicts_with_all = ["dir", "demo"])]
        input: Option<PathBuf>,
        /// Directory of <id>.json profile files
        #[arg(long, conflicts_with = "demo")]
        dir: Option<PathBuf>,
        /// Use the generated demo directory
        #[arg(long)]
        demo: bool,
        /// Rank by a single metric (both boards when unset)
        #[arg(long, value_enum)]
        by: Option<RankBy>,
        /// Maximum entries per board
        #[arg(long, short)]
        limit: Option<usize>,
        /// Compute as of this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<NaiveDate>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Draw the contribution calendar for the last year
    Graph {
        #[command(flatten)]
        profile: ProfileArgs,
        /// List the activities of this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_as_of)]
        day: Option<NaiveDate>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show progress toward the weekly goal
    Goals {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Goal category (display name or snake_case key)
        #[arg(long, value_parser = parse_category)]
        category: Option<ActivityCategory>,
        /// Goal target count
        #[arg(long)]
        target: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the badge catalog, marking earned badges when a profile is given
    Badges {
        #[command(flatten)]
        profile: ProfileArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate deterministic demo activity
    Generate {
        /// Generate a single profile (the whole demo directory when unset)
        #[arg(long)]
        profile: Option<String>,
        /// Override the activity level
        #[arg(long, value_enum)]
        level: Option<Level>,
        /// Generate as of this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_as_of)]
        as_of: Option<NaiveDate>,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Initialize .chairside/ in the current directory
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,
        /// Seed .chairside/profiles/ with the demo directory
        #[arg(long)]
        demo: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Output as JSON
    #[arg(long, short)]
    json: bool,
    /// Suppress output
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Args)]
struct ProfileArgs {
    /// Stats request or profile JSON file
    #[arg(long, conflicts_with_all = ["profile", "demo"])]
    input: Option<PathBuf>,
    /// Stored profile id
    #[arg(long, conflicts_with = "demo")]
    profile: Option<String>,
    /// Demo profile id
    #[arg(long)]
    demo: Option<String>,
    /// Directory holding stored profiles (defaults to .chairside/profiles)
    #[arg(long, requires = "profile")]
    profiles_dir: Option<PathBuf>,
    /// Compute as of this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_as_of)]
    as_of: Option<NaiveDate>,
}

impl ProfileArgs {
    fn input(&self) -> Option<ProfileInput> {
        profile_input(
            self.input.clone(),
            self.profile.clone(),
            self.demo.clone(),
            self.profiles_dir.clone(),
        )
    }
}

fn profile_input(
    input: Option<PathBuf>,
    profile: Option<String>,
    demo: Option<String>,
    profiles_dir: Option<PathBuf>,
) -> Option<ProfileInput> {
    if let Some(path) = input {
        return Some(ProfileInput::File(path));
    }
    if let Some(id) = profile {
        return Some(ProfileInput::Stored {
            id,
            dir: profiles_dir,
        });
    }
    demo.map(ProfileInput::Demo)
}

#[derive(Clone, Copy, ValueEnum)]
enum RankBy {
    Points,
    Streak,
}

impl From<RankBy> for LeaderboardKey {
    fn from(by: RankBy) -> Self {
        match by {
            RankBy::Points => LeaderboardKey::Points,
            RankBy::Streak => LeaderboardKey::LongestStreak,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    High,
    Medium,
    Low,
}

impl From<Level> for ActivityLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::High => ActivityLevel::High,
            Level::Medium => ActivityLevel::Medium,
            Level::Low => ActivityLevel::Low,
        }
    }
}

fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn parse_category(value: &str) -> Result<ActivityCategory, String> {
    value.parse::<ActivityCategory>().map_err(|e| e.to_string())
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("chairside error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "chairside=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Stats { profile, output } => run_stats(&profile, &output, &cwd),
        Commands::Leaderboard {
            input,
            dir,
            demo,
            by,
            limit,
            as_of,
            output,
        } => {
            let source = match (input, dir, demo) {
                (Some(path), _, _) => DirectoryInput::File(path),
                (None, Some(dir), _) => DirectoryInput::Dir(dir),
                (None, None, true) => DirectoryInput::Demo,
                (None, None, false) => DirectoryInput::Project,
            };
            run_leaderboard(&source, by, limit, as_of, &output, &cwd)
        }
        Commands::Graph {
            profile,
            day,
            output,
        } => run_graph(&profile, day, &output, &cwd),
        Commands::Goals {
            profile,
            category,
            target,
            output,
        } => run_goals(&profile, category, target, &output, &cwd),
        Commands::Badges { profile, output } => run_badges(&profile, &output, &cwd),
        Commands::Generate {
            profile,
            level,
            as_of,
            output,
        } => run_generate(profile, level, as_of, &output),
        Commands::Init {
            force,
            demo,
            output,
        } => run_init(force, demo, &output, &cwd),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

fn print_output(formatted: &str) {
    if !formatted.is_empty() {
        println!("{}", formatted.trim_end_matches('\n'));
    }
}

fn required_input(profile: &ProfileArgs) -> Result<ProfileInput, Box<dyn std::error::Error>> {
    profile
        .input()
        .ok_or_else(|| "one of --input, --profile or --demo is required".into())
}

fn run_stats(
    profile: &ProfileArgs,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::stats::{StatsCommand, StatsOptions};

    let input = required_input(profile)?;
    let cmd = StatsCommand::new(Config::load_from_cwd(cwd), cwd);
    let options = StatsOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        as_of: profile.as_of,
    };

    let output = cmd.run(&input, &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_leaderboard(
    source: &DirectoryInput,
    by: Option<RankBy>,
    limit: Option<usize>,
    as_of: Option<NaiveDate>,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::leaderboard::{LeaderboardCommand, LeaderboardOptions};

    let cmd = LeaderboardCommand::new(Config::load_from_cwd(cwd), cwd);
    let options = LeaderboardOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        key: by.map(LeaderboardKey::from),
        limit,
    };

    let output = cmd.run(source, as_of.unwrap_or_else(local_today), &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_graph(
    profile: &ProfileArgs,
    day: Option<NaiveDate>,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::graph::{GraphCommand, GraphOptions};

    let input = required_input(profile)?;
    let cmd = GraphCommand::new(Config::load_from_cwd(cwd), cwd);
    let options = GraphOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        as_of: profile.as_of,
        day,
    };

    let output = cmd.run(&input, &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_goals(
    profile: &ProfileArgs,
    category: Option<ActivityCategory>,
    target: Option<u32>,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::goals::{GoalsCommand, GoalsOptions};
    use chairside::config::GoalConfig;

    let input = required_input(profile)?;
    let mut config = Config::load_from_cwd(cwd);
    if let Some(category) = category {
        config.goals.category = category;
    }
    if let Some(target) = target {
        if !GoalConfig::is_valid_target(target) {
            return Err(format!("invalid goal target {}, must be at least 1", target).into());
        }
        config.goals.target = target;
    }

    let cmd = GoalsCommand::new(config, cwd);
    let options = GoalsOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        as_of: profile.as_of,
    };

    let output = cmd.run(&input, &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_badges(
    profile: &ProfileArgs,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::badges::{BadgesCommand, BadgesOptions};

    let input = profile.input();
    let cmd = BadgesCommand::new(Config::load_from_cwd(cwd), cwd);
    let options = BadgesOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        as_of: profile.as_of,
    };

    let output = cmd.run(input.as_ref(), &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_generate(
    profile: Option<String>,
    level: Option<Level>,
    as_of: Option<NaiveDate>,
    output_args: &OutputArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::generate::{GenerateCommand, GenerateOptions};

    let cmd = GenerateCommand::new();
    let options = GenerateOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        profile_id: profile,
        level: level.map(ActivityLevel::from),
    };

    let output = cmd.run(as_of.unwrap_or_else(local_today), &options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_init(
    force: bool,
    demo: bool,
    output_args: &OutputArgs,
    cwd: &Path,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use chairside::cli::init::{InitCommand, InitOptions};

    let cmd = InitCommand::new(cwd);
    let options = InitOptions {
        json: output_args.json,
        quiet: output_args.quiet,
        force,
        demo_as_of: demo.then(local_today),
    };

    let output = cmd.run(&options);
    print_output(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}
