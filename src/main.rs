use chrono::NaiveDate;
use clap::{ArgGroup, Parser};
use lunch_roulette::config::Settings;
use lunch_roulette::services::{write_round, Notifier, Roster};
use lunch_roulette::{AppError, RoundMatcher};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Read and write the supplied roster CSV to match people for lunch
/// roulette, or send the emails for a round that was already generated and
/// reviewed.
#[derive(Debug, Parser)]
#[command(name = "lunch-roulette")]
#[command(group(ArgGroup::new("action").required(true).args(["roulette", "send_emails"])))]
struct Cli {
    /// Path to the roster CSV that stores lunch roulette information
    #[arg(long)]
    roster: PathBuf,

    /// The date of the lunch we're rouletting for, in YYYYMMDD format
    #[arg(long, value_parser = parse_lunch_date)]
    lunch_date: NaiveDate,

    /// Match people for the lunch date and record the round in a new
    /// match column, for review
    #[arg(long)]
    roulette: bool,

    /// Send emails for the given lunch date. Assumes the round's match
    /// column was generated and reviewed beforehand
    #[arg(long)]
    send_emails: bool,

    /// If supplied, the roster is not overwritten and the round is written
    /// to this file instead
    #[arg(long)]
    out: Option<PathBuf>,

    /// Seed for the round's randomness; fix it to reproduce a round
    #[arg(long)]
    seed: Option<u64>,

    /// Log at DEBUG instead of the configured level
    #[arg(long)]
    debug: bool,
}

fn parse_lunch_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|e| format!("expected YYYYMMDD: {e}"))
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings, cli.debug);

    if let Err(e) = run(cli, settings) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(settings: &Settings, debug: bool) {
    let level = if debug { "debug" } else { settings.logging.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn run(cli: Cli, settings: Settings) -> Result<(), AppError> {
    let roster = Roster::load(&cli.roster)?;
    info!(people = roster.len(), "Loaded roster {}", cli.roster.display());

    if cli.roulette {
        do_roulette(&cli, &roster)
    } else {
        send_emails(&cli, &roster, settings)
    }
}

fn do_roulette(cli: &Cli, roster: &Roster) -> Result<(), AppError> {
    let eligible = roster.eligible_people();
    info!(
        eligible = eligible.len(),
        excluded = roster.len() - eligible.len(),
        "Matching for {}",
        cli.lunch_date
    );

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, "Seeding round");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let result = RoundMatcher::new().match_round(&eligible, &mut rng);
    info!(
        pairs = result.pairs.len(),
        unmatched = result.unmatched.len(),
        "Round computed"
    );

    let out = cli.out.clone().unwrap_or_else(|| cli.roster.clone());
    write_round(roster, &result, cli.lunch_date, &out)?;
    info!("Saved lunch roulette for {} to {}", cli.lunch_date, out.display());
    Ok(())
}

fn send_emails(cli: &Cli, roster: &Roster, settings: Settings) -> Result<(), AppError> {
    let notifier = Notifier::new(settings.notifier);
    let summary = notifier.send_round(roster, cli.lunch_date)?;
    info!(sent = summary.sent, "Emails dispatched");

    if !summary.failures.is_empty() {
        error!(
            "Failed to send emails to the following people:\n  {}",
            summary.failures.join("\n  ")
        );
    }
    Ok(())
}
