//! Command-line harness for the glicko-tr engine
//!
//! Rates a single match between two players and prints both updated ratings
//! as JSON. Logs go to stderr so that stdout stays machine readable.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use glicko_tr::config::AppConfig;
use glicko_tr::{GlickoTrCalculator, MatchStatus, Rating, RatingCalculator, RatingError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Match outcome accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StatusArg {
    Completed,
    Retired,
    Walkover,
}

impl From<StatusArg> for MatchStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Completed => MatchStatus::Completed,
            StatusArg::Retired => MatchStatus::Retired,
            StatusArg::Walkover => MatchStatus::Walkover,
        }
    }
}

/// Rate one tennis match with the glicko-tr engine
#[derive(Parser)]
#[command(
    name = "glicko-tr",
    version,
    about = "Compute updated Glicko-2 tennis ratings for a single match",
    long_about = "Rates a single match between two players. The score is the share of games \
                 won, and retirements and walkovers count for less than completed matches."
)]
struct Args {
    /// Player 1 rating
    #[arg(long = "p1-mu", alias = "p1_mu", allow_hyphen_values = true)]
    p1_mu: f64,
    /// Player 1 rating deviation
    #[arg(long = "p1-phi", alias = "p1_phi")]
    p1_phi: f64,
    /// Player 1 volatility
    #[arg(long = "p1-sigma", alias = "p1_sigma")]
    p1_sigma: f64,

    /// Player 2 rating
    #[arg(long = "p2-mu", alias = "p2_mu", allow_hyphen_values = true)]
    p2_mu: f64,
    /// Player 2 rating deviation
    #[arg(long = "p2-phi", alias = "p2_phi")]
    p2_phi: f64,
    /// Player 2 volatility
    #[arg(long = "p2-sigma", alias = "p2_sigma")]
    p2_sigma: f64,

    /// Games won by player 1
    #[arg(long = "p1-games", alias = "p1_games")]
    p1_games: i32,
    /// Games won by player 2
    #[arg(long = "p2-games", alias = "p2_games")]
    p2_games: i32,

    /// How the match ended
    #[arg(long, value_enum)]
    status: StatusArg,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration from file or defaults, then environment and CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(path) = &args.config {
        let mut config = AppConfig::from_file(path)?;
        config.apply_env()?;
        config
    } else {
        AppConfig::from_env()?
    };

    if let Some(level) = &args.log_level {
        config.service.log_level = level.clone();
    }

    glicko_tr::config::validate_config(&config)?;
    Ok(config)
}

fn validate_games(player_games: i32, opponent_games: i32) -> Result<()> {
    if player_games < 0 || opponent_games < 0 {
        return Err(RatingError::InvalidGameCount {
            reason: format!(
                "game counts must be non-negative, got {} and {}",
                player_games, opponent_games
            ),
        }
        .into());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config.service.log_level)?;

    let player = Rating::new(args.p1_mu, args.p1_phi, args.p1_sigma);
    let opponent = Rating::new(args.p2_mu, args.p2_phi, args.p2_sigma);
    player.validate()?;
    opponent.validate()?;
    validate_games(args.p1_games, args.p2_games)?;

    let calculator = GlickoTrCalculator::new(config.engine)?;
    debug!("Engine configuration: {}", calculator.config());

    let status = MatchStatus::from(args.status);
    info!(
        "{}: rating {} vs {}, {}-{} ({})",
        config.service.name, player, opponent, args.p1_games, args.p2_games, status
    );

    let update = calculator.rate_match(
        &player,
        &opponent,
        args.p1_games,
        args.p2_games,
        status,
    );

    println!("{}", serde_json::to_string_pretty(&update)?);
    Ok(())
}
