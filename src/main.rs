//! Shieldwall - Entry Point
//!
//! Pits two unit templates against each other, runs the battle link to its
//! end and prints every round.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use shieldwall::battle::{BattleLink, BattleMode, Defeat, RelativeDirection};
use shieldwall::core::error::{CombatError, Result};
use shieldwall::core::{config, set_config, BattleConfig};
use shieldwall::units::{TemplateCatalog, Unit};

/// Run a fight between two unit templates
#[derive(Parser, Debug)]
#[command(name = "shieldwall")]
#[command(about = "Resolve a fight between two units round by round")]
struct Args {
    /// Attacking template name
    attacker: String,

    /// Defending template name
    defender: String,

    /// Shoot instead of closing to melee
    #[arg(long)]
    ranged: bool,

    /// Attacker charges in the first round
    #[arg(long)]
    charge: bool,

    /// Side of the defender being attacked
    #[arg(long, value_parser = parse_direction)]
    direction: Option<RelativeDirection>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Additional unit templates (TOML)
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Override the round limit
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Print both units' status at the start and after every round
    #[arg(long)]
    status: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_direction(s: &str) -> std::result::Result<RelativeDirection, String> {
    RelativeDirection::from_name(s).ok_or_else(|| format!("unknown direction '{}'", s))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("shieldwall=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => BattleConfig::load_from_toml(path)?,
        None => BattleConfig::default(),
    };
    if let Some(max_rounds) = args.max_rounds {
        settings.max_rounds = max_rounds;
        settings.validate()?;
    }
    if set_config(settings).is_err() {
        tracing::warn!("Battle config already set, keeping the existing one");
    }
    let config = config();

    let mut catalog = TemplateCatalog::with_defaults();
    for path in config.templates_path.iter().chain(args.templates.iter()) {
        let extra = TemplateCatalog::load_from_toml(path)?;
        tracing::info!("Loaded {} templates from {:?}", extra.len(), path);
        catalog.extend(extra.all().iter().map(|t| (**t).clone()));
    }

    let mut attacker = Unit::new(catalog.require(&args.attacker)?);
    let mut defender = Unit::new(catalog.require(&args.defender)?);

    let mode = if args.ranged {
        BattleMode::Ranged
    } else {
        BattleMode::Melee
    };
    let direction = args.direction.unwrap_or(config.default_direction);

    let mut link = BattleLink::with_mode(mode, &mut attacker, &mut defender, direction, args.charge)?;

    let text = matches!(args.format, Format::Text);
    if text && args.status {
        println!("{}", link.attacker());
        println!("{}", link.defender());
    }
    let result = link.resolve_with(config.max_rounds, |link| {
        if !text {
            return;
        }
        if let Some(report) = link.last_report() {
            println!("{}", report);
        }
        if args.status {
            println!("{}", link.attacker());
            println!("{}", link.defender());
        }
    });
    match result {
        Ok(_) => {}
        Err(CombatError::RoundLimitExceeded { rounds }) => {
            tracing::warn!("Stopping after {} rounds without a result", rounds);
        }
        Err(e) => return Err(e),
    }

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&link.summary())?),
        Format::Text => print_result(&link),
    }
    Ok(())
}

fn print_result(link: &BattleLink<'_>) {
    match (link.winner(), link.loser()) {
        (Some(winner), Some(loser)) => {
            let state = match Defeat::of(loser) {
                Some(Defeat::Dead) => "Dead",
                Some(Defeat::Fleeing) => "Fleeing",
                None => "",
            };
            println!(
                "Winner: {}\tLoser ({}): {}\tNum Rounds: {}",
                winner.name(),
                state,
                loser.name(),
                link.round()
            );
        }
        _ => match link.outcome() {
            Some(outcome) => println!("No winner ({:?})\tNum Rounds: {}", outcome, link.round()),
            None => println!("Undecided\tNum Rounds: {}", link.round()),
        },
    }
}
