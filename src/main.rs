//! Seven Seals - command line front end
//!
//! Play against the AI in the terminal, run AI tournaments, or list the
//! card catalog.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use seven_seals::{
    config::GameConfig,
    core::{catalog, Alignment, Side},
    game::{
        Command, GameLoop, GameSnapshot, GameState, HeuristicController, InteractiveController,
        PlayerController, RandomController, VerbosityLevel, ZeroController,
    },
    session::GameSession,
    tournament::{run_tourney, ControllerType},
};
use std::io::BufRead;
use std::path::PathBuf;

/// Controller for a seat in `play`
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SeatType {
    /// Always chooses the first legal option
    Zero,
    /// Makes random choices
    Random,
    /// The reference AI
    Heuristic,
    /// Human player typing commands on stdin
    Tui,
}

/// Verbosity level for game output (accepts names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Options shared by every game-running subcommand
#[derive(clap::Args, Debug)]
struct GameArgs {
    /// JSON game configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Set random seed for deterministic games
    #[arg(long)]
    seed: Option<u64>,

    /// Round limit
    #[arg(long)]
    rounds: Option<u32>,
}

impl GameArgs {
    /// Config file values overridden by flags
    fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GameConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[derive(Parser)]
#[command(name = "seals")]
#[command(about = "Seven Seals - Light versus Dark over seven seals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two seats
    Play {
        /// Player seat
        #[arg(long, value_enum, default_value = "tui")]
        p1: SeatType,

        /// Enemy seat
        #[arg(long, value_enum, default_value = "heuristic")]
        p2: SeatType,

        /// Player allegiance (asked at setup when omitted)
        #[arg(long)]
        side: Option<String>,

        /// Output verbosity (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityArg,

        #[command(flatten)]
        game: GameArgs,
    },

    /// Run many AI games in parallel and report statistics
    Tourney {
        /// Number of games
        #[arg(long, default_value_t = 1000)]
        games: usize,

        #[arg(long, value_enum, default_value = "heuristic")]
        p1: ControllerType,

        #[arg(long, value_enum, default_value = "heuristic")]
        p2: ControllerType,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        game: GameArgs,
    },

    /// Play through the async session host, printing each snapshot
    Watch {
        /// Enemy seat
        #[arg(long, value_enum, default_value = "heuristic")]
        enemy: ControllerType,

        #[command(flatten)]
        game: GameArgs,
    },

    /// List the card catalog
    Cards {
        /// Only one pool (light or dark)
        #[arg(long)]
        pool: Option<String>,
    },
}

fn parse_alignment(text: &str) -> Result<Alignment> {
    match text.to_lowercase().as_str() {
        "light" => Ok(Alignment::Light),
        "dark" => Ok(Alignment::Dark),
        other => anyhow::bail!("unknown allegiance '{other}' (expected light or dark)"),
    }
}

fn build_seat(kind: SeatType, side: Side, seed: Option<u64>) -> Box<dyn PlayerController> {
    match (kind, seed) {
        (SeatType::Zero, _) => Box::new(ZeroController::new(side)),
        (SeatType::Random, Some(seed)) => Box::new(RandomController::with_seed(side, seed)),
        (SeatType::Random, None) => Box::new(RandomController::new(side)),
        (SeatType::Heuristic, Some(seed)) => Box::new(HeuristicController::with_seed(side, seed)),
        (SeatType::Heuristic, None) => Box::new(HeuristicController::new(side)),
        (SeatType::Tui, _) => Box::new(InteractiveController::new(side)),
    }
}

fn run_play(
    p1: SeatType,
    p2: SeatType,
    side: Option<String>,
    verbosity: VerbosityLevel,
    config: GameConfig,
) -> Result<()> {
    println!("=== Seven Seals ===\n");
    let seed = config.seed;
    let mut game = GameState::new(config);
    if let Some(side) = side {
        game.set_allegiance(parse_alignment(&side)?)?;
    }
    let mut player = build_seat(p1, Side::Player, seed.map(|s| s.wrapping_add(1)));
    let mut enemy = build_seat(p2, Side::Enemy, seed.map(|s| s.wrapping_add(2)));

    let result = GameLoop::new(&mut game)
        .with_verbosity(verbosity)
        .run_game(&mut *player, &mut *enemy)?;

    println!("\n=== Game Over ===");
    match result.winner {
        Some(winner) => println!(
            "{winner} ({}) wins by {}",
            result.allegiance[winner.index()],
            result.end_reason
        ),
        None => println!("Draw ({})", result.end_reason),
    }
    println!(
        "Seals: Player {} - Enemy {} after {} rounds",
        result.seals[0], result.seals[1], result.rounds_played
    );
    Ok(())
}

fn print_snapshot(snapshot: &GameSnapshot) {
    for line in snapshot.log.iter().rev().take(6).rev() {
        println!("  {line}");
    }
    for seal in &snapshot.seals {
        let name = |card: &Option<seven_seals::game::CardView>| match card {
            Some(card) => card.name.unwrap_or("face-down").to_string(),
            None => "-".to_string(),
        };
        println!(
            "Seal {} [{}] champion {} | Player {} | Enemy {}",
            seal.index + 1,
            seal.alignment,
            name(&seal.champion),
            name(&seal.player_slot),
            name(&seal.enemy_slot)
        );
    }
    let hand: Vec<String> = snapshot
        .side(Side::Player)
        .hand
        .iter()
        .map(|c| format!("{}:{}", c.id, c.name.unwrap_or("?")))
        .collect();
    println!("Hand: {}", hand.join(" "));
    println!("> {}", snapshot.instruction);
}

async fn run_watch(enemy: ControllerType, config: GameConfig) -> Result<()> {
    let seed = config.seed.unwrap_or(0);
    let mut session = GameSession::start(config, enemy, seed);
    let sender = session
        .command_sender()
        .context("session closed before it started")?;

    // Detached reader: it may stay blocked on stdin after the game ends
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match line.parse::<Command>() {
                Ok(command) => {
                    if sender.send(command).is_err() {
                        break;
                    }
                }
                Err(err) => eprintln!("{err}"),
            }
        }
    });

    while let Some(snapshot) = session.next_decision().await? {
        print_snapshot(&snapshot);
    }
    let result = session.finish().await?;
    println!("\n{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_cards(pool: Option<String>) -> Result<()> {
    let pools = match pool {
        Some(text) => vec![parse_alignment(&text)?],
        None => vec![Alignment::Light, Alignment::Dark],
    };
    for alignment in pools {
        println!("=== {alignment} ===");
        for card in catalog::pool(alignment) {
            println!(
                "{:<15} {:>2}  {:?}{}  {}",
                card.name,
                card.base_power,
                card.card_type,
                if card.is_champion { " (champion)" } else { "" },
                card.ability_text
            );
        }
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            p1,
            p2,
            side,
            verbosity,
            game,
        } => run_play(p1, p2, side, verbosity.into(), game.resolve()?)?,
        Commands::Tourney {
            games,
            p1,
            p2,
            json,
            game,
        } => {
            let config = game.resolve()?;
            let seed = config.seed.unwrap_or(42);
            println!("=== Seven Seals - Tournament Mode ===");
            println!("Running {games} games, P1={p1:?} P2={p2:?}, seed {seed}");
            let report = tokio::task::spawn_blocking(move || run_tourney(games, p1, p2, seed, &config))
                .await
                .context("tournament task panicked")??;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print();
            }
        }
        Commands::Watch { enemy, game } => run_watch(enemy, game.resolve()?).await?,
        Commands::Cards { pool } => run_cards(pool)?,
    }

    Ok(())
}
