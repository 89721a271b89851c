use anyhow::Context;
use clap::Parser;
use take6::config::Settings;
use take6::events::GameEvent;
use take6::game::Game;
use take6::player::Player;
use tracing_subscriber::EnvFilter;

/// Simulate a Take 6 game between bots.
#[derive(Debug, Parser)]
#[command(name = "take6", version = take6::VERSION)]
struct Args {
    /// Number of bot players; the deck is resized so the deal fits.
    #[arg(long, default_value_t = 4)]
    players: usize,
    /// Seed for shuffles and bot decisions.
    #[arg(long)]
    seed: Option<u64>,
    /// Score every player must reach before the game ends.
    #[arg(long, default_value_t = 66)]
    max_score: u32,
    /// Give up after this many rounds.
    #[arg(long)]
    round_limit: Option<u32>,
    /// Print every flush and cry as it happens.
    #[arg(long)]
    verbose: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error if a global subscriber is already set
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut settings = Settings::default()
        .with_max_score(args.max_score)
        .with_round_limit(args.round_limit);
    if settings.deal_size(args.players) > settings.max_cards as usize {
        settings = settings.sized_for(args.players);
    }
    let players = (0..args.players)
        .map(|i| match args.seed {
            Some(seed) => Player::seeded(format!("Bot {}", i + 1), seed.wrapping_add(i as u64 + 1)),
            None => Player::automated(format!("Bot {}", i + 1)),
        })
        .collect();

    let mut game = Game::with_settings(players, settings).context("invalid table settings")?;
    if let Some(seed) = args.seed {
        game = game.with_seed(seed);
    }
    if args.verbose {
        game.subscribe(|event| match event {
            GameEvent::RowFlushed { round, turn, row, points, .. } => {
                println!("round {round} turn {}: row {} flushed for {points} pts", turn + 1, row + 1)
            }
            GameEvent::PlayerCried { round, turn, row, points, .. } => {
                println!("round {round} turn {}: cry, row {} taken for {points} pts", turn + 1, row + 1)
            }
            _ => {}
        });
    }

    let standings = game.start().context("game aborted")?;
    println!("Finished after {} rounds", game.rounds_played());
    for s in &standings {
        println!("{:>2}. {:<8} {:>4}", s.rank, s.name, s.score);
    }
    Ok(())
}
