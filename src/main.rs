//! Cachex self-play driver
//!
//! Acts as the referee for two agents: asks the side to move for an action,
//! reports it to both agents and stops on a connection, a full board or the
//! turn limit.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cachex::{Agent, AgentConfig, GameError, Player};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cachex self-play driver", long_about = None)]
struct Args {
    /// Board edge length
    #[arg(short, long, default_value_t = 7)]
    size: u8,

    /// Search depth, overriding the config file
    #[arg(short, long)]
    depth: Option<u8>,

    /// Seed for the opening draws
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Agent configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AgentConfig::default(),
    };
    if let Some(depth) = args.depth {
        config.search.depth = depth;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let blue_config = AgentConfig {
        seed: config.seed.map(|seed| seed.wrapping_add(1)),
        ..config.clone()
    };
    let mut red = Agent::with_config(Player::Red, args.size, config.clone())?;
    let mut blue = Agent::with_config(Player::Blue, args.size, blue_config)?;

    info!(
        size = args.size,
        depth = config.search.depth,
        swap_rule = ?config.swap_rule,
        "starting self-play"
    );

    let mut winner = None;
    for turn in 1..=args.max_turns {
        let actor = red.state().to_move();
        let agent = match actor {
            Player::Red => &mut red,
            Player::Blue => &mut blue,
        };

        let decision = match agent.decide() {
            Ok(decision) => decision,
            Err(GameError::NoLegalMoves) => {
                info!(turn, %actor, "no legal moves left");
                break;
            }
            Err(e) => return Err(e.into()),
        };
        info!(
            turn,
            %actor,
            action = %decision.action,
            kind = ?decision.kind,
            score = decision.score,
            nodes = decision.nodes,
            time_ms = decision.time_ms,
            "move"
        );

        red.notify(actor, decision.action)?;
        blue.notify(actor, decision.action)?;

        winner = red.state().winner();
        if winner.is_some() {
            break;
        }
    }

    let turns = red.state().turn();
    let stones = red.state().board().stone_count();
    match winner {
        Some(player) => info!(winner = %player, turns, stones, "game over"),
        None => info!(turns, stones, "game ended without a connection"),
    }
    println!("{}", red.state().board());

    Ok(())
}
