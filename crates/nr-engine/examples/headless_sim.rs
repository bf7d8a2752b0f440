//! Headless session simulator
//!
//! Runs a seeded auto-spin session at instant timing and prints the session
//! statistics. Useful for eyeballing RTP and hit rate after paytable edits.
//!
//! Usage: cargo run --example headless_sim [spins] [seed]

use std::sync::Arc;

use parking_lot::Mutex;

use nr_engine::{GameConfig, GameSession};
use nr_events::NullSink;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let spins: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(10_000);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let mut config = GameConfig::instant();
    // Enough balance that variance, not ruin, decides the run.
    config.starting_balance = u64::MAX / 2;
    config.auto_spin.limit = Some(spins);

    let sink = Arc::new(Mutex::new(NullSink));
    let mut session = match GameSession::new(config, sink) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("invalid config: {e}");
            std::process::exit(1);
        }
    };
    session.seed(seed);

    log::info!("simulating {spins} spins (seed {seed})");
    session.toggle_auto_spin();
    session.run_until_idle();

    let stats = session.machine().stats();
    println!("spins:          {}", stats.total_spins);
    println!("total bet:      {}", stats.total_bet);
    println!("total win:      {}", stats.total_win);
    println!("rtp:            {:.2}%", stats.rtp());
    println!("hit rate:       {:.2}%", stats.hit_rate());
    println!("bonus rounds:   {}", stats.bonus_rounds_triggered);
    println!("jackpots:       {}", stats.jackpots_won);
    println!("max win ratio:  {:.1}x", stats.max_win_ratio);
}
