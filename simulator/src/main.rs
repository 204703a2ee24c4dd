use anyhow::Context;
use ascent_simulator::{
    actor, autoplay,
    ledger::{Ledger, TracingLog},
    Actor, Config,
};
use clap::Parser;
use commonware_runtime::{tokio, Metrics, Runner};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration.
    #[arg(short, long)]
    config: PathBuf,

    /// Number of rounds to play before exiting.
    #[arg(short, long, default_value_t = 10)]
    rounds: u64,

    /// Seed for the scripted player and the ledger's simulated outages.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    let config: Config = serde_yaml::from_str(&raw).context("failed to parse config")?;
    let config = config.validate().context("invalid config")?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    // Open the player's account
    let ledger = Ledger::new(args.seed, config.wallet_failure_rate);
    ledger
        .open(&config.user, config.starting_balance)
        .context("failed to open account")?;

    // Start runtime
    let executor = tokio::Runner::new(tokio::Config::default());
    executor.start(|context| async move {
        let (session, mut mailbox) = Actor::new(
            context.with_label("session"),
            actor::Config {
                wallet: ledger.clone(),
                log: TracingLog,
                user: config.user.clone(),
                game: config.game,
                tick: config.tick,
                mailbox_size: config.mailbox_size,
                default_stake: config.default_stake,
                starting_balance: config.starting_balance,
            },
        );
        let handle = session.start();

        let mut rng = StdRng::seed_from_u64(args.seed);
        let summary = autoplay::run(
            &context,
            &mut mailbox,
            &config.slots,
            config.game.slots,
            config.tick,
            args.rounds,
            &mut rng,
        )
        .await
        .context("session stopped unexpectedly")?;

        let history = summary
            .history
            .iter()
            .map(|entry| entry.crash_point.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        info!(
            rounds = summary.rounds,
            balance = summary.balance,
            ledger = ?ledger.balance(&config.user),
            %history,
            "simulation finished"
        );

        // Closing the mailbox stops the session
        drop(mailbox);
        handle.await.context("session task failed")?;
        Ok::<_, anyhow::Error>(())
    })
}
