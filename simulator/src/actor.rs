use crate::ingress::{Mailbox, Message};
use ascent_execution::{
    execute, Frame, Session, TimelineOracle, TransactionLog, Transition, WalletGateway,
};
use ascent_types::crash::{GameConfig, SlotOutcome, WalletOutcome};
use commonware_macros::select;
use commonware_runtime::{Clock, Handle, Metrics, Spawner};
use commonware_utils::SystemTimeExt;
use futures::{channel::mpsc, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the session [Actor].
pub struct Config<W: WalletGateway, L: TransactionLog> {
    pub wallet: W,
    pub log: L,
    pub user: String,
    pub game: GameConfig,
    pub tick: Duration,
    pub mailbox_size: usize,
    pub default_stake: u64,
    pub starting_balance: u64,
}

/// Runs one player's [Session] at a fixed tick rate.
pub struct Actor<E: Clock + Spawner + Metrics, W: WalletGateway, L: TransactionLog> {
    context: E,
    config: Config<W, L>,
    mailbox: mpsc::Receiver<Message>,
}

impl<E: Clock + Spawner + Metrics, W: WalletGateway, L: TransactionLog> Actor<E, W, L> {
    pub fn new(context: E, config: Config<W, L>) -> (Self, Mailbox) {
        let (sender, mailbox) = mpsc::channel(config.mailbox_size);
        (
            Self {
                context,
                config,
                mailbox,
            },
            Mailbox::new(sender),
        )
    }

    pub fn start(self) -> Handle<()> {
        self.context.clone().spawn(|_| self.run())
    }

    async fn run(mut self) {
        let mut session = Session::new(
            TimelineOracle::new(self.config.game),
            self.config.default_stake,
            self.config.starting_balance,
        );
        let (outcome_sender, mut outcomes) = mpsc::unbounded::<WalletOutcome>();

        // Tick once up front so there is always a snapshot to serve
        let frame = session.tick(self.context.current().epoch_millis(), &[]);
        let mut snapshot = frame.snapshot;
        self.dispatch(frame, &outcome_sender);
        info!(
            user = %self.config.user,
            round_id = snapshot.round_id,
            balance = snapshot.balance,
            "session started"
        );

        let mut deadline = self.context.current() + self.config.tick;
        loop {
            select! {
                _ = self.context.sleep_until(deadline) => {
                    let now = self.context.current();
                    deadline = now + self.config.tick;
                    let frame = session.tick(now.epoch_millis(), &[]);
                    snapshot = frame.snapshot;
                    self.dispatch(frame, &outcome_sender);
                },
                outcome = outcomes.next() => {
                    // A sender is always held locally
                    let Some(outcome) = outcome else {
                        return;
                    };
                    session.apply(outcome);
                },
                message = self.mailbox.next() => {
                    let Some(message) = message else {
                        info!(user = %self.config.user, balance = session.balance(), "mailbox closed, stopping session");
                        return;
                    };
                    match message {
                        Message::Command(command) => {
                            // Apply at the instant of arrival so a cash-out is priced at the click
                            let frame = session.tick(self.context.current().epoch_millis(), &[command]);
                            snapshot = frame.snapshot;
                            self.dispatch(frame, &outcome_sender);
                        }
                        Message::Snapshot { response } => {
                            let _ = response.send(snapshot);
                        }
                        Message::History { response } => {
                            let _ = response.send(session.history().clone());
                        }
                        Message::Slots { response } => {
                            let _ = response.send(session.slots().to_vec());
                        }
                    }
                },
            }
        }
    }

    /// Report a frame and spawn its wallet operations.
    fn dispatch(&self, frame: Frame, outcomes: &mpsc::UnboundedSender<WalletOutcome>) {
        for transition in &frame.transitions {
            match transition {
                Transition::RoundStarted { round_id, previous } => {
                    info!(round_id, previous = ?previous.map(|entry| entry.crash_point.to_string()), "round started");
                }
                Transition::FlightStarted { round_id } => debug!(round_id, "flight started"),
                Transition::Crashed {
                    round_id,
                    crash_point,
                } => info!(round_id, %crash_point, "crashed"),
            }
        }
        for outcome in &frame.outcomes {
            match outcome {
                SlotOutcome::Won {
                    slot,
                    round_id,
                    multiplier,
                    payout,
                } => info!(slot, round_id, %multiplier, payout, "won"),
                SlotOutcome::Lost {
                    slot,
                    round_id,
                    crash_point,
                    stake,
                } => info!(slot, round_id, %crash_point, stake, "lost"),
                SlotOutcome::Voided {
                    slot,
                    round_id,
                    payout,
                } => warn!(slot, round_id, payout, "win voided"),
            }
        }
        for error in &frame.errors {
            warn!(%error, "slot notice");
        }

        for request in frame.requests {
            self.context.with_label("wallet").spawn({
                let wallet = self.config.wallet.clone();
                let log = self.config.log.clone();
                let user = self.config.user.clone();
                let outcomes = outcomes.clone();
                move |_| async move {
                    let outcome = execute(&wallet, &log, &user, &request).await;
                    if outcomes.unbounded_send(outcome).is_err() {
                        debug!(ticket = request.ticket(), "session stopped, dropping wallet outcome");
                    }
                }
            });
        }
    }
}
