//! Scripted player driving a session through its [Mailbox].

use crate::{Mailbox, MailboxError, ValidatedPreset};
use ascent_types::crash::{History, Multiplier, Phase, SlotId};
use commonware_runtime::Clock;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Cash-out targets for manually played slots, in hundredths.
const MANUAL_TARGETS: std::ops::Range<u32> = 110..300;

/// State of the session when the driver stopped.
#[derive(Debug)]
pub struct Summary {
    pub rounds: u64,
    pub balance: u64,
    pub history: History,
}

/// A slot the driver plays by hand.
struct Manual {
    slot: SlotId,
    target: Multiplier,
    placed: bool,
    cashed: bool,
}

/// Apply `presets` to the leading slots and play every remaining slot by
/// hand until `rounds` round boundaries have passed.
pub async fn run<E: Clock>(
    context: &E,
    mailbox: &mut Mailbox,
    presets: &[ValidatedPreset],
    slots: usize,
    tick: Duration,
    rounds: u64,
    rng: &mut impl Rng,
) -> Result<Summary, MailboxError> {
    for (slot, preset) in presets.iter().enumerate() {
        mailbox
            .configure(slot, preset.stake, preset.auto_cashout)
            .await?;
        mailbox.set_auto_bet(slot, preset.auto_bet).await?;
    }
    let mut manual: Vec<Manual> = (presets.len()..slots)
        .map(|slot| Manual {
            slot,
            target: Multiplier::ONE,
            placed: false,
            cashed: false,
        })
        .collect();

    let mut completed = 0;
    let mut current = None;
    let balance = loop {
        context.sleep(tick).await;
        let snapshot = mailbox.snapshot().await?;

        if current != Some(snapshot.round_id) {
            if current.is_some() {
                completed += 1;
            }
            current = Some(snapshot.round_id);
            if completed >= rounds {
                break snapshot.balance;
            }
            for lane in &mut manual {
                lane.target = Multiplier::from_hundredths(rng.gen_range(MANUAL_TARGETS));
                lane.placed = false;
                lane.cashed = false;
            }
            debug!(round_id = snapshot.round_id, completed, "driver observed new round");
        }

        match snapshot.phase {
            Phase::Betting => {
                for lane in manual.iter_mut().filter(|lane| !lane.placed) {
                    mailbox.place_bet(lane.slot).await?;
                    lane.placed = true;
                }
            }
            Phase::Flying => {
                for lane in manual.iter_mut().filter(|lane| lane.placed && !lane.cashed) {
                    if snapshot.displayed_multiplier >= lane.target {
                        mailbox.cash_out(lane.slot).await?;
                        lane.cashed = true;
                    }
                }
            }
            Phase::Crashed => {}
        }
    };

    let history = mailbox.history().await?;
    info!(rounds = completed, balance, "autoplay finished");
    Ok(Summary {
        rounds: completed,
        balance,
        history,
    })
}
