use ascent_execution::Command;
use ascent_types::crash::{BetSlot, History, Multiplier, SlotId, Snapshot};
use futures::{
    channel::{mpsc, oneshot},
    SinkExt,
};
use thiserror::Error;

pub enum Message {
    /// Player input, applied on the next tick.
    Command(Command),
    Snapshot {
        response: oneshot::Sender<Snapshot>,
    },
    History {
        response: oneshot::Sender<History>,
    },
    Slots {
        response: oneshot::Sender<Vec<BetSlot>>,
    },
}

#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::Sender<Message>,
}

#[derive(Debug, Error)]
pub enum MailboxError {
    #[error("session mailbox closed")]
    Closed,
    #[error("session request canceled")]
    Canceled,
}

impl Mailbox {
    pub(super) fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    async fn command(&mut self, command: Command) -> Result<(), MailboxError> {
        self.sender
            .send(Message::Command(command))
            .await
            .map_err(|_| MailboxError::Closed)
    }

    async fn request<T>(
        &mut self,
        message: impl FnOnce(oneshot::Sender<T>) -> Message,
    ) -> Result<T, MailboxError> {
        let (sender, receiver) = oneshot::channel();
        self.sender
            .send(message(sender))
            .await
            .map_err(|_| MailboxError::Closed)?;
        receiver.await.map_err(|_| MailboxError::Canceled)
    }

    pub async fn configure(
        &mut self,
        slot: SlotId,
        stake: u64,
        auto_cashout: Option<Multiplier>,
    ) -> Result<(), MailboxError> {
        self.command(Command::Configure {
            slot,
            stake,
            auto_cashout,
        })
        .await
    }

    pub async fn set_auto_bet(&mut self, slot: SlotId, enabled: bool) -> Result<(), MailboxError> {
        self.command(Command::SetAutoBet { slot, enabled }).await
    }

    pub async fn place_bet(&mut self, slot: SlotId) -> Result<(), MailboxError> {
        self.command(Command::PlaceBet { slot }).await
    }

    pub async fn cash_out(&mut self, slot: SlotId) -> Result<(), MailboxError> {
        self.command(Command::CashOut { slot }).await
    }

    /// Snapshot produced by the most recent tick.
    pub async fn snapshot(&mut self) -> Result<Snapshot, MailboxError> {
        self.request(|response| Message::Snapshot { response }).await
    }

    pub async fn history(&mut self) -> Result<History, MailboxError> {
        self.request(|response| Message::History { response }).await
    }

    pub async fn slots(&mut self) -> Result<Vec<BetSlot>, MailboxError> {
        self.request(|response| Message::Slots { response }).await
    }
}
