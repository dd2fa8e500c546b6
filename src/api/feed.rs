use std::sync::mpsc::{self, Receiver, Sender};

use crate::core::Measurement;

/// Message pushed by a transport or simulator toward the owning session.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    Measurement(Measurement),
    /// Link status of the source. The session only forwards it to observers.
    ConnectionChanged {
        connected: bool,
        error: Option<String>,
    },
}

/// Sending half, cloneable into transport threads.
#[derive(Debug, Clone)]
pub struct FeedSender {
    sender: Sender<FeedMessage>,
}

/// Receiving half, drained on the session's owner thread.
#[derive(Debug)]
pub struct FeedReceiver {
    receiver: Receiver<FeedMessage>,
}

/// Creates an unbounded feed channel.
#[must_use]
pub fn feed_channel() -> (FeedSender, FeedReceiver) {
    let (sender, receiver) = mpsc::channel();
    (FeedSender { sender }, FeedReceiver { receiver })
}

impl FeedSender {
    /// Returns `false` once the receiving side is gone.
    pub fn send(&self, message: FeedMessage) -> bool {
        self.sender.send(message).is_ok()
    }

    pub fn send_measurement(&self, measurement: Measurement) -> bool {
        self.send(FeedMessage::Measurement(measurement))
    }

    pub fn send_connection(&self, connected: bool, error: Option<String>) -> bool {
        self.send(FeedMessage::ConnectionChanged { connected, error })
    }
}

impl FeedReceiver {
    /// Takes every queued message without blocking, in arrival order.
    pub fn drain(&self) -> impl Iterator<Item = FeedMessage> + '_ {
        self.receiver.try_iter()
    }
}
