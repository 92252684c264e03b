//! Command channel between input producers and the tick thread.
//!
//! A bounded multi-producer/single-consumer queue of raw command codes built
//! on `tokio::sync::mpsc`. Neither side ever blocks: producers use
//! `try_send` and a saturated queue rejects the newest command, the consumer
//! drains with `try_recv`. No async runtime is needed for either call.

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};

use crate::types::{Command, SendError};

/// Create a command channel holding at most `capacity` pending codes
pub fn command_channel(capacity: usize) -> (CommandSender, CommandReceiver) {
    let capacity = capacity.max(1);
    let (tx, rx) = mpsc::channel::<u8>(capacity);
    (CommandSender { tx }, CommandReceiver { rx, capacity })
}

/// Producer handle; cheap to clone, one per input source
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<u8>,
}

impl CommandSender {
    pub fn send(&self, command: Command) -> Result<(), SendError> {
        self.send_code(command.code())
    }

    /// Push a raw code; unknown codes are accepted and ignored on drain
    pub fn send_code(&self, code: u8) -> Result<(), SendError> {
        self.tx.try_send(code).map_err(|err| match err {
            TrySendError::Full(code) => {
                log::debug!("command queue full, dropping code {}", code);
                SendError::Full(code)
            }
            TrySendError::Closed(_) => SendError::Closed,
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer handle, owned by the controller
#[derive(Debug)]
pub struct CommandReceiver {
    rx: mpsc::Receiver<u8>,
    capacity: usize,
}

impl CommandReceiver {
    /// Next pending code, never waits
    pub fn try_recv(&mut self) -> Option<u8> {
        match self.rx.try_recv() {
            Ok(code) => Some(code),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Upper bound on codes taken in one drain
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_order() {
        let (tx, mut rx) = command_channel(8);
        tx.send(Command::Left).unwrap();
        tx.send(Command::Pause).unwrap();
        tx.send_code(42).unwrap();

        assert_eq!(rx.try_recv(), Some(1));
        assert_eq!(rx.try_recv(), Some(6));
        assert_eq!(rx.try_recv(), Some(42));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn full_queue_drops_newest() {
        let (tx, mut rx) = command_channel(2);
        tx.send(Command::Left).unwrap();
        tx.send(Command::Right).unwrap();
        assert_eq!(tx.send(Command::Down), Err(SendError::Full(5)));

        assert_eq!(rx.try_recv(), Some(1));
        assert_eq!(rx.try_recv(), Some(2));
        assert_eq!(rx.try_recv(), None);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let (tx, rx) = command_channel(0);
        assert_eq!(rx.capacity(), 1);
        assert!(tx.send(Command::Left).is_ok());
    }

    #[test]
    fn closed_after_receiver_drop() {
        let (tx, rx) = command_channel(4);
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.send(Command::Left), Err(SendError::Closed));
    }

    #[test]
    fn producers_on_other_threads() {
        let (tx, mut rx) = command_channel(64);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tx = tx.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        tx.send(Command::Right).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let mut count = 0;
        while rx.try_recv().is_some() {
            count += 1;
        }
        assert_eq!(count, 40);
    }
}
