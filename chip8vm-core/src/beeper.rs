use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

/// The audio collaborator. `play` is called once per cycle while the sound
/// timer is running and `pause` once per cycle while it is not. Neither call
/// may block the cycle.
pub trait Chip8Beeper {
    fn play(&mut self);
    fn pause(&mut self) {}
}

/// Discards every tone request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBeeper;

impl Chip8Beeper for SilentBeeper {
    fn play(&mut self) {}
}

/// Forwards tone requests over a bounded channel. A request that finds the
/// channel full, or the receiver gone, is dropped.
#[derive(Debug, Clone)]
pub struct ChannelBeeper {
    sender: SyncSender<()>,
}

impl ChannelBeeper {
    /// Beeper plus the receiving end for the audio thread. `capacity` of 1
    /// gives at-most-one-in-flight delivery.
    pub fn channel(capacity: usize) -> (Self, Receiver<()>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (Self { sender }, receiver)
    }
}

impl Chip8Beeper for ChannelBeeper {
    fn play(&mut self) {
        match self.sender.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => {
                tracing::debug!("tone request dropped, audio collaborator busy");
            }
            Err(TrySendError::Disconnected(())) => {
                tracing::trace!("tone request dropped, audio collaborator gone");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let (mut beeper, receiver) = ChannelBeeper::channel(1);
        beeper.play();
        beeper.play();
        beeper.play();
        assert_eq!(receiver.try_iter().count(), 1);
        beeper.play();
        assert!(receiver.try_recv().is_ok());
    }

    #[test]
    fn disconnected_receiver_is_ignored() {
        let (mut beeper, receiver) = ChannelBeeper::channel(1);
        drop(receiver);
        beeper.play();
        beeper.pause();
    }
}
