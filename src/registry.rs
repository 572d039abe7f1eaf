//! Ownership of hardware timer channels.
//!
//! Each device claims the timer channel its tick source runs on. A second
//! claim on the same channel fails until the first claim is dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use heapless::{FnvIndexMap, String};

use crate::error::{Error, Result, StateError};

/// Maximum number of channels tracked at once.
pub const MAX_CHANNELS: usize = 8;

type Claims = FnvIndexMap<u8, String<32>, MAX_CHANNELS>;

/// Registry of claimed timer channels.
#[derive(Debug, Default)]
pub struct TimerChannels {
    claims: Mutex<Claims>,
}

impl TimerChannels {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, Claims> {
        self.claims.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim `channel` for `owner`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::ChannelClaimed` if the channel is taken or the
    /// registry is full.
    pub fn claim(self: &Arc<Self>, channel: u8, owner: &str) -> Result<ChannelClaim> {
        let mut claims = self.lock();
        if let Some(holder) = claims.get(&channel) {
            warn!("timer channel {} already held by {}", channel, holder.as_str());
            return Err(Error::State(StateError::ChannelClaimed(channel)));
        }

        let mut name = String::new();
        for c in owner.chars() {
            if name.push(c).is_err() {
                break;
            }
        }
        claims
            .insert(channel, name)
            .map_err(|_| Error::State(StateError::ChannelClaimed(channel)))?;
        debug!("timer channel {} claimed by {}", channel, owner);

        Ok(ChannelClaim {
            registry: Arc::clone(self),
            channel,
        })
    }

    /// Whether `channel` is currently claimed.
    pub fn is_claimed(&self, channel: u8) -> bool {
        self.lock().contains_key(&channel)
    }

    /// Name of the current owner of `channel`.
    pub fn owner(&self, channel: u8) -> Option<String<32>> {
        self.lock().get(&channel).cloned()
    }
}

/// A claimed timer channel, released on drop.
#[derive(Debug)]
pub struct ChannelClaim {
    registry: Arc<TimerChannels>,
    channel: u8,
}

impl ChannelClaim {
    /// The claimed channel.
    pub fn channel(&self) -> u8 {
        self.channel
    }
}

impl Drop for ChannelClaim {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.channel);
        debug!("timer channel {} released", self.channel);
    }
}
