//! Entitlement gate consulted before a session may start its first round.
//!
//! The core performs no payment or identity checks of its own; a driver plugs
//! in whatever decides that the player may play.

/// Yields the "may play" signal for a session.
pub trait Entitlement {
    fn may_play(&self) -> bool;
}

/// Always grants play.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreePlay;

impl Entitlement for FreePlay {
    fn may_play(&self) -> bool {
        true
    }
}

/// Never grants play.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locked;

impl Entitlement for Locked {
    fn may_play(&self) -> bool {
        false
    }
}

impl Entitlement for bool {
    fn may_play(&self) -> bool {
        *self
    }
}
