use thiserror::Error;

use crate::paddle::press::Paddle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaddleError {
    #[error("a paddle is already active; retire it before activating another")]
    AlreadyActive,
}

/// Holds the single paddle allowed to receive input. A new paddle can only
/// be activated once the previous one has been retired.
#[derive(Default)]
pub struct PaddleRegistry {
    active: Option<Paddle>,
}

impl PaddleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `paddle` and makes it the active one.
    pub fn activate(&mut self, mut paddle: Paddle) -> Result<&mut Paddle, PaddleError> {
        if self.active.is_some() {
            return Err(PaddleError::AlreadyActive);
        }
        paddle.enable();
        Ok(self.active.insert(paddle))
    }

    /// Disables and hands back the active paddle. A no-op when none is active.
    pub fn retire(&mut self) -> Option<Paddle> {
        let mut paddle = self.active.take()?;
        paddle.disable();
        Some(paddle)
    }

    pub fn active(&self) -> Option<&Paddle> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut Paddle> {
        self.active.as_mut()
    }

    pub fn has_active(&self) -> bool {
        self.active.is_some()
    }
}
