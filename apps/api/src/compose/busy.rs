//! Per-action busy flags for the compose session.
//!
//! Each action class (sending, improving, generating) admits one outstanding
//! operation. The guard clears its flag on drop, so no branch — success,
//! error, or unwind — can leave the session stuck busy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Sending,
    Improving,
    Generating,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::Sending => "send",
            Action::Improving => "improve",
            Action::Generating => "generate",
        }
    }
}

#[derive(Debug, Default)]
pub struct BusyFlags {
    sending: AtomicBool,
    improving: AtomicBool,
    generating: AtomicBool,
}

impl BusyFlags {
    /// Claims the flag for `action`, or fails with 409 when an operation of
    /// the same class is already in flight.
    pub fn acquire(self: &Arc<Self>, action: Action) -> Result<BusyGuard, AppError> {
        if self.flag(action).swap(true, Ordering::AcqRel) {
            return Err(AppError::Busy(action.label()));
        }
        Ok(BusyGuard {
            flags: Arc::clone(self),
            action,
        })
    }

    pub fn is_busy(&self, action: Action) -> bool {
        self.flag(action).load(Ordering::Acquire)
    }

    fn flag(&self, action: Action) -> &AtomicBool {
        match action {
            Action::Sending => &self.sending,
            Action::Improving => &self.improving,
            Action::Generating => &self.generating,
        }
    }
}

/// RAII claim on one action class. Dropping it resolves the busy flag.
pub struct BusyGuard {
    flags: Arc<BusyFlags>,
    action: Action,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flags.flag(self.action).store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_of_same_class_is_rejected() {
        let flags = Arc::new(BusyFlags::default());
        let _guard = flags.acquire(Action::Sending).unwrap();
        assert!(matches!(
            flags.acquire(Action::Sending),
            Err(AppError::Busy("send"))
        ));
    }

    #[test]
    fn test_different_classes_do_not_block_each_other() {
        let flags = Arc::new(BusyFlags::default());
        let _send = flags.acquire(Action::Sending).unwrap();
        let _gen = flags.acquire(Action::Generating).unwrap();
        assert!(flags.is_busy(Action::Sending));
        assert!(flags.is_busy(Action::Generating));
        assert!(!flags.is_busy(Action::Improving));
    }

    #[test]
    fn test_drop_resolves_the_flag() {
        let flags = Arc::new(BusyFlags::default());
        {
            let _guard = flags.acquire(Action::Improving).unwrap();
            assert!(flags.is_busy(Action::Improving));
        }
        assert!(!flags.is_busy(Action::Improving));
        assert!(flags.acquire(Action::Improving).is_ok());
    }

    #[test]
    fn test_flag_resolves_on_the_error_path() {
        let flags = Arc::new(BusyFlags::default());
        let failing: Result<(), ()> = (|| {
            let _guard = flags.acquire(Action::Sending).unwrap();
            Err(())
        })();
        assert!(failing.is_err());
        assert!(!flags.is_busy(Action::Sending));
    }
}
