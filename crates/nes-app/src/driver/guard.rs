use std::cell::Cell;
use std::rc::Rc;

/// Flag that keeps at most one frame cycle in flight
///
/// Owned by the frame driver and only touched from its thread, so a `Cell` is
/// enough. The flag is only ever set through [`LoopGuard::try_acquire`] and only
/// cleared when the returned token drops.
#[derive(Clone, Default)]
pub struct LoopGuard {
    busy: Rc<Cell<bool>>,
}

impl LoopGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.busy.get()
    }

    /// Takes the guard, or `None` if a cycle already holds it
    pub fn try_acquire(&self) -> Option<GuardToken> {
        if self.busy.replace(true) {
            return None;
        }
        Some(GuardToken {
            busy: self.busy.clone(),
        })
    }
}

/// Proof of holding the [`LoopGuard`]; releases it on drop, including on `?` and unwinding
#[must_use = "the guard is released as soon as the token drops"]
pub struct GuardToken {
    busy: Rc<Cell<bool>>,
}

impl Drop for GuardToken {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let guard = LoopGuard::new();
        let token = guard.try_acquire();
        assert!(token.is_some());
        assert!(guard.is_held());
        assert!(guard.try_acquire().is_none());
        // a failed acquire must not clear the flag
        assert!(guard.is_held());
    }

    #[test]
    fn test_drop_releases() {
        let guard = LoopGuard::new();
        {
            let _token = guard.try_acquire().unwrap();
        }
        assert!(!guard.is_held());
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn test_early_return_releases() {
        fn failing_cycle(guard: &LoopGuard) -> Result<(), &'static str> {
            let _token = guard.try_acquire().ok_or("busy")?;
            Err::<(), _>("advance failed")?;
            Ok(())
        }

        let guard = LoopGuard::new();
        assert_eq!(failing_cycle(&guard), Err("advance failed"));
        assert!(!guard.is_held());
    }

    #[test]
    fn test_unwind_releases() {
        let guard = LoopGuard::new();
        let inner = guard.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _token = inner.try_acquire().unwrap();
            panic!("surface exploded");
        }));
        assert!(result.is_err());
        assert!(!guard.is_held());
    }
}
