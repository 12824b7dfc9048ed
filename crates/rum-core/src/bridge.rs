//! Running OS calls that may block for an unbounded time.
//!
//! A host with a cooperative scheduler holds a lock while its code runs.
//! [`run_blocking`] gives that lock up for exactly the duration of one
//! blocking call (a modal dialog, input injection) and takes it back
//! before the result reaches host code again.

/// The host's cooperative-scheduling lock.
///
/// `release` is called right before a blocking call starts and
/// `reacquire` right after it ends. Implementations decide what the lock
/// is: a global interpreter lock, a scheduler token, a mutex.
pub trait HostLock {
    fn release(&self);
    fn reacquire(&self);
}

/// For hosts without a scheduling lock. Both methods do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHostLock;

impl HostLock for NoHostLock {
    fn release(&self) {}
    fn reacquire(&self) {}
}

/// Reacquires the host lock when dropped, including during unwinding.
struct Released<'a, L: HostLock + ?Sized>(&'a L);

impl<L: HostLock + ?Sized> Drop for Released<'_, L> {
    fn drop(&mut self) {
        self.0.reacquire();
    }
}

/// Runs `f(arg)` with the host lock released.
///
/// The lock is reacquired before this function returns, even if `f`
/// panics. Calls are not serialized here: a multi-threaded host must not
/// run two bridged calls on the same path at once.
pub fn run_blocking<L, A, T, F>(lock: &L, f: F, arg: A) -> T
where
    L: HostLock + ?Sized,
    F: FnOnce(A) -> T,
{
    lock.release();
    let _reacquire = Released(lock);
    f(arg)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::panic::{self, AssertUnwindSafe};

    use super::*;

    /// Records lock transitions and whether the lock is held.
    #[derive(Default)]
    struct RecordingLock {
        log: RefCell<Vec<&'static str>>,
    }

    impl RecordingLock {
        fn held(&self) -> bool {
            self.log.borrow().last().is_none_or(|last| *last == "reacquire")
        }
    }

    impl HostLock for RecordingLock {
        fn release(&self) {
            self.log.borrow_mut().push("release");
        }

        fn reacquire(&self) {
            self.log.borrow_mut().push("reacquire");
        }
    }

    #[test]
    fn lock_released_only_during_call() {
        // Arrange
        let lock = RecordingLock::default();

        // Act
        let result = run_blocking(
            &lock,
            |x: i32| {
                assert!(!lock.held(), "lock must be released inside the call");
                x * 2
            },
            21,
        );

        // Assert
        assert_eq!(result, 42);
        assert!(lock.held());
        assert_eq!(*lock.log.borrow(), vec!["release", "reacquire"]);
    }

    #[test]
    fn lock_reacquired_after_panic() {
        // Arrange
        let lock = RecordingLock::default();

        // Act
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            run_blocking(&lock, |_: ()| panic!("dialog crashed"), ())
        }));

        // Assert
        assert!(outcome.is_err());
        assert!(lock.held());
    }

    #[test]
    fn no_host_lock_passes_result_through() {
        // Act
        let text = run_blocking(&NoHostLock, |s: &str| s.to_uppercase(), "ok");

        // Assert
        assert_eq!(text, "OK");
    }
}
