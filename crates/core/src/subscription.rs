//! Owned environment subscriptions with guaranteed release.

/// A live environment subscription (an intersection observation, a resize
/// listener) that can be torn down.
pub trait Disconnect {
    /// Stop delivering notifications. [`Scoped`] calls this at most once.
    fn disconnect(&mut self);
}

/// A subscription fed by the caller's own event loop. Nothing to release.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Polled;

impl Disconnect for Polled {
    fn disconnect(&mut self) {}
}

/// Owns one subscription and releases it exactly once, either through
/// [`Scoped::release`] or when dropped.
#[derive(Debug)]
pub struct Scoped<D: Disconnect> {
    inner: Option<D>,
}

impl<D: Disconnect> Scoped<D> {
    pub fn new(subscription: D) -> Self {
        Self {
            inner: Some(subscription),
        }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Disconnect now. Returns `false` if already released.
    pub fn release(&mut self) -> bool {
        match self.inner.take() {
            Some(mut subscription) => {
                subscription.disconnect();
                true
            }
            None => false,
        }
    }
}

impl<D: Disconnect> Drop for Scoped<D> {
    fn drop(&mut self) {
        self.release();
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Spy;
    use super::*;

    #[test]
    fn release_disconnects_once() {
        let spy = Spy::new();
        let mut scoped = Scoped::new(spy.clone());
        assert!(scoped.is_active());
        assert!(scoped.release());
        assert!(!scoped.release());
        assert!(!scoped.is_active());
        drop(scoped);
        assert_eq!(spy.count(), 1);
    }

    #[test]
    fn drop_disconnects() {
        let spy = Spy::new();
        {
            let _scoped = Scoped::new(spy.clone());
            assert_eq!(spy.count(), 0);
        }
        assert_eq!(spy.count(), 1);
    }
}
