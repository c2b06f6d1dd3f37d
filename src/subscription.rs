//! Teardown guards returned by every subscribe/listen call.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod subscription_test;

/// Runs its teardown exactly once, when dropped or explicitly unsubscribed.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self { teardown: Some(Box::new(teardown)) }
    }

    /// A guard with nothing to tear down.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Combine several guards into one that releases them in order.
    pub fn merge(parts: Vec<Subscription>) -> Self {
        Self::new(move || drop(parts))
    }

    /// Tear down now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("active", &self.teardown.is_some()).finish()
    }
}
