//! Custom test assertions

use inventory_authz::Decision;

/// Assertions for Decision
pub trait DecisionAssertions {
    fn assert_allowed(&self);

    fn assert_denied(&self);

    /// Assert the decision was computed, not served from cache
    fn assert_fresh(&self);
}

impl DecisionAssertions for Decision {
    fn assert_allowed(&self) {
        assert!(self.allowed, "Expected access to be allowed, got: {}", self.reason);
    }

    fn assert_denied(&self) {
        assert!(!self.allowed, "Expected access to be denied, got: {}", self.reason);
    }

    fn assert_fresh(&self) {
        assert!(
            !self.is_cache_hit(),
            "Expected a freshly computed decision, got: {}",
            self.reason
        );
    }
}
