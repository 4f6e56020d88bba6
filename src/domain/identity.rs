//! Verified caller identity.
//!
//! Authentication itself happens outside this crate (the deployment's
//! gateway validates tokens). By the time a request reaches a service
//! here, the caller's email has already been verified; this type is the
//! claim that the verification took place. Constructing one from an
//! unverified source defeats the ownership checks built on it.

/// An authenticated caller, identified by verified email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    email: String,
}

impl VerifiedIdentity {
    /// Wrap an already-verified email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// The verified email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Whether this caller owns the given mailbox. Exact comparison; the
    /// stored and verified forms are expected to already be normalized.
    #[must_use]
    pub fn owns(&self, mailbox: &str) -> bool {
        self.email == mailbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owns_requires_exact_match() {
        let caller = VerifiedIdentity::new("maya@example.com");
        assert!(caller.owns("maya@example.com"));
        assert!(!caller.owns("Maya@example.com"));
        assert!(!caller.owns("other@example.com"));
    }
}
