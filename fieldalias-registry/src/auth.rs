//! Host capability check gating administrative mutations.
//!
//! The host implements [`Authorizer`] for its own notion of an administrator.
//! Every mutating registry operation short-circuits to a silent no-op when the
//! check fails; read operations are not gated.

/// Capability check for administrative actions
pub trait Authorizer: Send + Sync {
    /// Whether the current actor may perform administrative mutations.
    fn can_administer(&self) -> bool;
}

/// Grants every administrative action. For hosts that authorize upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn can_administer(&self) -> bool {
        true
    }
}
