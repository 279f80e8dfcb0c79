use crate::app::authority::AuthorityError;
use crate::app::domain::InvitationStatus;

/// Core error type for unified error handling across the crate.
///
/// Callers branch on the variant: `Authorization` renders "forbidden",
/// `Transport` leaves retry to the transport layer, `Validation` and
/// `InvalidTransition` are caller mistakes or genuine state conflicts and
/// are never absorbed.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Invalid input data: malformed role, bad email, duplicate open invitation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Lifecycle call attempted from an incompatible invitation state.
    #[error("cannot {action} an invitation in the '{from}' state")]
    InvalidTransition {
        from: InvitationStatus,
        action: &'static str,
    },

    /// Permission denial. Distinct from transport so callers can render
    /// "forbidden" rather than "retry".
    #[error("forbidden: {0}")]
    Authorization(String),

    /// Authority unreachable or erroring. Only the access resolver's
    /// fallback may convert this into a default decision.
    #[error("authority error: {0}")]
    Transport(#[from] AuthorityError),

    /// A permission record outside the closed level/entity/action sets.
    /// Always denies; fail-closed, never fail-open.
    #[error("permission misconfigured: {0}")]
    Configuration(String),
}
