use std::sync::Arc;

use crate::app::access::AccessResolver;
use crate::app::authority::Authority;
use crate::app::config::Config;
use crate::app::invitations::InvitationLifecycle;

/// Core context shared by all callers. Components are constructed against an
/// explicit authority handle; there is no ambient global state.
#[derive(Clone)]
pub struct Core {
    pub access: AccessResolver,
    pub invitations: InvitationLifecycle,
}

impl Core {
    pub fn new(authority: Arc<dyn Authority>, config: Config) -> Self {
        Self {
            access: AccessResolver::new(authority.clone()),
            invitations: InvitationLifecycle::new(authority, config),
        }
    }
}

pub mod access;
pub mod assignment;
pub mod authority;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod invitations;
pub mod permissions;
pub mod roles;
