#![allow(dead_code)]

use sqlx::SqlitePool;

use orggate::app::config::Config;
use orggate::app::domain::{OrganizationId, UserId};
use orggate::app::invitations::CreateInvitation;
use orggate::app::Core;

pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub fn test_core(pool: SqlitePool) -> Core {
    orggate::create_core(pool, Config::for_tests())
}

pub fn invite_request(
    organization_id: &OrganizationId,
    inviter_id: &UserId,
    invitee_id: &UserId,
    role: &str,
) -> CreateInvitation {
    CreateInvitation {
        organization_id: organization_id.clone(),
        inviter_id: inviter_id.clone(),
        invitee_id: invitee_id.clone(),
        invitee_email: None,
        role: role.to_string(),
        message: None,
    }
}
