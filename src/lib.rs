pub mod app;

use sqlx::SqlitePool;
use std::sync::Arc;

/// Build the core context over a SQLite-backed authority.
/// Used by embedders and by integration tests.
pub fn create_core(pool: SqlitePool, config: app::config::Config) -> app::Core {
    let authority: Arc<dyn app::authority::Authority> =
        Arc::new(app::authority::SqliteAuthority::new(pool));
    app::Core::new(authority, config)
}
