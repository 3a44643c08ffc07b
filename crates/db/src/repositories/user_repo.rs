//! Repository for the `users` table.

use marketrev_core::types::DbId;
use sqlx::PgConnection;

/// Read access to user records. Accounts are managed elsewhere.
pub struct UserRepo;

impl UserRepo {
    /// Look up the admin flag of a user.
    ///
    /// Returns `None` if no user with `id` exists.
    pub async fn find_admin_flag(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<bool>, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT is_admin FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }
}
