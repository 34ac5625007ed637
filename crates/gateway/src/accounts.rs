use {
    argon2::{
        Argon2,
        password_hash::{
            PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
        },
    },
    sqlx::SqlitePool,
};

// ── Types ────────────────────────────────────────────────────────────────────

/// A registered account row. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

// ── Account store ────────────────────────────────────────────────────────────

/// Account and session store backed by SQLite.
///
/// Sessions are opaque random tokens with a 30-day expiry; validity is
/// checked on every dispatch and expired rows are swept periodically.
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    /// Create a new store and initialize tables.
    pub async fn new(pool: SqlitePool) -> anyhow::Result<Self> {
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                email TEXT,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                expires_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    /// Register an account. Usernames are unique; a duplicate surfaces as a
    /// store error. Returns the new row id.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> anyhow::Result<i64> {
        let hash = hash_password(password)?;
        let result =
            sqlx::query("INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?)")
                .bind(username)
                .bind(&hash)
                .bind(email)
                .execute(&self.pool)
                .await?;
        Ok(result.last_insert_rowid())
    }

    /// Verify a username/password pair. `None` for unknown names and wrong
    /// passwords alike.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let row: Option<(i64, String, String, Option<String>)> = sqlx::query_as(
            "SELECT id, username, password_hash, email FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.and_then(|(id, username, hash, email)| {
            verify_password(password, &hash).then_some(User {
                id,
                username,
                email,
            })
        }))
    }

    // ── Sessions ─────────────────────────────────────────────────────────

    /// Issue a fresh session token for a user (30-day expiry).
    pub async fn issue_session(&self, user_id: i64) -> anyhow::Result<String> {
        let token = generate_token();
        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at)
             VALUES (?, ?, datetime('now', '+30 days'))",
        )
        .bind(&token)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(token)
    }

    /// Whether `token` names a live, unexpired session.
    pub async fn check_session(&self, token: &str) -> anyhow::Result<bool> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT token FROM sessions WHERE token = ? AND expires_at > datetime('now')",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    /// Remove expired sessions. Returns how many rows were deleted.
    pub async fn sweep_expired_sessions(&self) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= datetime('now')")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash_str: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash_str) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn generate_token() -> String {
    use {base64::Engine, rand::RngCore};

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> AccountStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        AccountStore::new(pool).await.unwrap()
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn tokens_are_unique_and_long() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(t1.len() >= 40);
    }

    #[tokio::test]
    async fn create_and_authenticate() {
        let store = memory_store().await;
        let id = store
            .create_user("ariel", "tide", Some("ariel@example.com"))
            .await
            .unwrap();
        assert!(id > 0);

        let user = store.authenticate("ariel", "tide").await.unwrap().unwrap();
        assert_eq!(user.username, "ariel");
        assert_eq!(user.email.as_deref(), Some("ariel@example.com"));

        assert!(store.authenticate("ariel", "wrong").await.unwrap().is_none());
        assert!(store.authenticate("nobody", "tide").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let store = memory_store().await;
        store.create_user("dup", "a", None).await.unwrap();
        assert!(store.create_user("dup", "b", None).await.is_err());
    }

    #[tokio::test]
    async fn session_round_trip() {
        let store = memory_store().await;
        let id = store.create_user("sess", "pw", None).await.unwrap();

        let token = store.issue_session(id).await.unwrap();
        assert!(store.check_session(&token).await.unwrap());
        assert!(!store.check_session("bogus").await.unwrap());
        assert!(!store.check_session("").await.unwrap());
    }

    #[tokio::test]
    async fn expired_sessions_fail_and_get_swept() {
        let store = memory_store().await;
        let id = store.create_user("old", "pw", None).await.unwrap();
        let live = store.issue_session(id).await.unwrap();

        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at)
             VALUES ('stale', ?, datetime('now', '-1 day'))",
        )
        .bind(id)
        .execute(&store.pool)
        .await
        .unwrap();

        assert!(!store.check_session("stale").await.unwrap());
        assert_eq!(store.sweep_expired_sessions().await.unwrap(), 1);
        assert!(store.check_session(&live).await.unwrap());
    }
}
