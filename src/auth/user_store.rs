//! User Storage
//! Mission: Securely store and manage user accounts with SQLite

use crate::auth::models::User;
use anyhow::{Context, Result};
use bcrypt::{hash, verify};
use rusqlite::{params, Connection};
use tracing::info;

/// bcrypt cost factor (8 rounds)
const BCRYPT_COST: u32 = 8;

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                login TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                roles TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Create a new user, hashing the plaintext password.
    /// Duplicate logins surface as the UNIQUE constraint error.
    pub fn create_user(
        &self,
        name: &str,
        login: &str,
        password: &str,
        roles: &str,
        email: &str,
    ) -> Result<i64> {
        let password_hash = hash(password, BCRYPT_COST).context("Failed to hash password")?;

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO users (name, login, password_hash, roles, email)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, login, password_hash, roles, email],
        )
        .context("Failed to insert user")?;

        let id = conn.last_insert_rowid();
        info!("✅ Created user: {} (id {})", login, id);

        Ok(id)
    }

    /// Get user by login handle
    pub fn get_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, login, password_hash, roles, email
             FROM users WHERE login = ?1",
        )?;

        let user_result = stmt.query_row(params![login], Self::map_user_row);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get user by id (role checks on authenticated requests)
    pub fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, login, password_hash, roles, email
             FROM users WHERE id = ?1",
        )?;

        let user_result = stmt.query_row(params![id], Self::map_user_row);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Verify login and password against the stored bcrypt hash
    pub fn verify_password(&self, login: &str, password: &str) -> Result<bool> {
        match self.get_user_by_login(login)? {
            Some(user) => {
                let valid =
                    verify(password, &user.password_hash).context("Failed to verify password")?;
                Ok(valid)
            }
            None => Ok(false),
        }
    }

    fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            login: row.get(2)?,
            password_hash: row.get(3)?,
            roles: row.get(4)?,
            email: row.get(5)?,
        })
    }
}
