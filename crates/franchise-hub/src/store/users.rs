use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::RepositoryError;
use crate::accounts::{NewUser, Role, StoredCredentials, User, UserId, UserRepository};

/// User collection backed by the shared connection. The `email UNIQUE`
/// constraint is the single source of truth for duplicate registrations.
pub struct SqliteUserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteUserRepository {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert(&self, new: NewUser) -> Result<User, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO users (email, password_hash, name, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.email,
                new.password_hash,
                new.name,
                new.role.as_str(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            email: new.email,
            name: new.name,
            role: new.role,
        })
    }

    fn find_by_email(&self, email: &str) -> Result<Option<StoredCredentials>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let row = conn
            .query_row(
                "SELECT id, email, password_hash, name, role FROM users WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, email, password_hash, name, raw_role)) = row else {
            return Ok(None);
        };

        let role = Role::parse(&raw_role)
            .ok_or_else(|| RepositoryError::Unavailable(format!("unknown role '{raw_role}'")))?;

        Ok(Some(StoredCredentials {
            user: User {
                id: UserId(id),
                email,
                name,
                role,
            },
            password_hash,
        }))
    }
}
