use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_timestamp, RepositoryError};
use crate::accounts::UserId;
use crate::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus, ApplicationView,
    NewApplication,
};
use crate::catalog::FranchiseId;

/// Application collection backed by the shared connection.
pub struct SqliteApplicationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteApplicationRepository {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

type ApplicationRow = (i64, i64, i64, String, Option<String>, String);

fn into_record(row: ApplicationRow) -> Result<ApplicationRecord, RepositoryError> {
    let (id, user_id, franchise_id, raw_status, message, created_at) = row;
    let status = ApplicationStatus::parse(&raw_status).ok_or_else(|| {
        RepositoryError::Unavailable(format!("unknown application status '{raw_status}'"))
    })?;

    Ok(ApplicationRecord {
        id: ApplicationId(id),
        user_id: UserId(user_id),
        franchise_id: FranchiseId(franchise_id),
        status,
        message,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn fetch_row(conn: &Connection, id: ApplicationId) -> Result<Option<ApplicationRow>, RepositoryError> {
    Ok(conn
        .query_row(
            "SELECT id, user_id, franchise_id, status, message, created_at
             FROM applications WHERE id = ?1",
            params![id.0],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .optional()?)
}

impl ApplicationRepository for SqliteApplicationRepository {
    fn insert(&self, new: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        let created_at = Utc::now();
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO applications (user_id, franchise_id, status, message, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.user_id.0,
                new.franchise_id.0,
                ApplicationStatus::Pending.label(),
                new.message,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(ApplicationRecord {
            id: ApplicationId(conn.last_insert_rowid()),
            user_id: new.user_id,
            franchise_id: new.franchise_id,
            status: ApplicationStatus::Pending,
            message: new.message,
            created_at,
        })
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        fetch_row(&conn, id)?.map(into_record).transpose()
    }

    fn decide(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");

        // Conditional update: only a pending row can take the transition.
        let changed = conn.execute(
            "UPDATE applications SET status = ?1 WHERE id = ?2 AND status = ?3",
            params![status.label(), id.0, ApplicationStatus::Pending.label()],
        )?;

        if changed == 0 {
            return Err(match fetch_row(&conn, id)? {
                Some(_) => RepositoryError::Conflict,
                None => RepositoryError::NotFound,
            });
        }

        match fetch_row(&conn, id)? {
            Some(row) => into_record(row),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn for_user(&self, user: UserId) -> Result<Vec<ApplicationView>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut statement = conn.prepare(
            "SELECT a.id, a.user_id, a.franchise_id, a.status, a.message, a.created_at,
                    f.name AS franchise_name
             FROM applications a
             JOIN franchises f ON a.franchise_id = f.id
             WHERE a.user_id = ?1
             ORDER BY a.id",
        )?;
        let rows = statement.query_map(params![user.0], |row| {
            Ok((
                (
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    row.get::<_, String>(5)?,
                ),
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut views = Vec::new();
        for row in rows {
            let (raw_record, franchise_name) = row?;
            let record = into_record(raw_record)?;
            views.push(ApplicationView {
                id: record.id,
                user_id: record.user_id,
                franchise_id: record.franchise_id,
                status: record.status,
                message: record.message,
                created_at: record.created_at,
                franchise_name,
            });
        }
        Ok(views)
    }
}
