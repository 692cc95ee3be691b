use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{parse_timestamp, RepositoryError};
use crate::accounts::UserId;
use crate::catalog::{Franchise, FranchiseId, FranchiseRepository, NewFranchise};

/// Franchise collection backed by the shared connection.
pub struct SqliteFranchiseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFranchiseRepository {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

const COLUMNS: &str = "id, name, description, investment_amount, format, conditions, \
                       contact_info, template_path, created_by, created_at";

type FranchiseRow = (
    i64,
    String,
    String,
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<i64>,
    String,
);

fn read_row(row: &Row<'_>) -> rusqlite::Result<FranchiseRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

fn into_franchise(row: FranchiseRow) -> Result<Franchise, RepositoryError> {
    let (
        id,
        name,
        description,
        investment_amount,
        format,
        conditions,
        contact_info,
        template_path,
        created_by,
        created_at,
    ) = row;

    Ok(Franchise {
        id: FranchiseId(id),
        name,
        description,
        investment_amount,
        format,
        conditions,
        contact_info,
        template_path,
        created_by: created_by.map(UserId),
        created_at: parse_timestamp(&created_at)?,
    })
}

impl FranchiseRepository for SqliteFranchiseRepository {
    fn insert(&self, new: NewFranchise) -> Result<Franchise, RepositoryError> {
        let created_at = Utc::now();
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO franchises (name, description, investment_amount, format, conditions,
                                     contact_info, template_path, created_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                new.name,
                new.description,
                new.investment_amount,
                new.format,
                new.conditions,
                new.contact_info,
                new.template_path,
                new.created_by.map(|user| user.0),
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(Franchise {
            id: FranchiseId(conn.last_insert_rowid()),
            name: new.name,
            description: new.description,
            investment_amount: new.investment_amount,
            format: new.format,
            conditions: new.conditions,
            contact_info: new.contact_info,
            template_path: new.template_path,
            created_by: new.created_by,
            created_at,
        })
    }

    fn fetch(&self, id: FranchiseId) -> Result<Option<Franchise>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let row = conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM franchises WHERE id = ?1"),
                params![id.0],
                read_row,
            )
            .optional()?;

        row.map(into_franchise).transpose()
    }

    fn list(&self) -> Result<Vec<Franchise>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut statement =
            conn.prepare(&format!("SELECT {COLUMNS} FROM franchises ORDER BY id"))?;
        let rows = statement.query_map([], read_row)?;

        let mut franchises = Vec::new();
        for row in rows {
            franchises.push(into_franchise(row?)?);
        }
        Ok(franchises)
    }
}
