use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{parse_timestamp, RepositoryError};
use crate::accounts::UserId;
use crate::catalog::FranchiseId;
use crate::projections::{
    CalculationId, CalculationRecord, NewCalculation, Projection, ProjectionInput,
    ProjectionRepository,
};

/// Append-only calculation history backed by the shared connection. Input
/// and result payloads are stored as JSON text columns.
pub struct SqliteCalculationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCalculationRepository {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

fn encode<T: serde::Serialize>(payload: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(payload)
        .map_err(|err| RepositoryError::Unavailable(format!("unencodable payload: {err}")))
}

fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(raw)
        .map_err(|err| RepositoryError::Unavailable(format!("corrupt stored payload: {err}")))
}

impl ProjectionRepository for SqliteCalculationRepository {
    fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, RepositoryError> {
        let created_at = Utc::now();
        let input_data = encode(&new.input)?;
        let result_data = encode(&new.result)?;

        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO calculations (user_id, franchise_id, input_data, result_data, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.user_id.0,
                new.franchise_id.0,
                input_data,
                result_data,
                created_at.to_rfc3339(),
            ],
        )?;

        Ok(CalculationRecord {
            id: CalculationId(conn.last_insert_rowid()),
            user_id: new.user_id,
            franchise_id: new.franchise_id,
            input: new.input,
            result: new.result,
            created_at,
        })
    }

    fn for_user(&self, user: UserId) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut statement = conn.prepare(
            "SELECT id, user_id, franchise_id, input_data, result_data, created_at
             FROM calculations WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let rows = statement.query_map(params![user.0], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, user_id, franchise_id, input_data, result_data, created_at) = row?;
            records.push(CalculationRecord {
                id: CalculationId(id),
                user_id: UserId(user_id),
                franchise_id: FranchiseId(franchise_id),
                input: decode::<ProjectionInput>(&input_data)?,
                result: decode::<Projection>(&result_data)?,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projections::ProjectionEngine;
    use crate::store::SqliteStore;

    #[test]
    fn history_round_trips_the_input_result_pair() {
        let store = SqliteStore::open_in_memory().expect("store opens");
        let calculations = store.calculations();
        let engine = ProjectionEngine::default();

        let input = ProjectionInput {
            workers: 5,
            shift_hours: 8,
            shifts_per_day: 2,
            salary_rate: 200,
        };
        let result = engine.project(&input);

        let record = calculations
            .insert(NewCalculation {
                user_id: UserId(7),
                franchise_id: FranchiseId(3),
                input,
                result,
            })
            .expect("insert succeeds");

        let history = calculations.for_user(UserId(7)).expect("history loads");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, record.id);
        assert_eq!(history[0].input, input);
        assert_eq!(history[0].result, result);

        assert!(calculations
            .for_user(UserId(8))
            .expect("history loads")
            .is_empty());
    }

    #[test]
    fn history_is_returned_newest_first() {
        let store = SqliteStore::open_in_memory().expect("store opens");
        let calculations = store.calculations();
        let engine = ProjectionEngine::default();

        for workers in [1_u32, 2, 3] {
            let input = ProjectionInput {
                workers,
                ..ProjectionInput::default()
            };
            calculations
                .insert(NewCalculation {
                    user_id: UserId(7),
                    franchise_id: FranchiseId(3),
                    input,
                    result: engine.project(&input),
                })
                .expect("insert succeeds");
        }

        let history = calculations.for_user(UserId(7)).expect("history loads");
        let workers: Vec<u32> = history.iter().map(|record| record.input.workers).collect();
        assert_eq!(workers, vec![3, 2, 1]);
    }
}
