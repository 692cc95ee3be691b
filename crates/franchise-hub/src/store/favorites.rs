use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection};

use super::{parse_timestamp, RepositoryError};
use crate::accounts::UserId;
use crate::catalog::FranchiseId;
use crate::favorites::{Favorite, FavoriteId, FavoriteRepository, FavoriteView, NewFavorite};

/// Favorites collection backed by the shared connection. The
/// `(user_id, franchise_id)` uniqueness lives in the schema.
pub struct SqliteFavoriteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavoriteRepository {
    pub(super) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl FavoriteRepository for SqliteFavoriteRepository {
    fn insert(&self, new: NewFavorite) -> Result<Favorite, RepositoryError> {
        let created_at = Utc::now();
        let conn = self.conn.lock().expect("store mutex poisoned");
        conn.execute(
            "INSERT INTO favorites (user_id, franchise_id, created_at) VALUES (?1, ?2, ?3)",
            params![new.user_id.0, new.franchise_id.0, created_at.to_rfc3339()],
        )?;

        Ok(Favorite {
            id: FavoriteId(conn.last_insert_rowid()),
            user_id: new.user_id,
            franchise_id: new.franchise_id,
            created_at,
        })
    }

    fn for_user(&self, user: UserId) -> Result<Vec<FavoriteView>, RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let mut statement = conn.prepare(
            "SELECT v.id, v.user_id, v.franchise_id, v.created_at, f.name AS franchise_name
             FROM favorites v
             JOIN franchises f ON v.franchise_id = f.id
             WHERE v.user_id = ?1
             ORDER BY v.id",
        )?;
        let rows = statement.query_map(params![user.0], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut views = Vec::new();
        for row in rows {
            let (id, user_id, franchise_id, created_at, franchise_name) = row?;
            views.push(FavoriteView {
                id: FavoriteId(id),
                user_id: UserId(user_id),
                franchise_id: FranchiseId(franchise_id),
                created_at: parse_timestamp(&created_at)?,
                franchise_name,
            });
        }
        Ok(views)
    }

    fn remove(&self, user: UserId, franchise: FranchiseId) -> Result<(), RepositoryError> {
        let conn = self.conn.lock().expect("store mutex poisoned");
        let removed = conn.execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND franchise_id = ?2",
            params![user.0, franchise.0],
        )?;

        if removed == 0 {
            Err(RepositoryError::NotFound)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FranchiseRepository, NewFranchise};
    use crate::store::SqliteStore;

    fn seed_franchise(store: &SqliteStore) -> FranchiseId {
        store
            .franchises()
            .insert(NewFranchise {
                name: "Coffee Point".to_string(),
                description: String::new(),
                investment_amount: 1_200_000,
                format: "island".to_string(),
                conditions: String::new(),
                contact_info: String::new(),
                template_path: None,
                created_by: None,
            })
            .expect("franchise stored")
            .id
    }

    #[test]
    fn each_pair_can_be_bookmarked_once() {
        let store = SqliteStore::open_in_memory().expect("store opens");
        let franchise = seed_franchise(&store);
        let favorites = store.favorites();
        let pair = NewFavorite {
            user_id: UserId(7),
            franchise_id: franchise,
        };

        favorites.insert(pair).expect("first bookmark succeeds");
        match favorites.insert(pair) {
            Err(RepositoryError::Conflict) => {}
            other => panic!("expected conflict, got {other:?}"),
        }

        let mine = favorites.for_user(UserId(7)).expect("listing loads");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].franchise_name, "Coffee Point");
    }

    #[test]
    fn remove_deletes_the_pair_and_reports_missing_rows() {
        let store = SqliteStore::open_in_memory().expect("store opens");
        let franchise = seed_franchise(&store);
        let favorites = store.favorites();

        favorites
            .insert(NewFavorite {
                user_id: UserId(7),
                franchise_id: franchise,
            })
            .expect("bookmark succeeds");

        favorites
            .remove(UserId(7), franchise)
            .expect("removal succeeds");
        assert!(favorites.for_user(UserId(7)).expect("listing").is_empty());

        match favorites.remove(UserId(7), franchise) {
            Err(RepositoryError::NotFound) => {}
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
