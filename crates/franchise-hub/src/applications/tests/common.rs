use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::accounts::UserId;
use crate::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView, NewApplication,
    SubmissionRequest,
};
use crate::applications::repository::ApplicationRepository;
use crate::applications::service::ApplicationService;
use crate::catalog::FranchiseId;
use crate::store::RepositoryError;

/// In-memory double mirroring the SQLite repository's conditional-update
/// semantics, with a fixed franchise-name table for the listing join.
pub(super) struct MemoryApplicationRepository {
    rows: Mutex<HashMap<i64, ApplicationRecord>>,
    franchise_names: HashMap<i64, String>,
    sequence: AtomicI64,
}

impl MemoryApplicationRepository {
    pub(super) fn with_franchises(names: &[(i64, &str)]) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            franchise_names: names
                .iter()
                .map(|(id, name)| (*id, name.to_string()))
                .collect(),
            sequence: AtomicI64::new(0),
        }
    }
}

impl ApplicationRepository for MemoryApplicationRepository {
    fn insert(&self, new: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = ApplicationRecord {
            id: ApplicationId(id),
            user_id: new.user_id,
            franchise_id: new.franchise_id,
            status: ApplicationStatus::Pending,
            message: new.message,
            created_at: Utc::now(),
        };
        guard.insert(id, record.clone());
        Ok(record)
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn decide(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let record = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        if record.status.is_terminal() {
            return Err(RepositoryError::Conflict);
        }
        record.status = status;
        Ok(record.clone())
    }

    fn for_user(&self, user: UserId) -> Result<Vec<ApplicationView>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        let mut views: Vec<ApplicationView> = guard
            .values()
            .filter(|record| record.user_id == user)
            .filter_map(|record| {
                self.franchise_names
                    .get(&record.franchise_id.0)
                    .map(|name| ApplicationView {
                        id: record.id,
                        user_id: record.user_id,
                        franchise_id: record.franchise_id,
                        status: record.status,
                        message: record.message.clone(),
                        created_at: record.created_at,
                        franchise_name: name.clone(),
                    })
            })
            .collect();
        views.sort_by_key(|view| view.id.0);
        Ok(views)
    }
}

pub(super) struct UnavailableApplicationRepository;

impl ApplicationRepository for UnavailableApplicationRepository {
    fn insert(&self, _new: NewApplication) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn decide(
        &self,
        _id: ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn for_user(&self, _user: UserId) -> Result<Vec<ApplicationView>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryApplicationRepository>,
    Arc<MemoryApplicationRepository>,
) {
    let repository = Arc::new(MemoryApplicationRepository::with_franchises(&[(
        1,
        "Coffee Point",
    )]));
    let service = ApplicationService::new(repository.clone());
    (service, repository)
}

pub(super) fn submission(user_id: i64, franchise_id: i64) -> SubmissionRequest {
    SubmissionRequest {
        user_id: Some(UserId(user_id)),
        franchise_id: Some(FranchiseId(franchise_id)),
        message: Some("Interested in the island format".to_string()),
    }
}
