use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;

use crate::accounts::UserId;
use crate::catalog::domain::{Franchise, FranchiseId, NewFranchise};
use crate::catalog::repository::FranchiseRepository;
use crate::projections::domain::{
    CalculationId, CalculationRecord, CalculationRequest, NewCalculation, ProjectionInput,
};
use crate::projections::repository::ProjectionRepository;
use crate::projections::service::ProjectionService;
use crate::store::RepositoryError;

#[derive(Default)]
pub(super) struct MemoryCalculationRepository {
    rows: Mutex<Vec<CalculationRecord>>,
    sequence: AtomicI64,
}

impl MemoryCalculationRepository {
    pub(super) fn len(&self) -> usize {
        self.rows.lock().expect("repository mutex poisoned").len()
    }
}

impl ProjectionRepository for MemoryCalculationRepository {
    fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = CalculationRecord {
            id: CalculationId(id),
            user_id: new.user_id,
            franchise_id: new.franchise_id,
            input: new.input,
            result: new.result,
            created_at: Utc::now(),
        };
        guard.push(record.clone());
        Ok(record)
    }

    fn for_user(&self, user: UserId) -> Result<Vec<CalculationRecord>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        let mut rows: Vec<CalculationRecord> = guard
            .iter()
            .filter(|record| record.user_id == user)
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}

#[derive(Default)]
pub(super) struct MemoryFranchiseRepository {
    rows: Mutex<Vec<Franchise>>,
    sequence: AtomicI64,
}

impl FranchiseRepository for MemoryFranchiseRepository {
    fn insert(&self, new: NewFranchise) -> Result<Franchise, RepositoryError> {
        let mut guard = self.rows.lock().expect("repository mutex poisoned");
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let franchise = Franchise {
            id: FranchiseId(id),
            name: new.name,
            description: new.description,
            investment_amount: new.investment_amount,
            format: new.format,
            conditions: new.conditions,
            contact_info: new.contact_info,
            template_path: new.template_path,
            created_by: new.created_by,
            created_at: Utc::now(),
        };
        guard.push(franchise.clone());
        Ok(franchise)
    }

    fn fetch(&self, id: FranchiseId) -> Result<Option<Franchise>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|row| row.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Franchise>, RepositoryError> {
        let guard = self.rows.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

pub(super) fn sample_franchise() -> NewFranchise {
    NewFranchise {
        name: "Coffee Point".to_string(),
        description: "Compact espresso bar".to_string(),
        investment_amount: 1_200_000,
        format: "island".to_string(),
        conditions: "5% royalty".to_string(),
        contact_info: "sales@coffeepoint.example".to_string(),
        template_path: None,
        created_by: None,
    }
}

pub(super) fn build_service() -> (
    ProjectionService<MemoryCalculationRepository, MemoryFranchiseRepository>,
    Arc<MemoryCalculationRepository>,
    Arc<MemoryFranchiseRepository>,
) {
    let calculations = Arc::new(MemoryCalculationRepository::default());
    let franchises = Arc::new(MemoryFranchiseRepository::default());
    let service = ProjectionService::with_delay(
        calculations.clone(),
        franchises.clone(),
        Duration::ZERO,
    );
    (service, calculations, franchises)
}

pub(super) fn request(
    user_id: i64,
    franchise_id: i64,
    input: ProjectionInput,
) -> CalculationRequest {
    CalculationRequest {
        user_id: Some(UserId(user_id)),
        franchise_id: Some(crate::catalog::FranchiseId(franchise_id)),
        input_data: Some(input),
    }
}
