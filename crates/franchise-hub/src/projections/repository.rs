use super::domain::{CalculationRecord, NewCalculation};
use crate::accounts::UserId;
use crate::store::RepositoryError;

/// Storage abstraction for the calculation history. The log is append-only:
/// there is deliberately no update surface.
pub trait ProjectionRepository: Send + Sync {
    fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, RepositoryError>;
    fn for_user(&self, user: UserId) -> Result<Vec<CalculationRecord>, RepositoryError>;
}
