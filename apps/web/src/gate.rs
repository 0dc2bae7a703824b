use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::errors::AppError;

/// Limits how many analyses may be in flight at once. A submission that
/// arrives while the gate is full is rejected rather than queued.
#[derive(Clone)]
pub struct AnalysisGate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// Held for the duration of one analysis; the slot frees on drop.
#[derive(Debug)]
pub struct AnalysisPermit {
    _permit: OwnedSemaphorePermit,
}

impl AnalysisGate {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn try_begin(&self) -> Result<AnalysisPermit, AppError> {
        self.permits
            .clone()
            .try_acquire_owned()
            .map(|permit| AnalysisPermit { _permit: permit })
            .map_err(|_| AppError::Busy)
    }

    pub fn in_flight(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_submission_rejected_while_first_in_flight() {
        let gate = AnalysisGate::new(1);
        let first = gate.try_begin().unwrap();
        assert_eq!(gate.in_flight(), 1);
        assert!(matches!(gate.try_begin(), Err(AppError::Busy)));

        drop(first);
        assert_eq!(gate.in_flight(), 0);
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn test_zero_capacity_is_clamped_to_one() {
        let gate = AnalysisGate::new(0);
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn test_clones_share_permits() {
        let gate = AnalysisGate::new(2);
        let other = gate.clone();
        let _a = gate.try_begin().unwrap();
        let _b = other.try_begin().unwrap();
        assert!(gate.try_begin().is_err());
        assert_eq!(other.in_flight(), 2);
    }
}
