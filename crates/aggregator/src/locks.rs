//! Per-employee run serialization.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async lock per employee.
///
/// Generation for an employee replaces that employee's whole set, so runs
/// for the same employee wait for each other. Runs for different employees
/// proceed independently.
#[derive(Default)]
pub struct EmployeeLocks {
    locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl EmployeeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the employee's lock. It is released when the guard drops.
    pub async fn acquire(&self, employee_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Forget locks nobody holds or waits on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(employee_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of employees with a run in progress or queued.
    pub async fn active(&self) -> usize {
        self.locks
            .lock()
            .await
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}
