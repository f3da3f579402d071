//! Global request budget shared across the whole run.
//!
//! Every remote call reserves a slot before its request goes out and
//! returns the slot once the response body has been consumed, so the number
//! of in-flight requests stays under `max_concurrent_requests` no matter
//! how many case pipelines are queued above the gate.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admission gate for remote requests. One instance is created per run and
/// passed explicitly to the transport; there is no ambient singleton.
///
/// `acquire` suspends the caller until a slot is free. The returned
/// [`RequestSlot`] releases the slot when dropped, which covers every exit
/// path including error returns.
#[derive(Debug)]
pub struct GlobalRequestBudget {
    max_total: usize,
    slots: Arc<Semaphore>,
}

/// RAII slot handle returned by [`GlobalRequestBudget::acquire`].
#[derive(Debug)]
pub struct RequestSlot {
    _permit: OwnedSemaphorePermit,
}

impl GlobalRequestBudget {
    /// Create a budget admitting at most `max_total` concurrent requests.
    pub fn new(max_total: usize) -> Self {
        let max_total = max_total.max(1);
        Self {
            max_total,
            slots: Arc::new(Semaphore::new(max_total)),
        }
    }

    /// Configured slot count.
    pub fn max_total(&self) -> usize {
        self.max_total
    }

    /// Number of slots currently held.
    pub fn in_use(&self) -> usize {
        self.max_total - self.slots.available_permits()
    }

    /// Free slots. May be 0 while other tasks hold the budget.
    pub fn available(&self) -> usize {
        self.slots.available_permits()
    }

    /// Wait for a free slot and take it. FIFO-or-better; no priority
    /// between resource kinds.
    pub async fn acquire(&self) -> RequestSlot {
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .expect("request budget semaphore never closes");
        RequestSlot { _permit: permit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn acquire_and_drop_release_slots() {
        let budget = GlobalRequestBudget::new(2);
        assert_eq!(budget.available(), 2);

        let a = budget.acquire().await;
        let b = budget.acquire().await;
        assert_eq!(budget.in_use(), 2);
        assert_eq!(budget.available(), 0);

        drop(a);
        assert_eq!(budget.available(), 1);
        drop(b);
        assert_eq!(budget.in_use(), 0);
        assert_eq!(budget.available(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_never_exceeds_limit() {
        const LIMIT: usize = 4;
        const TASKS: usize = 64;

        let budget = Arc::new(GlobalRequestBudget::new(LIMIT));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..TASKS {
            let budget = Arc::clone(&budget);
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            tasks.spawn(async move {
                let _slot = budget.acquire().await;
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(std::time::Duration::from_millis(2)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                // Simulated failure path: the slot must still be released.
                if i % 3 == 0 {
                    Err(())
                } else {
                    Ok(())
                }
            });
        }
        while tasks.join_next().await.is_some() {}

        assert!(peak.load(Ordering::SeqCst) <= LIMIT);
        assert_eq!(budget.in_use(), 0, "every acquire must be released");
        assert_eq!(budget.available(), LIMIT);
    }

    #[test]
    fn zero_limit_is_clamped_to_one() {
        let budget = GlobalRequestBudget::new(0);
        assert_eq!(budget.max_total(), 1);
    }
}
