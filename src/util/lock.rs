use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-device mutual exclusion for version number assignment.
///
/// Two callers assigning numbers on the same device run one after the other. Different devices
/// never wait on each other. Clones share the same set of locks.
#[derive(Clone, Default)]
pub struct DeviceLocks {
    locks: Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>,
}

impl DeviceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `device_id`, released when the guard is dropped
    pub async fn acquire(&self, device_id: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.entry(device_id).or_default().clone()
        };

        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::DeviceLocks;

    /// Expect a second acquisition on the same device to wait for the first guard
    #[tokio::test]
    async fn same_device_waits() {
        let locks = DeviceLocks::new();
        let guard = locks.acquire(1).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.acquire(1).await;
        });

        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    /// Expect different devices not to block each other
    #[tokio::test]
    async fn other_devices_do_not_wait() {
        let locks = DeviceLocks::new();
        let _first = locks.acquire(1).await;

        let second = tokio::time::timeout(Duration::from_secs(1), locks.acquire(2)).await;

        assert!(second.is_ok());
    }
}
