//! Persistence collaborator seam.
//!
//! Appointments live in the application's backing store; the core only
//! proposes mutations through this trait. Implementations must be
//! idempotent for identical inputs and surface errors per call.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::types::AppointmentUpdate;

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Apply a partial update to one appointment.
    async fn update_appointment(&self, id: Uuid, update: &AppointmentUpdate) -> Result<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    /// Store that records every update and can be told to fail for
    /// specific appointment ids.
    #[derive(Default)]
    pub struct RecordingStore {
        pub updates: Mutex<Vec<(Uuid, AppointmentUpdate)>>,
        pub fail_ids: Vec<Uuid>,
    }

    impl RecordingStore {
        pub fn failing_for(fail_ids: Vec<Uuid>) -> Self {
            Self {
                updates: Mutex::new(Vec::new()),
                fail_ids,
            }
        }
    }

    #[async_trait]
    impl AppointmentStore for RecordingStore {
        async fn update_appointment(&self, id: Uuid, update: &AppointmentUpdate) -> Result<()> {
            if self.fail_ids.contains(&id) {
                anyhow::bail!("simulated store failure for {id}");
            }
            self.updates.lock().push((id, update.clone()));
            Ok(())
        }
    }
}
