use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::{DoctorId, OpdError, Priority, TokenId};

/// Pending tokens per doctor, head first.
///
/// Emergencies are pushed onto the head, so the most recent emergency is
/// always served next. Normal registrations join the tail in arrival order.
#[derive(Debug, Default)]
pub struct PriorityQueueStore {
    queues: HashMap<DoctorId, VecDeque<TokenId>>,
}

impl PriorityQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_doctor(&mut self, doctor_id: DoctorId) {
        self.queues.entry(doctor_id).or_default();
    }

    pub fn enqueue(
        &mut self,
        doctor_id: DoctorId,
        token: TokenId,
        priority: Priority,
    ) -> Result<(), OpdError> {
        let queue = self.queue_mut(doctor_id)?;

        if queue.contains(&token) {
            return Err(OpdError::invalid_input("token", token.to_string()));
        }

        match priority {
            Priority::Emergency => queue.push_front(token),
            Priority::Normal => queue.push_back(token),
        }

        debug!(
            "Token {} enqueued for doctor {} as {:?} (queue length {})",
            token,
            doctor_id,
            priority,
            queue.len()
        );
        Ok(())
    }

    /// Returns whether the token was queued. Absent tokens are not an error.
    pub fn remove(&mut self, doctor_id: DoctorId, token: TokenId) -> Result<bool, OpdError> {
        let queue = self.queue_mut(doctor_id)?;

        match queue.iter().position(|queued| *queued == token) {
            Some(index) => {
                queue.remove(index);
                debug!("Token {} removed from doctor {} queue", token, doctor_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn snapshot(&self, doctor_id: DoctorId) -> Result<Vec<TokenId>, OpdError> {
        self.queues
            .get(&doctor_id)
            .map(|queue| queue.iter().copied().collect())
            .ok_or(OpdError::UnknownResource { doctor_id })
    }

    pub fn len(&self, doctor_id: DoctorId) -> Result<usize, OpdError> {
        self.queues
            .get(&doctor_id)
            .map(VecDeque::len)
            .ok_or(OpdError::UnknownResource { doctor_id })
    }

    fn queue_mut(&mut self, doctor_id: DoctorId) -> Result<&mut VecDeque<TokenId>, OpdError> {
        self.queues
            .get_mut(&doctor_id)
            .ok_or(OpdError::UnknownResource { doctor_id })
    }
}
