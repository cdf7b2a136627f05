use std::collections::HashMap;

use tracing::debug;

use crate::{DoctorId, OpdError, TokenId};

/// Per-doctor token counters. Sequences start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    counters: HashMap<DoctorId, u32>,
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a counter for `doctor_id`; an existing counter is left alone.
    pub fn register_doctor(&mut self, doctor_id: DoctorId) {
        self.counters.entry(doctor_id).or_insert(0);
    }

    pub fn next_token(&mut self, doctor_id: DoctorId) -> Result<TokenId, OpdError> {
        let counter = self
            .counters
            .get_mut(&doctor_id)
            .ok_or(OpdError::UnknownResource { doctor_id })?;

        let next = counter
            .checked_add(1)
            .ok_or_else(|| OpdError::invalid_input("token_sequence", counter.to_string()))?;
        *counter = next;
        let token = TokenId::new(doctor_id, *counter);
        debug!("Issued token {}", token);
        Ok(token)
    }
}
