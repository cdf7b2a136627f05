use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::{OpdError, TokenId};

/// Linear service-time projection with a fixed consultation length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateProjector {
    unit: Duration,
}

impl EstimateProjector {
    pub fn new(consultation_minutes: u32) -> Self {
        Self {
            unit: Duration::minutes(i64::from(consultation_minutes)),
        }
    }

    /// Time at which the patient at zero-based `position` is expected in.
    ///
    /// Fails with `InvalidInput` when the offset leaves chrono's range.
    pub fn at_position(&self, position: usize, now: DateTime<Utc>) -> Result<DateTime<Utc>, OpdError> {
        i32::try_from(position)
            .ok()
            .and_then(|slots| self.unit.checked_mul(slots))
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or_else(|| OpdError::invalid_input("queue_position", position.to_string()))
    }

    pub fn project(
        &self,
        snapshot: &[TokenId],
        now: DateTime<Utc>,
    ) -> Result<HashMap<TokenId, DateTime<Utc>>, OpdError> {
        snapshot
            .iter()
            .enumerate()
            .map(|(position, token)| self.at_position(position, now).map(|at| (*token, at)))
            .collect()
    }

    pub fn estimate_for(
        &self,
        snapshot: &[TokenId],
        token: TokenId,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, OpdError> {
        snapshot
            .iter()
            .position(|queued| *queued == token)
            .map(|position| self.at_position(position, now))
            .transpose()
    }

    /// First free slot once everyone currently queued has been seen.
    pub fn next_available(&self, queue_length: usize, now: DateTime<Utc>) -> Result<DateTime<Utc>, OpdError> {
        self.at_position(queue_length, now)
    }
}
