use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_config::DoctorConfig;

use crate::error::OpdError;

/// Identifier of a doctor, assigned by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoctorId(pub u32);

impl fmt::Display for DoctorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Queue token of one registration: `<doctor-id>-<sequence>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenId {
    pub doctor_id: DoctorId,
    pub sequence: u32,
}

impl TokenId {
    pub fn new(doctor_id: DoctorId, sequence: u32) -> Self {
        Self { doctor_id, sequence }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.doctor_id, self.sequence)
    }
}

impl FromStr for TokenId {
    type Err = OpdError;

    /// Accepts `1-4` as well as the printed-ticket form `D1-4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('D')
            .or_else(|| trimmed.strip_prefix('d'))
            .unwrap_or(trimmed);

        let (doctor, sequence) = body
            .split_once('-')
            .ok_or_else(|| OpdError::invalid_input("token", s))?;

        let doctor_id = doctor
            .parse::<u32>()
            .map_err(|_| OpdError::invalid_input("token", s))?;
        let sequence = sequence
            .parse::<u32>()
            .map_err(|_| OpdError::invalid_input("token", s))?;

        // Counters start at 1, so a zero sequence never names a real token.
        if sequence == 0 {
            return Err(OpdError::invalid_input("token", s));
        }

        Ok(TokenId::new(DoctorId(doctor_id), sequence))
    }
}

impl TryFrom<String> for TokenId {
    type Error = OpdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenId> for String {
    fn from(token: TokenId) -> Self {
        token.to_string()
    }
}

/// A doctor as seen by the queue: identity plus display info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub department: String,
}

impl From<&DoctorConfig> for Doctor {
    fn from(config: &DoctorConfig) -> Self {
        Self {
            id: DoctorId(config.id),
            name: config.name.clone(),
            department: config.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Emergency,
    Normal,
}

impl Priority {
    pub fn from_emergency(emergency: bool) -> Self {
        if emergency {
            Priority::Emergency
        } else {
            Priority::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Waiting,
    Consulted,
}

impl PatientStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PatientStatus::Consulted)
    }

    pub fn can_transition_to(&self, target: &PatientStatus) -> bool {
        matches!((self, target), (PatientStatus::Waiting, PatientStatus::Consulted))
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatientStatus::Waiting => write!(f, "Waiting"),
            PatientStatus::Consulted => write!(f, "Consulted"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub token: TokenId,
    pub name: String,
    pub age: u32,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub department: String,
    pub registered_at: DateTime<Utc>,
    pub status: PatientStatus,
    pub consulted_at: Option<DateTime<Utc>>,
    pub emergency: bool,
}

impl PatientRecord {
    pub fn new(
        token: TokenId,
        name: String,
        age: u32,
        doctor: &Doctor,
        emergency: bool,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            name,
            age,
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            department: doctor.department.clone(),
            registered_at,
            status: PatientStatus::Waiting,
            consulted_at: None,
            emergency,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.status == PatientStatus::Waiting
    }

    /// Read-only view; the estimate is dropped for consulted patients.
    pub fn snapshot(&self, estimated_time: Option<DateTime<Utc>>) -> PatientSnapshot {
        PatientSnapshot {
            token: self.token,
            name: self.name.clone(),
            age: self.age,
            doctor_id: self.doctor_id,
            doctor_name: self.doctor_name.clone(),
            department: self.department.clone(),
            status: self.status,
            emergency: self.emergency,
            registered_at: self.registered_at,
            consulted_at: self.consulted_at,
            estimated_time: if self.is_waiting() { estimated_time } else { None },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSnapshot {
    pub token: TokenId,
    pub name: String,
    pub age: u32,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub department: String,
    pub status: PatientStatus,
    pub emergency: bool,
    pub registered_at: DateTime<Utc>,
    pub consulted_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub estimated_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    pub token: TokenId,
    pub name: String,
    pub age: u32,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub department: String,
    pub emergency: bool,
    pub estimated_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationReceipt {
    pub token: TokenId,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub department: String,
    pub consulted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// 1-based place in line.
    pub position: usize,
    pub token: TokenId,
    pub patient: PatientSnapshot,
    pub estimated_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorQueue {
    pub doctor: Doctor,
    pub entries: Vec<QueueEntry>,
    pub next_available: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueBoard {
    pub generated_at: DateTime<Utc>,
    pub doctors: Vec<DoctorQueue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub department: String,
    pub total: usize,
    pub consulted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentLoad {
    pub department: String,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub total_registered: usize,
    pub total_consulted: usize,
    pub total_waiting: usize,
    pub doctors: Vec<DoctorSummary>,
    pub departments: Vec<DepartmentLoad>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPatientRequest {
    pub name: String,
    pub age: i64,
    pub doctor_id: DoctorId,
    #[serde(default)]
    pub emergency: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSearchQuery {
    pub name: String,
}
