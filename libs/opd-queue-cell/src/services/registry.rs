use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use shared_config::{AppConfig, MAX_CONSULTATION_MINUTES};

use crate::services::{Clock, EstimateProjector, PriorityQueueStore, SystemClock, TokenIssuer};
use crate::{
    ConsultationReceipt, DepartmentLoad, Doctor, DoctorId, DoctorQueue, DoctorSummary, OpdError,
    PatientRecord, PatientSnapshot, PatientStatus, Priority, QueueBoard, QueueEntry,
    RegistrationReceipt, SummaryReport, TokenId,
};

/// Outpatient appointment registry: owns the roster, every patient record and
/// the per-doctor queues.
///
/// All methods are synchronous and complete before returning. Callers sharing
/// a registry across tasks must hold one lock around each call.
pub struct AppointmentRegistry {
    doctors: Vec<Doctor>,
    doctor_index: HashMap<DoctorId, usize>,
    records: Vec<PatientRecord>,
    record_index: HashMap<TokenId, usize>,
    tokens: TokenIssuer,
    queues: PriorityQueueStore,
    projector: EstimateProjector,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AppointmentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentRegistry")
            .field("doctors", &self.doctors)
            .field("doctor_index", &self.doctor_index)
            .field("records", &self.records)
            .field("record_index", &self.record_index)
            .field("tokens", &self.tokens)
            .field("queues", &self.queues)
            .field("projector", &self.projector)
            .finish_non_exhaustive()
    }
}

impl AppointmentRegistry {
    pub fn new(
        doctors: Vec<Doctor>,
        consultation_minutes: u32,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, OpdError> {
        if !(1..=MAX_CONSULTATION_MINUTES).contains(&consultation_minutes) {
            return Err(OpdError::invalid_input(
                "consultation_minutes",
                consultation_minutes.to_string(),
            ));
        }

        let mut doctor_index = HashMap::with_capacity(doctors.len());
        let mut tokens = TokenIssuer::new();
        let mut queues = PriorityQueueStore::new();

        for (index, doctor) in doctors.iter().enumerate() {
            if doctor_index.insert(doctor.id, index).is_some() {
                return Err(OpdError::invalid_input("doctor_id", doctor.id.to_string()));
            }
            tokens.register_doctor(doctor.id);
            queues.register_doctor(doctor.id);
        }

        info!(
            "Appointment registry ready with {} doctors ({} min consultations)",
            doctors.len(),
            consultation_minutes
        );

        Ok(Self {
            doctors,
            doctor_index,
            records: Vec::new(),
            record_index: HashMap::new(),
            tokens,
            queues,
            projector: EstimateProjector::new(consultation_minutes),
            clock,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, OpdError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, OpdError> {
        let doctors = config.doctors.iter().map(Doctor::from).collect();
        Self::new(doctors, config.consultation_minutes, clock)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn doctor(&self, doctor_id: DoctorId) -> Option<&Doctor> {
        self.doctor_index.get(&doctor_id).map(|&index| &self.doctors[index])
    }

    /// Every record in registration order.
    pub fn records(&self) -> impl Iterator<Item = &PatientRecord> {
        self.records.iter()
    }

    #[instrument(skip(self, name))]
    pub fn register_patient(
        &mut self,
        name: &str,
        age: u32,
        doctor_id: DoctorId,
        emergency: bool,
    ) -> Result<RegistrationReceipt, OpdError> {
        let doctor = match self.doctor(doctor_id) {
            Some(doctor) => doctor.clone(),
            None => {
                warn!("Registration rejected: unknown doctor {}", doctor_id);
                return Err(OpdError::UnknownResource { doctor_id });
            }
        };

        // Emergencies land on the head, everyone else behind the current tail.
        let now = self.clock.now();
        let priority = Priority::from_emergency(emergency);
        let queued = self.queues.len(doctor_id)?;
        let position = match priority {
            Priority::Emergency => 0,
            Priority::Normal => queued,
        };
        let estimated_time = self.projector.at_position(position, now)?;

        let token = self.tokens.next_token(doctor_id)?;
        self.queues.enqueue(doctor_id, token, priority)?;

        let record = PatientRecord::new(token, name.to_string(), age, &doctor, emergency, now);
        self.record_index.insert(token, self.records.len());
        self.records.push(record);

        info!(
            "Registered token {} with {} (emergency: {}, queue length {})",
            token,
            doctor.name,
            emergency,
            queued + 1
        );

        Ok(RegistrationReceipt {
            token,
            name: name.to_string(),
            age,
            doctor_id,
            doctor_name: doctor.name,
            department: doctor.department,
            emergency,
            estimated_time,
        })
    }

    #[instrument(skip(self))]
    pub fn mark_consulted(&mut self, token: TokenId) -> Result<ConsultationReceipt, OpdError> {
        let index = *self
            .record_index
            .get(&token)
            .ok_or(OpdError::UnknownToken { token })?;

        let status = self.records[index].status;
        if !status.can_transition_to(&PatientStatus::Consulted) {
            warn!("Token {} is already consulted", token);
            return Err(OpdError::AlreadyConsulted { token });
        }

        let doctor_id = self.records[index].doctor_id;
        if !self.queues.remove(doctor_id, token)? {
            warn!("Token {} was waiting but not queued for doctor {}", token, doctor_id);
        }

        let now = self.clock.now();
        let record = &mut self.records[index];
        record.status = PatientStatus::Consulted;
        record.consulted_at = Some(now);

        info!("Token {} marked as consulted by {}", token, record.doctor_name);

        Ok(ConsultationReceipt {
            token,
            patient_name: record.name.clone(),
            doctor_id,
            doctor_name: record.doctor_name.clone(),
            department: record.department.clone(),
            consulted_at: now,
        })
    }

    pub fn find_by_token(&self, token: TokenId) -> Result<PatientSnapshot, OpdError> {
        let record = self.record(token).ok_or(OpdError::UnknownToken { token })?;

        let estimated_time = if record.is_waiting() {
            let now = self.clock.now();
            self.projector
                .estimate_for(&self.pending(record.doctor_id), token, now)?
        } else {
            None
        };

        debug!("Lookup for token {} ({})", token, record.status);
        Ok(record.snapshot(estimated_time))
    }

    /// Case-insensitive substring search over patient names.
    ///
    /// An empty result is not an error; only an out-of-range projection is.
    pub fn find_by_name(&self, keyword: &str) -> Result<Vec<PatientSnapshot>, OpdError> {
        let keyword = keyword.to_lowercase();
        let now = self.clock.now();
        let mut estimates: HashMap<DoctorId, HashMap<TokenId, DateTime<Utc>>> = HashMap::new();
        let mut matches = Vec::new();

        for record in self
            .records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&keyword))
        {
            let estimated_time = if record.is_waiting() {
                if !estimates.contains_key(&record.doctor_id) {
                    let projected = self.projector.project(&self.pending(record.doctor_id), now)?;
                    estimates.insert(record.doctor_id, projected);
                }
                estimates
                    .get(&record.doctor_id)
                    .and_then(|projected| projected.get(&record.token))
                    .copied()
            } else {
                None
            };
            matches.push(record.snapshot(estimated_time));
        }

        debug!("Name search '{}' matched {} patients", keyword, matches.len());
        Ok(matches)
    }

    pub fn list_doctor_queues(&self) -> Result<QueueBoard, OpdError> {
        let now = self.clock.now();
        let mut doctors = Vec::with_capacity(self.doctors.len());

        for doctor in &self.doctors {
            let pending = self.pending(doctor.id);
            let mut entries = Vec::with_capacity(pending.len());

            for (position, token) in pending.iter().enumerate() {
                let Some(record) = self.record(*token) else {
                    warn!("Queued token {} has no patient record", token);
                    continue;
                };
                let estimated_time = self.projector.at_position(position, now)?;
                entries.push(QueueEntry {
                    position: position + 1,
                    token: *token,
                    patient: record.snapshot(Some(estimated_time)),
                    estimated_time,
                });
            }

            doctors.push(DoctorQueue {
                doctor: doctor.clone(),
                entries,
                next_available: self.projector.next_available(pending.len(), now)?,
            });
        }

        Ok(QueueBoard {
            generated_at: now,
            doctors,
        })
    }

    pub fn daily_summary(&self) -> SummaryReport {
        let total_registered = self.records.len();
        let total_consulted = self
            .records
            .iter()
            .filter(|record| record.status.is_terminal())
            .count();

        let doctors = self
            .doctors
            .iter()
            .map(|doctor| {
                let (total, consulted) = self
                    .records
                    .iter()
                    .filter(|record| record.doctor_id == doctor.id)
                    .fold((0, 0), |(total, consulted), record| {
                        (total + 1, consulted + usize::from(!record.is_waiting()))
                    });
                DoctorSummary {
                    doctor_id: doctor.id,
                    doctor_name: doctor.name.clone(),
                    department: doctor.department.clone(),
                    total,
                    consulted,
                }
            })
            .collect();

        let mut departments: Vec<DepartmentLoad> = Vec::new();
        for record in &self.records {
            match departments
                .iter_mut()
                .find(|load| load.department == record.department)
            {
                Some(load) => load.total += 1,
                None => departments.push(DepartmentLoad {
                    department: record.department.clone(),
                    total: 1,
                }),
            }
        }

        SummaryReport {
            generated_at: self.clock.now(),
            total_registered,
            total_consulted,
            total_waiting: total_registered - total_consulted,
            doctors,
            departments,
        }
    }

    fn record(&self, token: TokenId) -> Option<&PatientRecord> {
        self.record_index.get(&token).map(|&index| &self.records[index])
    }

    /// Pending tokens of a roster doctor; every roster doctor has a queue.
    fn pending(&self, doctor_id: DoctorId) -> Vec<TokenId> {
        self.queues.snapshot(doctor_id).unwrap_or_default()
    }
}
