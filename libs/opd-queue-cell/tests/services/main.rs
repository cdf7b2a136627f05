use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use opd_queue_cell::*;
use shared_config::{AppConfig, DoctorConfig};

/// Registry fixture driven by a manual clock
pub struct OpdTestUtils {
    pub clock: ManualClock,
    pub registry: AppointmentRegistry,
}

impl OpdTestUtils {
    pub const CONSULTATION_MINUTES: u32 = 15;

    /// Registry over the default three-doctor roster
    pub fn new() -> Self {
        Self::with_config(&Self::create_test_config())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let clock = ManualClock::new(Self::start_time());
        let registry = AppointmentRegistry::with_clock(config, Arc::new(clock.clone()))
            .expect("Failed to build registry");

        Self { clock, registry }
    }

    pub fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    pub fn create_test_config() -> AppConfig {
        AppConfig {
            port: 0,
            consultation_minutes: Self::CONSULTATION_MINUTES,
            doctors: vec![
                DoctorConfig::new(1, "Dr. Sharma", "General Medicine"),
                DoctorConfig::new(2, "Dr. Rao", "Pediatrics"),
                DoctorConfig::new(3, "Dr. Iyer", "Orthopedics"),
            ],
            export_path: "opd_test_export.txt".to_string(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn slot(&self, position: i64) -> DateTime<Utc> {
        self.now() + Duration::minutes(position * i64::from(Self::CONSULTATION_MINUTES))
    }

    pub fn register(&mut self, name: &str, doctor: u32, emergency: bool) -> RegistrationReceipt {
        self.registry
            .register_patient(name, 30, DoctorId(doctor), emergency)
            .expect("Failed to register patient")
    }

    pub fn token(doctor: u32, sequence: u32) -> TokenId {
        TokenId::new(DoctorId(doctor), sequence)
    }

    /// Tokens of a doctor's queue, head first
    pub fn queue(&self, doctor: u32) -> Vec<TokenId> {
        let board = self.registry.list_doctor_queues().expect("Failed to list queues");
        board
            .doctors
            .iter()
            .find(|queue| queue.doctor.id == DoctorId(doctor))
            .map(|queue| queue.entries.iter().map(|entry| entry.token).collect())
            .unwrap_or_default()
    }
}

mod queue_order_test;
mod summary_test;
