use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CONSULTATION_MINUTES: u32 = 15;
/// One consultation can take at most a day.
pub const MAX_CONSULTATION_MINUTES: u32 = 24 * 60;
pub const DEFAULT_EXPORT_PATH: &str = "hospital_opd_summary.txt";

/// One doctor of the outpatient roster, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorConfig {
    pub id: u32,
    pub name: String,
    pub department: String,
}

impl DoctorConfig {
    pub fn new(id: u32, name: &str, department: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            department: department.to_string(),
        }
    }
}

pub fn default_roster() -> Vec<DoctorConfig> {
    vec![
        DoctorConfig::new(1, "Dr. Sharma", "General Medicine"),
        DoctorConfig::new(2, "Dr. Rao", "Pediatrics"),
        DoctorConfig::new(3, "Dr. Iyer", "Orthopedics"),
    ]
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub consultation_minutes: u32,
    pub doctors: Vec<DoctorConfig>,
    pub export_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            consultation_minutes: DEFAULT_CONSULTATION_MINUTES,
            doctors: default_roster(),
            export_path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            port: env::var("PORT")
                .ok()
                .and_then(|value| {
                    value.parse().ok().or_else(|| {
                        warn!("PORT '{}' is not a valid port, using default", value);
                        None
                    })
                })
                .unwrap_or(DEFAULT_PORT),
            consultation_minutes: env::var("OPD_CONSULTATION_MINUTES")
                .map(|value| parse_consultation_minutes(&value))
                .unwrap_or(DEFAULT_CONSULTATION_MINUTES),
            doctors: env::var("OPD_DOCTORS")
                .map(|value| parse_roster(&value))
                .unwrap_or_else(|_| {
                    warn!("OPD_DOCTORS not set, using default roster");
                    default_roster()
                }),
            export_path: env::var("OPD_EXPORT_PATH")
                .unwrap_or_else(|_| DEFAULT_EXPORT_PATH.to_string()),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - doctor roster is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.doctors.is_empty()
    }
}

fn parse_consultation_minutes(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(minutes) if (1..=MAX_CONSULTATION_MINUTES).contains(&minutes) => minutes,
        _ => {
            warn!(
                "OPD_CONSULTATION_MINUTES '{}' is not between 1 and {}, using {}",
                value, MAX_CONSULTATION_MINUTES, DEFAULT_CONSULTATION_MINUTES
            );
            DEFAULT_CONSULTATION_MINUTES
        }
    }
}

fn parse_roster(value: &str) -> Vec<DoctorConfig> {
    serde_json::from_str(value).unwrap_or_else(|e| {
        warn!("OPD_DOCTORS is not a valid doctor list ({}), using default roster", e);
        default_roster()
    })
}
