//! Plain-text renderings of receipts, queues and the daily OPD summary.

use chrono::{DateTime, Utc};

use crate::{
    ConsultationReceipt, PatientRecord, PatientSnapshot, QueueBoard, RegistrationReceipt,
    SummaryReport,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
const CLOCK_FORMAT: &str = "%H:%M";

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn emergency_tag(emergency: bool) -> &'static str {
    if emergency {
        " (EMERGENCY)"
    } else {
        ""
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn render_registration(receipt: &RegistrationReceipt) -> String {
    [
        "Patient Registered Successfully!".to_string(),
        format!("Name       : {}", receipt.name),
        format!("Age        : {}", receipt.age),
        format!("Department : {}", receipt.department),
        format!("Doctor     : {}", receipt.doctor_name),
        format!("Token No.  : {}{}", receipt.token, emergency_tag(receipt.emergency)),
        format!("Estimated Consultation Time: {}", timestamp(&receipt.estimated_time)),
    ]
    .join("\n")
}

pub fn render_consultation(receipt: &ConsultationReceipt) -> String {
    format!(
        "Token {} - {} marked as CONSULTED by {} ({}).",
        receipt.token, receipt.patient_name, receipt.doctor_name, receipt.department
    )
}

pub fn render_patient(patient: &PatientSnapshot) -> String {
    let mut lines = vec![
        "Patient Details:".to_string(),
        format!("Token       : {}", patient.token),
        format!("Name        : {}", patient.name),
        format!("Age         : {}", patient.age),
        format!("Department  : {}", patient.department),
        format!("Doctor      : {}", patient.doctor_name),
        format!("Status      : {}", patient.status),
        format!("Emergency   : {}", yes_no(patient.emergency)),
        format!("Registered  : {}", timestamp(&patient.registered_at)),
    ];

    if let Some(consulted_at) = &patient.consulted_at {
        lines.push(format!("Consulted   : {}", timestamp(consulted_at)));
    }
    if let Some(estimated_time) = &patient.estimated_time {
        lines.push(format!("Estimated Consultation Time: {}", timestamp(estimated_time)));
    }

    lines.join("\n")
}

pub fn render_search_results(results: &[PatientSnapshot]) -> String {
    if results.is_empty() {
        return "No patients found with this name.".to_string();
    }

    let mut lines = vec!["Search Results:".to_string()];
    lines.extend(results.iter().map(|patient| {
        format!(
            "- {} (Token: {}, Doctor: {}, Status: {})",
            patient.name, patient.token, patient.doctor_name, patient.status
        )
    }));
    lines.join("\n")
}

pub fn render_queue_board(board: &QueueBoard) -> String {
    let mut lines = vec![
        "=== DOCTOR-WISE QUEUE DETAILS ===".to_string(),
        format!("Current Time: {}", timestamp(&board.generated_at)),
    ];

    for queue in &board.doctors {
        lines.push(String::new());
        lines.push(format!(
            "Doctor {}: {} ({})",
            queue.doctor.id, queue.doctor.name, queue.doctor.department
        ));

        if queue.entries.is_empty() {
            lines.push("  Queue: [No patients waiting]".to_string());
        } else {
            lines.push("  Queue:".to_string());
            lines.extend(queue.entries.iter().map(|entry| {
                format!(
                    "    {}. Token {}{} - {} | Est: {}",
                    entry.position,
                    entry.token,
                    emergency_tag(entry.patient.emergency),
                    entry.patient.name,
                    entry.estimated_time.format(CLOCK_FORMAT)
                )
            }));
        }

        lines.push(format!("  Next Available Time: {}", timestamp(&queue.next_available)));
    }

    lines.join("\n")
}

pub fn render_summary(summary: &SummaryReport) -> String {
    let mut lines = vec![
        "=== DAILY OPD SUMMARY REPORT ===".to_string(),
        format!("Date: {}", summary.generated_at.format("%Y-%m-%d")),
        format!("Total Patients Registered : {}", summary.total_registered),
        format!("Total Consulted           : {}", summary.total_consulted),
        format!("Total Waiting             : {}", summary.total_waiting),
        String::new(),
        "Doctor-wise Patient Count:".to_string(),
    ];

    lines.extend(summary.doctors.iter().map(|doctor| {
        format!(
            "- {} ({}): {} total, {} consulted",
            doctor.doctor_name, doctor.department, doctor.total, doctor.consulted
        )
    }));

    lines.push(String::new());
    lines.push("Department-wise Workload:".to_string());
    lines.extend(
        summary
            .departments
            .iter()
            .map(|load| format!("- {}: {} patients", load.department, load.total)),
    );

    lines.join("\n")
}

/// Summary followed by every record in registration order.
pub fn render_export<'a>(
    summary: &SummaryReport,
    records: impl IntoIterator<Item = &'a PatientRecord>,
) -> String {
    let mut lines = vec![
        render_summary(summary),
        String::new(),
        "=== PATIENT LIST ===".to_string(),
    ];

    lines.extend(records.into_iter().map(|record| {
        format!(
            "Token: {}, Name: {}, Age: {}, Dept: {}, Doctor: {}, Status: {}, Emergency: {}",
            record.token,
            record.name,
            record.age,
            record.department,
            record.doctor_name,
            record.status,
            yes_no(record.emergency)
        )
    }));

    lines.join("\n")
}
