use opd_queue_cell::*;
use super::OpdTestUtils;

#[test]
fn test_summary_on_empty_registry() {
    let utils = OpdTestUtils::new();
    let summary = utils.registry.daily_summary();

    assert_eq!(summary.total_registered, 0);
    assert_eq!(summary.total_consulted, 0);
    assert_eq!(summary.total_waiting, 0);
    assert_eq!(summary.doctors.len(), 3);
    assert!(summary.doctors.iter().all(|doctor| doctor.total == 0 && doctor.consulted == 0));
    assert!(summary.departments.is_empty());
}

#[test]
fn test_summary_counts_per_doctor_and_department() {
    let mut utils = OpdTestUtils::new();
    utils.register("Ortho One", 3, false);
    let peds = utils.register("Peds One", 2, false);
    utils.register("Peds Two", 2, true);
    let gm = utils.register("GM One", 1, false);

    utils.registry.mark_consulted(peds.token).expect("Failed to mark consulted");
    utils.registry.mark_consulted(gm.token).expect("Failed to mark consulted");

    let summary = utils.registry.daily_summary();
    assert_eq!(summary.total_registered, 4);
    assert_eq!(summary.total_consulted, 2);
    assert_eq!(summary.total_waiting, 2);
    assert_eq!(summary.generated_at, utils.now());

    let per_doctor: Vec<(DoctorId, usize, usize)> = summary
        .doctors
        .iter()
        .map(|doctor| (doctor.doctor_id, doctor.total, doctor.consulted))
        .collect();
    assert_eq!(
        per_doctor,
        vec![(DoctorId(1), 1, 1), (DoctorId(2), 2, 1), (DoctorId(3), 1, 0)]
    );

    // Departments follow first registration, not roster order
    assert_eq!(
        summary.departments,
        vec![
            DepartmentLoad { department: "Orthopedics".to_string(), total: 1 },
            DepartmentLoad { department: "Pediatrics".to_string(), total: 2 },
            DepartmentLoad { department: "General Medicine".to_string(), total: 1 },
        ]
    );
}
