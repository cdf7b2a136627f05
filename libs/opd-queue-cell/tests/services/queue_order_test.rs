use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use opd_queue_cell::*;
use super::OpdTestUtils;

/// Expected order: newest emergency first, then normals oldest first.
fn expected_queue(registered: &[(TokenId, bool)], consulted: &[TokenId]) -> Vec<TokenId> {
    let waiting = registered
        .iter()
        .filter(|(token, _)| !consulted.contains(token));

    let mut emergencies: Vec<TokenId> = waiting
        .clone()
        .filter(|(_, emergency)| *emergency)
        .map(|(token, _)| *token)
        .collect();
    emergencies.reverse();

    emergencies
        .into_iter()
        .chain(waiting.filter(|(_, emergency)| !*emergency).map(|(token, _)| *token))
        .collect()
}

#[test]
fn test_random_admission_and_consultation_keep_queue_order() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut utils = OpdTestUtils::new();
        let mut registered: Vec<(TokenId, bool)> = Vec::new();
        let mut consulted: Vec<TokenId> = Vec::new();

        for step in 0..60 {
            let waiting: Vec<TokenId> = registered
                .iter()
                .map(|(token, _)| *token)
                .filter(|token| !consulted.contains(token))
                .collect();

            if !waiting.is_empty() && rng.gen_bool(0.35) {
                let token = waiting[rng.gen_range(0..waiting.len())];
                utils.registry.mark_consulted(token).expect("Failed to mark consulted");
                consulted.push(token);
            } else {
                let emergency = rng.gen_bool(0.3);
                let receipt = utils.register(&format!("Patient {}", step), 1, emergency);
                registered.push((receipt.token, emergency));
            }

            assert_eq!(
                utils.queue(1),
                expected_queue(&registered, &consulted),
                "queue diverged at seed {} step {}",
                seed,
                step
            );
        }
    }
}

#[test]
fn test_board_projection_is_linear_in_position() {
    let mut utils = OpdTestUtils::new();
    for i in 0..6 {
        utils.register(&format!("Patient {}", i), 2, i % 3 == 0);
    }
    utils.clock.advance(Duration::minutes(7));

    let board = utils.registry.list_doctor_queues().unwrap();
    let queue = &board.doctors[1];

    for (index, entry) in queue.entries.iter().enumerate() {
        assert_eq!(entry.position, index + 1);
        assert_eq!(entry.estimated_time, utils.slot(index as i64));
        assert!(entry.estimated_time >= utils.now());
    }
    for pair in queue.entries.windows(2) {
        assert!(pair[0].estimated_time <= pair[1].estimated_time);
    }
}
