use std::collections::HashMap;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use slot_allocator::sets::range_slots;
use slot_allocator::{
    allocate, Algorithm, AllocationRequest, AllocationSheet, ConfigurationError, Limits, OrgStats,
    ProgramSettings, SheetRow,
};

const ALGORITHMS: [Algorithm; 3] =
    [Algorithm::Iterative, Algorithm::Preprocessing, Algorithm::Reliable];

/// Five organizations whose mentor capacity equals their applicant count.
fn program(algorithm: Algorithm) -> AllocationRequest {
    AllocationRequest::builder(60, Limits { min_slots_per_org: 2, max_slots_per_org: 40 })
        .org("asf", 20, 20)
        .org("gcc", 15, 15)
        .org("git", 6, 6)
        .org("google", 3, 3)
        .org("melange", 100, 100)
        .algorithm(algorithm)
        .build()
}

#[test]
fn initial_allocation_stays_below_the_pool() {
    for algorithm in [Algorithm::Iterative, Algorithm::Reliable] {
        let allocation = allocate(&program(algorithm)).unwrap();
        assert!(allocation.total() <= 60, "{algorithm:?} handed out {}", allocation.total());
    }
}

#[test]
fn locked_allocation_is_granted() {
    for algorithm in ALGORITHMS {
        let mut request = program(algorithm);
        request.locked_slots.insert("git".into(), 6);
        assert_eq!(allocate(&request).unwrap().get("git"), Some(6), "{algorithm:?}");
    }
}

#[test]
fn overassigned_lock_is_cut_down() {
    for algorithm in ALGORITHMS {
        let mut request = program(algorithm);
        request.locked_slots.insert("git".into(), 20);
        assert_eq!(allocate(&request).unwrap().get("git"), Some(6), "{algorithm:?}");
    }
}

#[test]
fn locking_a_missing_org_fails() {
    for algorithm in ALGORITHMS {
        let mut request = program(algorithm);
        request.locked_slots.insert("gnome".into(), 1);
        assert_eq!(
            allocate(&request),
            Err(ConfigurationError::UnknownLockedOrg("gnome".into()))
        );
    }
}

#[test]
fn reliable_fills_the_pool_when_capacity_allows() {
    let allocation = allocate(&program(Algorithm::Reliable)).unwrap();
    assert_eq!(allocation.total(), 60);
    assert_eq!(allocation.get("google"), Some(2));
    assert!(allocation.get("melange").unwrap() <= 40);
}

#[test]
fn editor_round_trip() {
    let json = r#"{"total_slots": 20, "min_slots_per_org": 1, "max_slots_per_org": 10}"#;
    let settings = ProgramSettings::from_json(json).unwrap();
    let orgs = vec![
        OrgStats { link_id: "asf".into(), nr_applications: 30, nr_mentors: 8, slots_desired: 12 },
        OrgStats { link_id: "gcc".into(), nr_applications: 10, nr_mentors: 4, slots_desired: 2 },
        OrgStats { link_id: "git".into(), nr_applications: 60, nr_mentors: 20, slots_desired: 20 },
    ];
    let posted =
        AllocationSheet::from_json(r#"{"gcc": {"slots": 2, "locked": true, "adjustment": 0}}"#)
            .unwrap();
    let locked = posted.locked_slots();

    let request = settings.request(&orgs, locked.clone());
    let allocation = request.allocate().unwrap();
    assert_eq!(allocation.get("gcc"), Some(2));
    assert!(allocation.get("asf").unwrap() <= 8);
    assert!(allocation.get("git").unwrap() <= 10);
    assert!(allocation.total() <= 20);

    let stored = AllocationSheet::from_allocation(&allocation, &locked);
    let reloaded = AllocationSheet::from_json(&stored.to_json().unwrap()).unwrap();
    assert_eq!(reloaded.locked_slots(), HashMap::from([("gcc".to_string(), 2)]));

    let rows = SheetRow::list(&allocation, &locked);
    let link_ids: Vec<&str> = rows.iter().map(|row| row.link_id.as_str()).collect();
    assert_eq!(link_ids, vec!["asf", "gcc", "git"]);
    assert_eq!(rows[1].locked, 2);
}

#[test]
fn reliable_respects_bounds_in_any_order() {
    let mut rng = SmallRng::seed_from_u64(2009);
    let mut orgs: Vec<(String, i64, i64)> = (0..15)
        .map(|i| (format!("org{i:02}"), (i * 37 % 23) + 1, i % 7 + 1))
        .collect();
    let limits = Limits { min_slots_per_org: 0, max_slots_per_org: 5 };

    for _ in 0..50 {
        orgs.shuffle(&mut rng);
        let request = orgs
            .iter()
            .fold(AllocationRequest::builder(40, limits), |builder, (org, pop, cap)| {
                builder.org(org.clone(), *pop, *cap)
            })
            .algorithm(Algorithm::Reliable)
            .build();
        let allocation = allocate(&request).unwrap();
        assert_eq!(allocation.len(), 15);
        assert!(allocation.total() <= 40);
        for (org, slots) in allocation.iter() {
            assert!(*slots >= 0 && *slots <= request.capacity_of(org).min(5), "{org} got {slots}");
        }
    }
}

#[test]
fn results_are_reproducible() {
    for algorithm in ALGORITHMS {
        let mut request = program(algorithm);
        request.locked_slots.insert("gcc".into(), 4);
        assert_eq!(allocate(&request).unwrap(), allocate(&request).unwrap());
    }
}

fn arb_request() -> impl Strategy<Value = AllocationRequest> {
    (
        prop::collection::vec((0i64..200, 0i64..50, prop::option::of(0i64..20)), 1..12),
        0i64..300,
        1i64..60,
    )
        .prop_flat_map(|(orgs, total, max)| (Just(orgs), Just(total), Just(max), 0..=max))
        .prop_map(|(orgs, total, max, min)| {
            let limits = Limits { min_slots_per_org: min, max_slots_per_org: max };
            let mut builder = AllocationRequest::builder(total, limits);
            for (i, (popularity, capacity, lock)) in orgs.into_iter().enumerate() {
                let org = format!("org{i:02}");
                builder = builder.org(org.clone(), popularity, capacity);
                if let Some(lock) = lock {
                    builder = builder.lock(org, lock);
                }
            }
            builder.build()
        })
}

fn with_algorithm(mut request: AllocationRequest, algorithm: Algorithm) -> AllocationRequest {
    request.algorithm = algorithm;
    request
}

proptest! {
    #[test]
    fn every_org_gets_exactly_one_entry(request in arb_request()) {
        for algorithm in ALGORITHMS {
            let request = with_algorithm(request.clone(), algorithm);
            let allocation = allocate(&request).unwrap();
            prop_assert_eq!(allocation.len(), request.organizations.len());
        }
    }

    #[test]
    fn iterative_and_reliable_stay_under_org_bounds(request in arb_request()) {
        for algorithm in [Algorithm::Iterative, Algorithm::Reliable] {
            let request = with_algorithm(request.clone(), algorithm);
            let allocation = allocate(&request).unwrap();
            for (org, slots) in allocation.iter() {
                let bound = request.limits.max_slots_per_org.min(request.capacity_of(org));
                prop_assert!(
                    *slots <= bound.max(0),
                    "{:?}: {} got {} > {}", algorithm, org, slots, bound
                );
            }
        }
    }

    #[test]
    fn no_org_gets_negative_slots(request in arb_request()) {
        for algorithm in ALGORITHMS {
            let request = with_algorithm(request.clone(), algorithm);
            let allocation = allocate(&request).unwrap();
            for (org, slots) in allocation.iter() {
                prop_assert!(*slots >= 0, "{:?}: {} got {}", algorithm, org, slots);
            }
        }
    }

    #[test]
    fn iterative_never_exceeds_the_pool(request in arb_request()) {
        let request = with_algorithm(request, Algorithm::Iterative);
        prop_assert!(allocate(&request).unwrap().total() <= request.total_slots);
    }

    #[test]
    fn reliable_never_exceeds_the_pool(request in arb_request()) {
        let mut request = with_algorithm(request, Algorithm::Reliable);
        request.limits.min_slots_per_org = 0;
        if request.locked_slots.values().sum::<i64>() > request.total_slots {
            request.locked_slots.clear();
        }
        prop_assert!(allocate(&request).unwrap().total() <= request.total_slots);
    }

    #[test]
    fn locked_orgs_get_their_clamped_override(request in arb_request()) {
        prop_assume!(request.popularity.values().sum::<i64>() > 0 && request.total_capacity() > 0);
        for algorithm in [Algorithm::Preprocessing, Algorithm::Reliable] {
            let request = with_algorithm(request.clone(), algorithm);
            let allocation = allocate(&request).unwrap();
            for (org, &locked) in &request.locked_slots {
                let expected = range_slots(&request, locked as f64, org);
                prop_assert_eq!(allocation.get(org), Some(expected));
            }
        }
    }

    #[test]
    fn no_demand_means_no_slots(request in arb_request()) {
        for algorithm in ALGORITHMS {
            let mut request = with_algorithm(request.clone(), algorithm);
            request.popularity.values_mut().for_each(|p| *p = 0);
            prop_assert!(allocate(&request).unwrap().iter().all(|(_, slots)| *slots == 0));
        }
    }
}
