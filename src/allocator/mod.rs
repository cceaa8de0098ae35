pub mod iterative;
pub mod preprocessing;
pub mod reliable;

use tracing::debug;

use crate::error::ConfigurationError;
use crate::model::allocation::Allocation;
use crate::model::entity::{Popularity, Slots};
use crate::model::request::{Algorithm, AllocationRequest};
use crate::sets::{range_slots, OrgSets};

/// Validates the request and runs the configured algorithm.
///
/// When nobody applied or no mentor is available anywhere every
/// organization gets 0, whatever the algorithm.
pub fn allocate(request: &AllocationRequest) -> Result<Allocation, ConfigurationError> {
    let sets = OrgSets::build(request)?;

    let total_capacity = request.total_capacity();
    if sets.total_popularity == 0 || total_capacity == 0 {
        debug!(
            total_popularity = sets.total_popularity,
            total_capacity,
            "no demand or no capacity, allocating nothing"
        );
        return Ok(request.organizations.iter().map(|org| (org.clone(), 0)).collect());
    }

    let allocation = match request.algorithm {
        Algorithm::Iterative => iterative::allocate(request, &sets),
        Algorithm::Preprocessing => preprocessing::allocate(request, &sets),
        Algorithm::Reliable => reliable::allocate(request, &sets),
    };

    debug!(
        algorithm = ?request.algorithm,
        orgs = request.organizations.len(),
        locked = sets.locked.len(),
        total_slots = request.total_slots,
        allocated = allocation.total(),
        "slots allocated"
    );
    Ok(allocation)
}

impl AllocationRequest {
    pub fn allocate(&self) -> Result<Allocation, ConfigurationError> {
        allocate(self)
    }
}

/// What is left for the unlocked organizations once the locked ones are
/// served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Remaining {
    total_popularity: Popularity,
    available_slots: Slots,
}

/// Grants every locked organization its clamped override and takes its
/// popularity and slots out of the pool.
fn allocate_locked(
    request: &AllocationRequest,
    sets: &OrgSets,
    allocation: &mut Allocation,
) -> Remaining {
    let mut remaining = Remaining {
        total_popularity: sets.total_popularity,
        available_slots: request.total_slots,
    };
    for org in &sets.locked {
        let locked = request.locked_slots.get(org).copied().unwrap_or_default();
        let slots = range_slots(request, locked as f64, org);
        remaining.total_popularity -= request.popularity_of(org);
        remaining.available_slots -= slots;
        allocation.set(org, slots);
    }
    remaining
}
