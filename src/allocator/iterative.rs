//! Single forward pass with running totals.
//!
//! Every organization takes its share of whatever is still available, so
//! the result depends on the organization order. The unallocated
//! popularity starts at the total popularity minus the *number* of locked
//! organizations, and an unlocked organization met while it is not
//! positive inherits the previous organization's count (0 for the first).

use tracing::trace;

use crate::model::allocation::Allocation;
use crate::model::entity::{Popularity, Slots};
use crate::model::request::AllocationRequest;
use crate::sets::OrgSets;

pub fn allocate(request: &AllocationRequest, sets: &OrgSets) -> Allocation {
    let limits = request.limits;
    let mut unallocated_popularity = sets.total_popularity - sets.locked.len() as Popularity;
    let mut available_slots = request.total_slots;
    let mut slots: Slots = 0;
    let mut allocation = Allocation::default();

    for org in &request.organizations {
        let popularity = request.popularity_of(org);

        if let Some(&locked) = request.locked_slots.get(org) {
            slots = locked;
        } else if unallocated_popularity > 0 {
            let weight = popularity as f64 / unallocated_popularity as f64;
            slots = (weight * available_slots as f64).floor() as Slots;
        }

        slots = slots
            .min(limits.max_slots_per_org)
            .min(request.capacity_of(org))
            .min(available_slots);

        trace!(
            org = %org,
            popularity,
            slots,
            available_slots,
            unallocated_popularity,
            "iterative share"
        );
        allocation.set(org, slots);
        available_slots -= slots;
        unallocated_popularity -= popularity;
    }

    allocation
}
