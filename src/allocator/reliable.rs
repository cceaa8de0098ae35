//! Capped proportional pass followed by one-slot-at-a-time redistribution.
//!
//! The first pass gives every unlocked organization its floored, clamped
//! share and remembers how far below its mentor capacity it stayed. The
//! slots those caps freed up are then handed out one per organization per
//! round, in organization order, until the pool is empty, nobody wants
//! more, or a whole round grants nothing.

use tracing::{debug, trace};

use crate::model::allocation::Allocation;
use crate::model::entity::{OrgId, Slots};
use crate::model::request::AllocationRequest;
use crate::sets::{range_slots, OrgSets};

use super::allocate_locked;

pub fn allocate(request: &AllocationRequest, sets: &OrgSets) -> Allocation {
    let mut allocation = Allocation::default();
    let remaining = allocate_locked(request, sets, &mut allocation);

    if remaining.total_popularity <= 0 {
        debug!(total_popularity = remaining.total_popularity, "no demand left after locked orgs");
        for org in &sets.unlocked {
            allocation.set(org, 0);
        }
        return allocation;
    }

    let slots_per_popularity = remaining.available_slots as f64 / remaining.total_popularity as f64;
    let mut wanted: Vec<(&OrgId, Slots)> = Vec::new();

    for org in &sets.unlocked {
        let raw_slots = request.popularity_of(org) as f64 * slots_per_popularity;
        let slots = range_slots(request, raw_slots, org);
        let capacity = request.capacity_of(org);
        if capacity > slots {
            wanted.push((org, capacity - slots));
        }
        trace!(org = %org, raw_slots, slots, capacity, "reliable share");
        allocation.set(org, slots);
    }

    let mut available_slots = request.total_slots - allocation.total();
    debug!(available_slots, hungry = wanted.len(), "redistributing freed slots");

    while available_slots > 0 && wanted.iter().map(|(_, want)| want).sum::<Slots>() > 0 {
        let mut granted_any = false;

        for &mut (org, ref mut want) in wanted.iter_mut().filter(|(_, want)| *want > 0) {
            available_slots = request.total_slots - allocation.total();
            if available_slots <= 0 {
                break;
            }
            let current = allocation.get(org).unwrap_or_default();
            let slots = range_slots(request, (current + 1) as f64, org);
            // Adds the (non-positive) difference, so a granted slot lowers
            // the demand and a refused one leaves it untouched.
            *want += current - slots;
            granted_any |= slots > current;
            allocation.set(org, slots);
        }

        if !granted_any {
            debug!(available_slots, "no organization can absorb more slots");
            break;
        }
    }

    allocation
}
