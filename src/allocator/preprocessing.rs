//! Proportional allocation over smoothed popularity, with leftovers handed
//! out by largest remainder.
//!
//! Each unlocked organization's popularity is first replaced by the
//! popularity that would have produced its clamped share exactly, so the
//! final pass works on weights that already respect the bounds. Slots the
//! floors leave over go one at a time to the organizations with the
//! largest fractional remainder, ties in organization order.

use itertools::Itertools;
use tracing::{debug, trace};

use crate::model::allocation::Allocation;
use crate::model::entity::{OrgId, Slots};
use crate::model::request::AllocationRequest;
use crate::sets::{range_slots, OrgSets};

use super::allocate_locked;

pub fn allocate(request: &AllocationRequest, sets: &OrgSets) -> Allocation {
    let mut allocation = Allocation::default();
    let remaining = allocate_locked(request, sets, &mut allocation);

    if remaining.available_slots <= 0 || remaining.total_popularity <= 0 {
        debug!(
            available_slots = remaining.available_slots,
            total_popularity = remaining.total_popularity,
            "nothing left to share after locked orgs"
        );
        for org in &sets.unlocked {
            allocation.set(org, 0);
        }
        return allocation;
    }

    let available = remaining.available_slots as f64;
    let total_popularity = remaining.total_popularity as f64;

    let smoothed: Vec<(&OrgId, f64)> = sets
        .unlocked
        .iter()
        .map(|org| {
            let raw_slots = request.popularity_of(org) as f64 / total_popularity * available;
            let slots = range_slots(request, raw_slots, org);
            (org, total_popularity / available * slots as f64)
        })
        .collect();
    let smoothed_total: f64 = smoothed.iter().map(|(_, popularity)| popularity).sum();

    let mut slack = Vec::with_capacity(smoothed.len());
    for (org, popularity) in smoothed {
        let raw_slots = if smoothed_total == 0.0 {
            0.0
        } else {
            popularity / smoothed_total * available
        };
        let slots = raw_slots.floor();
        trace!(org = %org, popularity, raw_slots, "preprocessed share");
        slack.push((org, raw_slots - slots));
        allocation.set(org, slots as Slots);
    }

    let mut slots_left = remaining.available_slots - allocation.total();
    debug!(slots_left, "distributing leftover slots by slack");

    for (org, _) in slack.into_iter().sorted_by(|a, b| b.1.total_cmp(&a.1)) {
        if slots_left < 1 {
            break;
        }
        let current = allocation.get(org).unwrap_or_default();
        let slots = range_slots(request, (current + 1) as f64, org);
        if slots > current {
            slots_left -= slots - current;
            allocation.set(org, slots);
        }
    }

    allocation
}
