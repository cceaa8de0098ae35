use std::collections::HashSet;

use itertools::Itertools;

use crate::error::ConfigurationError;
use crate::model::entity::{OrgId, Popularity, Slots};
use crate::model::request::AllocationRequest;

/// Partition of the organizations into admin-locked and computed ones.
///
/// Both lists keep the request's organization order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgSets {
    pub locked: Vec<OrgId>,
    pub unlocked: Vec<OrgId>,
    pub total_popularity: Popularity,
}

impl OrgSets {
    /// Validates the locked overrides and splits the organizations.
    ///
    /// Only checks that every locked key names a known organization.
    /// Negative popularity or capacity passes through untouched.
    pub fn build(request: &AllocationRequest) -> Result<OrgSets, ConfigurationError> {
        let known: HashSet<&str> = request.organizations.iter().map(String::as_str).collect();
        if let Some(unknown) = request
            .locked_slots
            .keys()
            .filter(|org| !known.contains(org.as_str()))
            .sorted()
            .next()
        {
            return Err(ConfigurationError::UnknownLockedOrg(unknown.clone()));
        }

        let (locked, unlocked): (Vec<OrgId>, Vec<OrgId>) = request
            .organizations
            .iter()
            .cloned()
            .partition(|org| request.locked_slots.contains_key(org));
        let total_popularity = request
            .organizations
            .iter()
            .map(|org| request.popularity_of(org))
            .sum();

        Ok(OrgSets { locked, unlocked, total_popularity })
    }
}

/// Clamps a proposed slot count for `org` into its bounds.
///
/// Order matters: floor, cap at the per-org maximum, raise to the per-org
/// minimum, then cap at mentor capacity. The capacity cap comes last and
/// may leave the result below the minimum.
pub fn range_slots(request: &AllocationRequest, raw: f64, org: &str) -> Slots {
    let limits = request.limits;
    let slots = raw.floor() as Slots;
    let slots = slots.min(limits.max_slots_per_org);
    let slots = slots.max(limits.min_slots_per_org);
    slots.min(request.capacity_of(org))
}
