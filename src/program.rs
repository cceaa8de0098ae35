//! Program-level settings and the per-organization statistics the
//! allocator consumes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::model::entity::{OrgId, Popularity, Slots};
use crate::model::request::{Algorithm, AllocationRequest, Limits};

fn default_min_slots() -> Slots {
    2
}

fn default_max_slots() -> Slots {
    50
}

/// Slot settings of one program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSettings {
    pub total_slots: Slots,
    #[serde(default = "default_min_slots")]
    pub min_slots_per_org: Slots,
    #[serde(default = "default_max_slots")]
    pub max_slots_per_org: Slots,
    #[serde(default)]
    pub algorithm: Algorithm,
}

impl ProgramSettings {
    pub fn new(total_slots: Slots) -> ProgramSettings {
        ProgramSettings {
            total_slots,
            min_slots_per_org: default_min_slots(),
            max_slots_per_org: default_max_slots(),
            algorithm: Algorithm::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<ProgramSettings, DecodeError> {
        serde_json::from_str(json).map_err(DecodeError::Settings)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            min_slots_per_org: self.min_slots_per_org,
            max_slots_per_org: self.max_slots_per_org,
        }
    }

    /// Builds the allocation input for the active organizations of the
    /// program, in the order given.
    pub fn request(
        &self,
        orgs: &[OrgStats],
        locked_slots: HashMap<OrgId, Slots>,
    ) -> AllocationRequest {
        let mut request = orgs
            .iter()
            .fold(AllocationRequest::builder(self.total_slots, self.limits()), |builder, org| {
                builder.org(org.link_id.clone(), org.nr_applications, org.capacity())
            })
            .algorithm(self.algorithm)
            .build();
        request.locked_slots = locked_slots;
        request
    }
}

/// Counters kept on an organization record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgStats {
    pub link_id: OrgId,
    #[serde(default)]
    pub nr_applications: Popularity,
    #[serde(default)]
    pub nr_mentors: Slots,
    #[serde(default)]
    pub slots_desired: Slots,
}

impl OrgStats {
    /// An organization can take no more students than it has mentors, nor
    /// more than it asked for.
    pub fn capacity(&self) -> Slots {
        self.nr_mentors.min(self.slots_desired)
    }
}
