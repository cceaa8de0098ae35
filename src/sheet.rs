//! The allocation sheet edited by program administrators.
//!
//! Stored and posted as a JSON object keyed by organization link id:
//!
//! ```text
//! { "asf": { "slots": 4, "locked": true, "adjustment": 0 }, ... }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::model::allocation::Allocation;
use crate::model::entity::{OrgId, Slots};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetEntry {
    pub slots: Slots,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub adjustment: Slots,
}

/// One line of the list handed back to the editor. `locked` is the
/// requested override, or 0 for computed organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub link_id: OrgId,
    pub slots: Slots,
    pub locked: Slots,
    pub adjustment: Slots,
}

impl SheetRow {
    /// Rows for a fresh allocation, in link id order.
    pub fn list(allocation: &Allocation, locked_slots: &HashMap<OrgId, Slots>) -> Vec<SheetRow> {
        allocation
            .iter()
            .map(|(org, &slots)| SheetRow {
                link_id: org.clone(),
                slots,
                locked: locked_slots.get(org).copied().unwrap_or(0),
                adjustment: 0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationSheet(pub BTreeMap<OrgId, SheetEntry>);

impl AllocationSheet {
    pub fn from_json(json: &str) -> Result<AllocationSheet, DecodeError> {
        serde_json::from_str(json).map_err(DecodeError::Sheet)
    }

    pub fn to_json(&self) -> Result<String, DecodeError> {
        serde_json::to_string(self).map_err(DecodeError::Sheet)
    }

    /// The overrides to feed the next allocation run.
    pub fn locked_slots(&self) -> HashMap<OrgId, Slots> {
        self.0
            .iter()
            .filter(|(_, entry)| entry.locked)
            .map(|(org, entry)| (org.clone(), entry.slots))
            .collect()
    }

    pub fn from_allocation(
        allocation: &Allocation,
        locked_slots: &HashMap<OrgId, Slots>,
    ) -> AllocationSheet {
        AllocationSheet(
            allocation
                .iter()
                .map(|(org, &slots)| {
                    let locked = locked_slots.contains_key(org);
                    let entry = SheetEntry { slots, locked, adjustment: 0 };
                    (org.clone(), entry)
                })
                .collect(),
        )
    }

    pub fn total(&self) -> Slots {
        self.0.values().map(|entry| entry.slots).sum()
    }

    pub fn get(&self, org: &str) -> Option<&SheetEntry> {
        self.0.get(org)
    }
}
