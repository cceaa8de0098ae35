pub mod entity {
    pub type OrgId = String;
    pub type Slots = i64;
    pub type Popularity = i64;
}


pub mod request {
    use std::collections::HashMap;

    use itertools::Itertools;
    use serde::{Deserialize, Serialize};

    use super::entity::{OrgId, Popularity, Slots};

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Algorithm {
        Iterative,
        Preprocessing,
        #[default]
        Reliable,
    }

    impl Algorithm {
        /// Maps the legacy integer selector: 1 and 2 pick the two newer
        /// algorithms, anything else falls back to the iterative one.
        pub fn from_code(code: u8) -> Algorithm {
            match code {
                1 => Algorithm::Preprocessing,
                2 => Algorithm::Reliable,
                _ => Algorithm::Iterative,
            }
        }
    }

    /// Per-organization bounds configured on the program.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Limits {
        pub min_slots_per_org: Slots,
        pub max_slots_per_org: Slots,
    }

    /// Everything one allocation run needs.
    ///
    /// `organizations` is ordered and its order is the iteration order of
    /// every step whose outcome depends on it (running totals in the
    /// iterative pass, redistribution in the reliable pass, slack ties in
    /// the preprocessing pass).
    #[derive(Debug, Clone)]
    pub struct AllocationRequest {
        pub organizations: Vec<OrgId>,
        pub popularity: HashMap<OrgId, Popularity>,
        pub mentor_capacity: HashMap<OrgId, Slots>,
        pub total_slots: Slots,
        pub limits: Limits,
        pub locked_slots: HashMap<OrgId, Slots>,
        pub algorithm: Algorithm,
    }

    impl AllocationRequest {
        pub fn builder(total_slots: Slots, limits: Limits) -> AllocationRequestBuilder {
            AllocationRequestBuilder {
                request: AllocationRequest {
                    organizations: Vec::new(),
                    popularity: HashMap::new(),
                    mentor_capacity: HashMap::new(),
                    total_slots,
                    limits,
                    locked_slots: HashMap::new(),
                    algorithm: Algorithm::default(),
                },
            }
        }

        /// Missing entries count as zero popularity.
        pub fn popularity_of(&self, org: &str) -> Popularity {
            self.popularity.get(org).copied().unwrap_or(0)
        }

        /// Missing entries count as zero capacity.
        pub fn capacity_of(&self, org: &str) -> Slots {
            self.mentor_capacity.get(org).copied().unwrap_or(0)
        }

        pub fn total_capacity(&self) -> Slots {
            self.organizations.iter().map(|org| self.capacity_of(org)).sum()
        }
    }

    pub struct AllocationRequestBuilder {
        request: AllocationRequest,
    }

    impl AllocationRequestBuilder {
        pub fn org(
            mut self,
            org: impl Into<OrgId>,
            popularity: Popularity,
            capacity: Slots,
        ) -> Self {
            let org = org.into();
            self.request.popularity.insert(org.clone(), popularity);
            self.request.mentor_capacity.insert(org.clone(), capacity);
            self.request.organizations.push(org);
            self
        }

        pub fn lock(mut self, org: impl Into<OrgId>, slots: Slots) -> Self {
            self.request.locked_slots.insert(org.into(), slots);
            self
        }

        pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
            self.request.algorithm = algorithm;
            self
        }

        pub fn build(mut self) -> AllocationRequest {
            self.request.organizations = self.request.organizations.into_iter().unique().collect();
            self.request
        }
    }
}


pub mod allocation {
    use std::collections::BTreeMap;

    use super::entity::{OrgId, Slots};

    /// Slots granted per organization; one entry for every organization in
    /// the request.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Allocation(pub(crate) BTreeMap<OrgId, Slots>);

    impl Allocation {
        pub fn get(&self, org: &str) -> Option<Slots> {
            self.0.get(org).copied()
        }

        pub fn total(&self) -> Slots {
            self.0.values().sum()
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        pub fn iter(&self) -> impl Iterator<Item = (&OrgId, &Slots)> {
            self.0.iter()
        }

        pub fn into_inner(self) -> BTreeMap<OrgId, Slots> {
            self.0
        }

        pub(crate) fn set(&mut self, org: &str, slots: Slots) {
            self.0.insert(org.to_owned(), slots);
        }
    }

    impl FromIterator<(OrgId, Slots)> for Allocation {
        fn from_iter<T: IntoIterator<Item = (OrgId, Slots)>>(iter: T) -> Self {
            Allocation(iter.into_iter().collect())
        }
    }
}
