//! In-memory identity provider

use crate::core::types::{Capability, PrincipalId, RoleName, UnitId};
use crate::storage::IdentityProvider;
use crate::utils::error::{AuthzError, Result};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Everything the directory knows about one principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub superuser: bool,
    #[serde(default)]
    pub units: HashSet<UnitId>,
    #[serde(default)]
    pub roles: HashSet<RoleName>,
    #[serde(default)]
    pub capabilities: HashSet<Capability>,
}

/// Principals and their memberships held in memory
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    profiles: DashMap<PrincipalId, Profile>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a principal's profile
    pub fn insert(&self, principal: PrincipalId, profile: Profile) {
        self.profiles.insert(principal, profile);
    }

    pub fn remove(&self, principal: PrincipalId) -> Option<Profile> {
        self.profiles.remove(&principal).map(|(_, profile)| profile)
    }

    pub fn profile(&self, principal: PrincipalId) -> Option<Profile> {
        self.profiles.get(&principal).map(|p| p.clone())
    }

    pub fn set_superuser(&self, principal: PrincipalId, superuser: bool) {
        self.profiles.entry(principal).or_default().superuser = superuser;
    }

    pub fn add_to_unit(&self, principal: PrincipalId, unit: UnitId) {
        self.profiles.entry(principal).or_default().units.insert(unit);
    }

    pub fn remove_from_unit(&self, principal: PrincipalId, unit: UnitId) {
        if let Some(mut profile) = self.profiles.get_mut(&principal) {
            profile.units.remove(&unit);
        }
    }

    pub fn assign_role(&self, principal: PrincipalId, role: RoleName) {
        self.profiles.entry(principal).or_default().roles.insert(role);
    }

    pub fn grant_capability(&self, principal: PrincipalId, capability: Capability) {
        self.profiles
            .entry(principal)
            .or_default()
            .capabilities
            .insert(capability);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    fn with_profile<T>(&self, principal: PrincipalId, f: impl FnOnce(&Profile) -> T) -> Result<T> {
        self.profiles
            .get(&principal)
            .map(|profile| f(&profile))
            .ok_or_else(|| AuthzError::identity(format!("no profile for principal {}", principal)))
    }
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryDirectory {
    async fn is_superuser(&self, principal: PrincipalId) -> Result<bool> {
        Ok(self
            .profiles
            .get(&principal)
            .is_some_and(|profile| profile.superuser))
    }

    async fn units_of(&self, principal: PrincipalId) -> Result<HashSet<UnitId>> {
        self.with_profile(principal, |profile| profile.units.clone())
    }

    async fn members_of(&self, unit: UnitId) -> Result<Vec<PrincipalId>> {
        let mut members: Vec<PrincipalId> = self
            .profiles
            .iter()
            .filter(|entry| entry.value().units.contains(&unit))
            .map(|entry| *entry.key())
            .collect();
        members.sort();
        Ok(members)
    }

    async fn roles_of(&self, principal: PrincipalId) -> Result<HashSet<RoleName>> {
        self.with_profile(principal, |profile| profile.roles.clone())
    }

    async fn direct_capabilities(&self, principal: PrincipalId) -> Result<HashSet<Capability>> {
        self.with_profile(principal, |profile| profile.capabilities.clone())
    }

    async fn ensure_units_initialized(&self, principal: PrincipalId) -> Result<()> {
        self.profiles.entry(principal).or_insert_with(|| {
            debug!("Provisioned empty profile for principal {}", principal);
            Profile::default()
        });
        Ok(())
    }
}
