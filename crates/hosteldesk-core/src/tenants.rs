// ── Tenant roster ──
//
// View model for the tenants screen. Lease termination is the one
// mutating workflow; it follows the same busy-then-finish shape as the
// booking board.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::error::CoreError;
use crate::model::{LeaseStatus, Tenant, TenantId};

/// View model for the tenant roster.
#[derive(Debug, Default)]
pub struct TenantRoster {
    tenants: Vec<Tenant>,
    busy: HashSet<TenantId>,
}

impl TenantRoster {
    pub fn new(tenants: Vec<Tenant>) -> Self {
        Self {
            tenants,
            busy: HashSet::new(),
        }
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn get(&self, id: TenantId) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }

    /// Tenants whose lease has not entered termination.
    pub fn active_count(&self) -> usize {
        self.tenants
            .iter()
            .filter(|t| t.lease == LeaseStatus::Active)
            .count()
    }

    /// Marks a tenant busy ahead of the termination call. An ending
    /// lease cannot be terminated again.
    pub fn begin_terminate(&mut self, id: TenantId) -> Result<(), CoreError> {
        let tenant = self.get(id).ok_or(CoreError::UnknownTenant { id })?;
        if tenant.lease == LeaseStatus::Ending {
            return Err(CoreError::LeaseAlreadyEnding);
        }
        if !self.busy.insert(id) {
            return Err(CoreError::RequestInFlight);
        }
        debug!(tenant = %id, "Lease termination in flight");
        Ok(())
    }

    /// Completes termination: the lease becomes `Ending`, which is
    /// terminal.
    pub fn finish_terminate(&mut self, id: TenantId) -> Result<(), CoreError> {
        self.busy.remove(&id);
        let tenant = self
            .tenants
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::UnknownTenant { id })?;
        tenant.lease = LeaseStatus::Ending;
        info!(tenant = %id, "Lease termination started");
        Ok(())
    }

    /// Clears the busy mark without changing the tenant, for a request
    /// that failed instead of completing.
    pub fn release(&mut self, id: TenantId) {
        self.busy.remove(&id);
    }

    pub fn is_busy(&self, id: TenantId) -> bool {
        self.busy.contains(&id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn tenant(id: u32, name: &str, lease: LeaseStatus) -> Tenant {
        Tenant {
            id: TenantId(id),
            name: name.to_string(),
            room: "A-101".to_string(),
            monthly_rent: 18_000,
            lease_start: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            lease,
            last_payment: NaiveDate::from_ymd_opt(2026, 8, 1),
        }
    }

    fn roster() -> TenantRoster {
        TenantRoster::new(vec![
            tenant(1, "Usman Tariq", LeaseStatus::Active),
            tenant(2, "Bilal Ahmed", LeaseStatus::Active),
            tenant(3, "Fahad Iqbal", LeaseStatus::Ending),
        ])
    }

    #[test]
    fn termination_walks_busy_then_ending() {
        let mut roster = roster();
        roster.begin_terminate(TenantId(1)).unwrap();
        assert!(roster.is_busy(TenantId(1)));

        roster.finish_terminate(TenantId(1)).unwrap();
        assert!(!roster.is_busy(TenantId(1)));
        assert_eq!(roster.get(TenantId(1)).unwrap().lease, LeaseStatus::Ending);
    }

    #[test]
    fn an_ending_lease_cannot_be_terminated_again() {
        let mut roster = roster();
        assert!(matches!(
            roster.begin_terminate(TenantId(3)),
            Err(CoreError::LeaseAlreadyEnding)
        ));
    }

    #[test]
    fn double_terminate_fails_while_in_flight() {
        let mut roster = roster();
        roster.begin_terminate(TenantId(2)).unwrap();
        assert!(matches!(
            roster.begin_terminate(TenantId(2)),
            Err(CoreError::RequestInFlight)
        ));
    }

    #[test]
    fn active_count_excludes_ending_leases() {
        let mut roster = roster();
        assert_eq!(roster.active_count(), 2);
        roster.begin_terminate(TenantId(1)).unwrap();
        roster.finish_terminate(TenantId(1)).unwrap();
        assert_eq!(roster.active_count(), 1);
    }

    #[test]
    fn unknown_tenants_are_rejected() {
        let mut roster = roster();
        assert!(matches!(
            roster.begin_terminate(TenantId(42)),
            Err(CoreError::UnknownTenant { id: TenantId(42) })
        ));
    }
}
