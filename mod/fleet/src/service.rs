use std::sync::Arc;

use chrono::NaiveDate;
use medfleet_core::{now_rfc3339, ServiceError};
use medfleet_kv::{KvStore, MemStore};
use medfleet_store::Ops;
use serde::Serialize;

use crate::lifecycle::contract_status;
use crate::model::{
    Alert, AlertFilter, Contract, ContractFilter, ContractStatus, ContractType, Device,
    DeviceFilter, Engineer, EngineerFilter, Facility, FacilityFilter, Installation,
    InstallationFilter, InstallationStatus, ServiceVisit, Severity, VisitFilter, VisitStatus,
};

// ---------------------------------------------------------------------------
// Read-model types
// ---------------------------------------------------------------------------

/// One device joined with its related records.
///
/// `facility` is `None` when the foreign key dangles — an expected condition,
/// rendered as "unknown" at the presentation boundary, never an error.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetail {
    pub device: Device,
    pub facility: Option<Facility>,
    pub contracts: Vec<Contract>,
    pub open_alerts: Vec<Alert>,
}

/// Derived dashboard numbers. Computed on demand, never stored.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetOverview {
    pub total_devices: usize,
    /// Installations currently In Progress.
    pub active_installations: usize,
    pub open_alerts: usize,
    pub total_facilities: usize,
    /// Contracts whose derived status is Expiring Soon, soonest first.
    pub expiring_soon: Vec<Contract>,
}

// ---------------------------------------------------------------------------
// FleetService
// ---------------------------------------------------------------------------

/// The fleet service: one repository per collection over a shared KV backend.
///
/// Collections are independent — no cascade delete, no cross-collection
/// transactions. All joins happen in the read-model methods, by foreign key,
/// with explicit fallbacks for dangling references.
pub struct FleetService {
    devices: Ops<Device>,
    facilities: Ops<Facility>,
    engineers: Ops<Engineer>,
    installations: Ops<Installation>,
    visits: Ops<ServiceVisit>,
    contracts: Ops<Contract>,
    alerts: Ops<Alert>,
}

impl FleetService {
    /// Create a service over the given KV backend.
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            devices: Ops::new(Arc::clone(&kv)),
            facilities: Ops::new(Arc::clone(&kv)),
            engineers: Ops::new(Arc::clone(&kv)),
            installations: Ops::new(Arc::clone(&kv)),
            visits: Ops::new(Arc::clone(&kv)),
            contracts: Ops::new(Arc::clone(&kv)),
            alerts: Ops::new(kv),
        }
    }

    /// Create a service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemStore::new()))
    }

    // -----------------------------------------------------------------------
    // Repository access
    // -----------------------------------------------------------------------

    pub fn devices(&self) -> &Ops<Device> {
        &self.devices
    }

    pub fn facilities(&self) -> &Ops<Facility> {
        &self.facilities
    }

    pub fn engineers(&self) -> &Ops<Engineer> {
        &self.engineers
    }

    pub fn installations(&self) -> &Ops<Installation> {
        &self.installations
    }

    pub fn visits(&self) -> &Ops<ServiceVisit> {
        &self.visits
    }

    pub fn contracts(&self) -> &Ops<Contract> {
        &self.contracts
    }

    pub fn alerts(&self) -> &Ops<Alert> {
        &self.alerts
    }

    // -----------------------------------------------------------------------
    // Filtered lists
    // -----------------------------------------------------------------------

    pub fn list_devices(&self, filter: &DeviceFilter) -> Result<Vec<Device>, ServiceError> {
        Ok(self.devices.list()?.into_iter().filter(|d| filter.matches(d)).collect())
    }

    pub fn list_facilities(&self, filter: &FacilityFilter) -> Result<Vec<Facility>, ServiceError> {
        Ok(self.facilities.list()?.into_iter().filter(|f| filter.matches(f)).collect())
    }

    pub fn list_engineers(&self, filter: &EngineerFilter) -> Result<Vec<Engineer>, ServiceError> {
        Ok(self.engineers.list()?.into_iter().filter(|e| filter.matches(e)).collect())
    }

    pub fn list_installations(
        &self,
        filter: &InstallationFilter,
    ) -> Result<Vec<Installation>, ServiceError> {
        Ok(self
            .installations
            .list()?
            .into_iter()
            .filter(|i| filter.matches(i))
            .collect())
    }

    pub fn list_visits(&self, filter: &VisitFilter) -> Result<Vec<ServiceVisit>, ServiceError> {
        Ok(self.visits.list()?.into_iter().filter(|v| filter.matches(v)).collect())
    }

    pub fn list_contracts(&self, filter: &ContractFilter) -> Result<Vec<Contract>, ServiceError> {
        Ok(self.contracts.list()?.into_iter().filter(|c| filter.matches(c)).collect())
    }

    pub fn list_alerts(&self, filter: &AlertFilter) -> Result<Vec<Alert>, ServiceError> {
        Ok(self.alerts.list()?.into_iter().filter(|a| filter.matches(a)).collect())
    }

    // -----------------------------------------------------------------------
    // Installation lifecycle
    // -----------------------------------------------------------------------

    /// Move an installation to `next`, rejecting edges outside the
    /// transition table.
    pub fn transition_installation(
        &self,
        id: &str,
        next: InstallationStatus,
    ) -> Result<Installation, ServiceError> {
        let mut inst = self.installations.get_or_err(id)?;
        if !inst.status.can_transition(next) {
            return Err(ServiceError::InvalidTransition(format!(
                "installation '{}' cannot go {} -> {}",
                id, inst.status, next
            )));
        }
        inst.status = next;
        let inst = self.installations.save(inst)?;
        tracing::info!(id, status = %next, "installation transitioned");
        Ok(inst)
    }

    /// Pending -> In Progress.
    pub fn start_installation(&self, id: &str) -> Result<Installation, ServiceError> {
        self.transition_installation(id, InstallationStatus::InProgress)
    }

    /// In Progress -> Completed.
    pub fn complete_installation(&self, id: &str) -> Result<Installation, ServiceError> {
        self.transition_installation(id, InstallationStatus::Completed)
    }

    /// Pending or In Progress -> Cancelled.
    pub fn cancel_installation(&self, id: &str) -> Result<Installation, ServiceError> {
        self.transition_installation(id, InstallationStatus::Cancelled)
    }

    /// Mark one checklist item done, stamping who and when.
    pub fn complete_checklist_item(
        &self,
        installation_id: &str,
        item_id: &str,
        completed_by: &str,
    ) -> Result<Installation, ServiceError> {
        let mut inst = self.installations.get_or_err(installation_id)?;
        let item = inst
            .checklist
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "checklist item '{}' not found on installation '{}'",
                    item_id, installation_id
                ))
            })?;
        if item.completed {
            return Err(ServiceError::Conflict(format!(
                "checklist item '{}' is already completed",
                item_id
            )));
        }
        item.completed = true;
        item.completed_by = Some(completed_by.to_string());
        item.completed_at = Some(now_rfc3339());
        self.installations.save(inst)
    }

    // -----------------------------------------------------------------------
    // Visit lifecycle
    // -----------------------------------------------------------------------

    /// Move a visit to `next`, rejecting edges outside the transition table.
    pub fn transition_visit(
        &self,
        id: &str,
        next: VisitStatus,
    ) -> Result<ServiceVisit, ServiceError> {
        let mut visit = self.visits.get_or_err(id)?;
        if !visit.status.can_transition(next) {
            return Err(ServiceError::InvalidTransition(format!(
                "service visit '{}' cannot go {} -> {}",
                id, visit.status, next
            )));
        }
        visit.status = next;
        let visit = self.visits.save(visit)?;
        tracing::info!(id, status = %next, "service visit transitioned");
        Ok(visit)
    }

    /// Scheduled -> In Progress.
    pub fn start_visit(&self, id: &str) -> Result<ServiceVisit, ServiceError> {
        self.transition_visit(id, VisitStatus::InProgress)
    }

    /// In Progress -> Completed.
    pub fn complete_visit(&self, id: &str) -> Result<ServiceVisit, ServiceError> {
        self.transition_visit(id, VisitStatus::Completed)
    }

    /// Scheduled or In Progress -> Cancelled.
    pub fn cancel_visit(&self, id: &str) -> Result<ServiceVisit, ServiceError> {
        self.transition_visit(id, VisitStatus::Cancelled)
    }

    // -----------------------------------------------------------------------
    // Alert triage
    // -----------------------------------------------------------------------

    /// Resolve an alert, stamping who and when. Resolving twice is a conflict.
    pub fn resolve_alert(&self, id: &str, resolved_by: &str) -> Result<Alert, ServiceError> {
        let mut alert = self.alerts.get_or_err(id)?;
        if alert.resolved {
            return Err(ServiceError::Conflict(format!(
                "alert '{}' is already resolved",
                id
            )));
        }
        alert.resolved = true;
        alert.resolved_at = Some(now_rfc3339());
        alert.resolved_by = Some(resolved_by.to_string());
        let alert = self.alerts.save(alert)?;
        tracing::info!(id, by = resolved_by, "alert resolved");
        Ok(alert)
    }

    /// Reopen a resolved alert, clearing both stamps together.
    pub fn reopen_alert(&self, id: &str) -> Result<Alert, ServiceError> {
        let mut alert = self.alerts.get_or_err(id)?;
        if !alert.resolved {
            return Err(ServiceError::Conflict(format!("alert '{}' is not resolved", id)));
        }
        alert.resolved = false;
        alert.resolved_at = None;
        alert.resolved_by = None;
        let alert = self.alerts.save(alert)?;
        tracing::info!(id, "alert reopened");
        Ok(alert)
    }

    /// Unresolved alerts in triage order: severity high to low, then newest first.
    pub fn open_alerts(&self) -> Result<Vec<Alert>, ServiceError> {
        let mut open: Vec<Alert> =
            self.alerts.list()?.into_iter().filter(|a| !a.resolved).collect();
        open.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(open)
    }

    /// Unresolved alert counts per severity, most severe first.
    pub fn open_alert_counts(&self) -> Result<Vec<(Severity, usize)>, ServiceError> {
        let open = self.open_alerts()?;
        Ok([Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
            .into_iter()
            .map(|sev| (sev, open.iter().filter(|a| a.severity == sev).count()))
            .collect())
    }

    // -----------------------------------------------------------------------
    // Contract lifecycle
    // -----------------------------------------------------------------------

    /// All contracts covering one device.
    pub fn contracts_for_device(&self, device_id: &str) -> Result<Vec<Contract>, ServiceError> {
        Ok(self
            .contracts
            .list()?
            .into_iter()
            .filter(|c| c.device_id == device_id)
            .collect())
    }

    /// Contracts whose derived status is Expiring Soon as of `today`,
    /// soonest end date first. Malformed end dates are skipped.
    pub fn expiring_contracts(&self, today: NaiveDate) -> Result<Vec<Contract>, ServiceError> {
        let mut expiring: Vec<Contract> = self
            .contracts
            .list()?
            .into_iter()
            .filter(|c| {
                c.end_date_parsed()
                    .map(|end| contract_status(end, today) == ContractStatus::ExpiringSoon)
                    .unwrap_or(false)
            })
            .collect();
        // ISO dates sort chronologically as strings.
        expiring.sort_by(|a, b| a.end_date.cmp(&b.end_date));
        Ok(expiring)
    }

    /// Recompute every contract's stored status as of `today` and mirror the
    /// result onto the covered device's AMC/CMC coverage label.
    ///
    /// Contracts with malformed end dates are skipped with a warning — stored
    /// dates are expected well-formed, and a sweep must never fail on one bad
    /// record. Returns how many contracts changed status.
    pub fn refresh_contracts(&self, today: NaiveDate) -> Result<usize, ServiceError> {
        let mut changed = 0;
        for mut contract in self.contracts.list()? {
            let Some(end) = contract.end_date_parsed() else {
                tracing::warn!(
                    id = %contract.id,
                    end_date = %contract.end_date,
                    "skipping contract with malformed end date"
                );
                continue;
            };
            let status = contract_status(end, today);
            if contract.status != status {
                contract.status = status;
                changed += 1;
                self.contracts.save(contract.clone())?;
            }
            self.sync_device_coverage(&contract)?;
        }
        if changed > 0 {
            tracing::info!(changed, "contract statuses refreshed");
        }
        Ok(changed)
    }

    /// Mirror one contract's status onto its device's coverage label.
    /// A dangling device reference is left alone.
    fn sync_device_coverage(&self, contract: &Contract) -> Result<(), ServiceError> {
        let Some(mut device) = self.devices.get(&contract.device_id)? else {
            return Ok(());
        };
        let coverage = match contract.contract_type {
            ContractType::AMC => &mut device.amc_status,
            ContractType::CMC => &mut device.cmc_status,
        };
        if *coverage != contract.status {
            *coverage = contract.status;
            self.devices.save(device)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Cross-reference read model
    // -----------------------------------------------------------------------

    /// One device joined with facility, contracts, and open alerts.
    /// Returns `None` for an unknown device id.
    pub fn device_detail(&self, id: &str) -> Result<Option<DeviceDetail>, ServiceError> {
        let Some(device) = self.devices.get(id)? else {
            return Ok(None);
        };
        let facility = self.facilities.get(&device.facility_id)?;
        let contracts = self.contracts_for_device(id)?;
        let open_alerts = self
            .open_alerts()?
            .into_iter()
            .filter(|a| a.device_id == id)
            .collect();
        Ok(Some(DeviceDetail {
            device,
            facility,
            contracts,
            open_alerts,
        }))
    }

    /// Dashboard numbers as of `today`.
    pub fn overview(&self, today: NaiveDate) -> Result<FleetOverview, ServiceError> {
        let active_installations = self
            .installations
            .list()?
            .iter()
            .filter(|i| i.status == InstallationStatus::InProgress)
            .count();
        Ok(FleetOverview {
            total_devices: self.devices.count()?,
            active_installations,
            open_alerts: self.open_alerts()?.len(),
            total_facilities: self.facilities.count()?,
            expiring_soon: self.expiring_contracts(today)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use medfleet_core::parse_date;

    fn demo() -> FleetService {
        let svc = FleetService::in_memory();
        seed::seed(&svc).unwrap();
        svc
    }

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    // -- filters ------------------------------------------------------------

    #[test]
    fn empty_device_filter_returns_full_list() {
        let svc = demo();
        let all = svc.devices().list().unwrap();
        let filtered = svc.list_devices(&DeviceFilter::default()).unwrap();
        assert_eq!(filtered, all);
        assert_eq!(filtered.len(), 4);
    }

    #[test]
    fn device_filter_narrows() {
        let svc = demo();
        let online = svc
            .list_devices(&DeviceFilter {
                status: Some(crate::model::DeviceStatus::Online),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(online.len(), 2);

        let city_general = svc
            .list_devices(&DeviceFilter {
                facility: "City General Hospital".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(city_general.len(), 2);

        let search = svc
            .list_devices(&DeviceFilter { q: "cardiowatch".into(), ..Default::default() })
            .unwrap();
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].id, "DEV002");
    }

    #[test]
    fn visit_filter_by_purpose() {
        let svc = demo();
        let breakdowns = svc
            .list_visits(&VisitFilter {
                purpose: Some(crate::model::VisitPurpose::Breakdown),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(breakdowns.len(), 1);
        assert_eq!(breakdowns[0].id, "SV002");
    }

    // -- installation lifecycle ---------------------------------------------

    #[test]
    fn installation_transitions_follow_table() {
        let svc = demo();
        // INST001 seeds as In Progress.
        let done = svc.complete_installation("INST001").unwrap();
        assert_eq!(done.status, InstallationStatus::Completed);

        // Completed is terminal: no going back.
        let err = svc.start_installation("INST001").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        let err = svc.cancel_installation("INST001").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    #[test]
    fn installation_cannot_skip_in_progress() {
        let svc = demo();
        let mut inst = svc.installations().get_or_err("INST001").unwrap();
        inst.status = InstallationStatus::Pending;
        svc.installations().save(inst).unwrap();

        let err = svc.complete_installation("INST001").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("Pending -> Completed"));
    }

    #[test]
    fn transition_unknown_installation_is_not_found() {
        let svc = demo();
        let err = svc.start_installation("INST999").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn checklist_completion_stamps() {
        let svc = demo();
        let inst = svc
            .complete_checklist_item("INST001", "CL003", "John Smith")
            .unwrap();
        let item = inst.checklist.iter().find(|i| i.id == "CL003").unwrap();
        assert!(item.completed);
        assert_eq!(item.completed_by.as_deref(), Some("John Smith"));
        assert!(item.completed_at.is_some());
        assert_eq!(inst.checklist_progress(), (3, 5));

        // Completing again is a conflict.
        let err = svc
            .complete_checklist_item("INST001", "CL003", "John Smith")
            .unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");

        // Unknown item is not found.
        let err = svc
            .complete_checklist_item("INST001", "CL999", "John Smith")
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    // -- visit lifecycle ----------------------------------------------------

    #[test]
    fn visit_transitions_follow_table() {
        let svc = demo();
        // SV002 seeds as In Progress.
        svc.complete_visit("SV002").unwrap();
        let err = svc.start_visit("SV002").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");

        // SV001 seeds as Completed — terminal.
        let err = svc.cancel_visit("SV001").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    // -- alert triage -------------------------------------------------------

    #[test]
    fn resolve_and_reopen_keep_stamp_invariant() {
        let svc = demo();
        let resolved = svc.resolve_alert("ALT001", "Lisa Chen").unwrap();
        assert!(resolved.resolved);
        assert_eq!(resolved.resolved_by.as_deref(), Some("Lisa Chen"));
        assert!(resolved.resolved_at.is_some());

        let err = svc.resolve_alert("ALT001", "Lisa Chen").unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");

        let reopened = svc.reopen_alert("ALT001").unwrap();
        assert!(!reopened.resolved);
        assert!(reopened.resolved_at.is_none());
        assert!(reopened.resolved_by.is_none());

        let err = svc.reopen_alert("ALT001").unwrap_err();
        assert_eq!(err.error_code(), "ALREADY_EXISTS");
    }

    #[test]
    fn open_alerts_in_triage_order() {
        let svc = demo();
        // Seed: ALT001 High unresolved, ALT002 Medium unresolved, ALT003 resolved.
        let open = svc.open_alerts().unwrap();
        assert_eq!(open.len(), 2);
        assert_eq!(open[0].id, "ALT001");
        assert_eq!(open[0].severity, Severity::High);
        assert_eq!(open[1].severity, Severity::Medium);

        let counts = svc.open_alert_counts().unwrap();
        assert_eq!(counts[0], (Severity::Critical, 0));
        assert_eq!(counts[1], (Severity::High, 1));
        assert_eq!(counts[2], (Severity::Medium, 1));
        assert_eq!(counts[3], (Severity::Low, 0));
    }

    // -- contract lifecycle -------------------------------------------------

    #[test]
    fn expiring_contracts_derive_from_reference_date() {
        let svc = demo();
        // 2024-02-20: CMC001 ends 2024-03-15 (24 days out), AMC001 ends 2024-05-31.
        let expiring = svc.expiring_contracts(d("2024-02-20")).unwrap();
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id, "CMC001");

        // Well before the window nothing is expiring.
        assert!(svc.expiring_contracts(d("2023-09-01")).unwrap().is_empty());
    }

    #[test]
    fn refresh_updates_contracts_and_device_coverage() {
        let svc = demo();
        // After both end dates: both contracts expire.
        let changed = svc.refresh_contracts(d("2024-06-15")).unwrap();
        assert_eq!(changed, 2);

        let amc = svc.contracts().get_or_err("AMC001").unwrap();
        assert_eq!(amc.status, ContractStatus::Expired);

        // Coverage labels mirrored onto the devices.
        let dev1 = svc.devices().get_or_err("DEV001").unwrap();
        assert_eq!(dev1.amc_status, ContractStatus::Expired);
        let dev2 = svc.devices().get_or_err("DEV002").unwrap();
        assert_eq!(dev2.cmc_status, ContractStatus::Expired);

        // Refresh is idempotent for the same reference date.
        assert_eq!(svc.refresh_contracts(d("2024-06-15")).unwrap(), 0);
    }

    #[test]
    fn refresh_skips_malformed_end_date() {
        let svc = demo();
        let mut c = svc.contracts().get_or_err("AMC001").unwrap();
        c.end_date = "never".into();
        svc.contracts().save(c).unwrap();

        // Sweep still succeeds; only CMC001 is considered.
        let changed = svc.refresh_contracts(d("2024-06-15")).unwrap();
        assert_eq!(changed, 1);
    }

    // -- read model ---------------------------------------------------------

    #[test]
    fn device_detail_joins_related_records() {
        let svc = demo();
        let detail = svc.device_detail("DEV001").unwrap().unwrap();
        assert_eq!(detail.device.model, "MediVent Pro 3000");
        assert_eq!(detail.facility.as_ref().map(|f| f.id.as_str()), Some("FAC001"));
        assert_eq!(detail.contracts.len(), 1);
        assert_eq!(detail.contracts[0].id, "AMC001");
        assert!(detail.open_alerts.is_empty());

        // DEV004 has the unresolved battery alert.
        let detail = svc.device_detail("DEV004").unwrap().unwrap();
        assert_eq!(detail.open_alerts.len(), 1);
        assert_eq!(detail.open_alerts[0].id, "ALT001");
    }

    #[test]
    fn device_detail_unknown_id_is_none() {
        let svc = demo();
        assert!(svc.device_detail("DEV999").unwrap().is_none());
    }

    #[test]
    fn dangling_facility_reference_resolves_to_none() {
        let svc = demo();
        let mut dev = svc.devices().get_or_err("DEV001").unwrap();
        dev.facility_id = "FAC999".into();
        svc.devices().save(dev).unwrap();

        let detail = svc.device_detail("DEV001").unwrap().unwrap();
        assert!(detail.facility.is_none()); // expected condition, not an error
    }

    #[test]
    fn overview_counts_demo_dataset() {
        let svc = demo();
        let overview = svc.overview(d("2024-02-20")).unwrap();
        assert_eq!(overview.total_devices, 4);
        assert_eq!(overview.active_installations, 1);
        assert_eq!(overview.open_alerts, 2);
        assert_eq!(overview.total_facilities, 3);
        assert_eq!(overview.expiring_soon.len(), 1);
    }
}
