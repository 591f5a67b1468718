//! Static demo dataset.
//!
//! Seeds a fresh store with the sample fleet: 4 devices across 3 facilities,
//! 4 engineers, 1 installation in progress, 2 service visits, 2 contracts,
//! and 3 alerts (one resolved). Intended for an empty store — seeding twice
//! fails on duplicate keys.

use medfleet_core::ServiceError;

use crate::model::{
    Alert, AlertType, ChecklistItem, Contract, ContractStatus, ContractType, Device, DeviceStatus,
    Engineer, Facility, Installation, InstallationStatus, Photo, PhotoCategory, ServiceVisit,
    Severity, VisitPurpose, VisitStatus,
};
use crate::service::FleetService;

/// Build a service over a fresh in-memory store and seed it.
pub fn demo_service() -> Result<FleetService, ServiceError> {
    let svc = FleetService::in_memory();
    seed(&svc)?;
    Ok(svc)
}

/// Insert the demo dataset into an empty store.
pub fn seed(svc: &FleetService) -> Result<(), ServiceError> {
    for facility in facilities() {
        svc.facilities().save_new(facility)?;
    }
    for engineer in engineers() {
        svc.engineers().save_new(engineer)?;
    }
    for device in devices() {
        svc.devices().save_new(device)?;
    }
    for installation in installations() {
        svc.installations().save_new(installation)?;
    }
    for visit in visits() {
        svc.visits().save_new(visit)?;
    }
    for contract in contracts() {
        svc.contracts().save_new(contract)?;
    }
    for alert in alerts() {
        svc.alerts().save_new(alert)?;
    }
    tracing::info!("seeded demo fleet dataset");
    Ok(())
}

fn devices() -> Vec<Device> {
    vec![
        Device {
            id: "DEV001".into(),
            device_type: "Ventilator".into(),
            model: "MediVent Pro 3000".into(),
            serial_number: "MV3000-001".into(),
            facility_id: "FAC001".into(),
            facility_name: "City General Hospital".into(),
            status: DeviceStatus::Online,
            battery_level: 85,
            last_service_date: "2024-01-15".into(),
            installation_date: "2023-06-01".into(),
            amc_status: ContractStatus::Active,
            cmc_status: ContractStatus::Active,
            location: "ICU Ward 2".into(),
            engineer: "John Smith".into(),
        },
        Device {
            id: "DEV002".into(),
            device_type: "Patient Monitor".into(),
            model: "CardioWatch 500".into(),
            serial_number: "CW500-045".into(),
            facility_id: "FAC002".into(),
            facility_name: "Metro Medical Center".into(),
            status: DeviceStatus::Maintenance,
            battery_level: 45,
            last_service_date: "2024-01-10".into(),
            installation_date: "2023-08-15".into(),
            amc_status: ContractStatus::ExpiringSoon,
            cmc_status: ContractStatus::Active,
            location: "Emergency Room".into(),
            engineer: "Sarah Johnson".into(),
        },
        Device {
            id: "DEV003".into(),
            device_type: "Infusion Pump".into(),
            model: "FlowMaster 200".into(),
            serial_number: "FM200-078".into(),
            facility_id: "FAC001".into(),
            facility_name: "City General Hospital".into(),
            status: DeviceStatus::Online,
            battery_level: 92,
            last_service_date: "2024-01-20".into(),
            installation_date: "2023-09-10".into(),
            amc_status: ContractStatus::Active,
            cmc_status: ContractStatus::Expired,
            location: "General Ward 1".into(),
            engineer: "Mike Davis".into(),
        },
        Device {
            id: "DEV004".into(),
            device_type: "Defibrillator".into(),
            model: "LifeSaver AED".into(),
            serial_number: "LS-AED-023".into(),
            facility_id: "FAC003".into(),
            facility_name: "Community Health Clinic".into(),
            status: DeviceStatus::Offline,
            battery_level: 15,
            last_service_date: "2023-12-30".into(),
            installation_date: "2023-07-20".into(),
            amc_status: ContractStatus::Active,
            cmc_status: ContractStatus::Active,
            location: "Emergency Station".into(),
            engineer: "Lisa Chen".into(),
        },
    ]
}

fn facilities() -> Vec<Facility> {
    vec![
        Facility {
            id: "FAC001".into(),
            name: "City General Hospital".into(),
            address: "123 Healthcare Avenue".into(),
            city: "Mumbai".into(),
            state: "Maharashtra".into(),
            pincode: "400001".into(),
            contact_person: "Dr. Rajesh Sharma".into(),
            contact_phone: "+91 98765 43210".into(),
            contact_email: "rajesh.sharma@citygeneral.com".into(),
            device_count: 2,
        },
        Facility {
            id: "FAC002".into(),
            name: "Metro Medical Center".into(),
            address: "456 Medical Plaza".into(),
            city: "Delhi".into(),
            state: "Delhi".into(),
            pincode: "110001".into(),
            contact_person: "Dr. Priya Patel".into(),
            contact_phone: "+91 98765 43211".into(),
            contact_email: "priya.patel@metromedical.com".into(),
            device_count: 1,
        },
        Facility {
            id: "FAC003".into(),
            name: "Community Health Clinic".into(),
            address: "789 Wellness Street".into(),
            city: "Bangalore".into(),
            state: "Karnataka".into(),
            pincode: "560001".into(),
            contact_person: "Dr. Anil Kumar".into(),
            contact_phone: "+91 98765 43212".into(),
            contact_email: "anil.kumar@communityclinic.com".into(),
            device_count: 1,
        },
    ]
}

fn engineers() -> Vec<Engineer> {
    vec![
        Engineer {
            id: "ENG001".into(),
            name: "John Smith".into(),
            email: "john.smith@company.com".into(),
            phone: "+91 98765 11111".into(),
            specialization: vec!["Ventilators".into(), "Patient Monitors".into()],
            active_assignments: 3,
            rating: 4.8,
        },
        Engineer {
            id: "ENG002".into(),
            name: "Sarah Johnson".into(),
            email: "sarah.johnson@company.com".into(),
            phone: "+91 98765 22222".into(),
            specialization: vec!["Patient Monitors".into(), "Infusion Pumps".into()],
            active_assignments: 2,
            rating: 4.9,
        },
        Engineer {
            id: "ENG003".into(),
            name: "Mike Davis".into(),
            email: "mike.davis@company.com".into(),
            phone: "+91 98765 33333".into(),
            specialization: vec!["Infusion Pumps".into(), "Defibrillators".into()],
            active_assignments: 1,
            rating: 4.7,
        },
        Engineer {
            id: "ENG004".into(),
            name: "Lisa Chen".into(),
            email: "lisa.chen@company.com".into(),
            phone: "+91 98765 44444".into(),
            specialization: vec!["Defibrillators".into(), "Ventilators".into()],
            active_assignments: 2,
            rating: 4.6,
        },
    ]
}

fn installations() -> Vec<Installation> {
    vec![Installation {
        id: "INST001".into(),
        device_id: "DEV001".into(),
        facility_id: "FAC001".into(),
        engineer_id: "ENG001".into(),
        engineer_name: "John Smith".into(),
        installation_date: "2024-01-25".into(),
        status: InstallationStatus::InProgress,
        checklist: vec![
            ChecklistItem {
                id: "CL001".into(),
                task: "Device unboxing and inspection".into(),
                completed: true,
                completed_by: Some("John Smith".into()),
                completed_at: Some("2024-01-25T09:00:00Z".into()),
            },
            ChecklistItem {
                id: "CL002".into(),
                task: "Power connection and calibration".into(),
                completed: true,
                completed_by: Some("John Smith".into()),
                completed_at: Some("2024-01-25T09:30:00Z".into()),
            },
            ChecklistItem {
                id: "CL003".into(),
                task: "Network configuration".into(),
                completed: false,
                completed_by: None,
                completed_at: None,
            },
            ChecklistItem {
                id: "CL004".into(),
                task: "Staff training".into(),
                completed: false,
                completed_by: None,
                completed_at: None,
            },
            ChecklistItem {
                id: "CL005".into(),
                task: "Final testing and documentation".into(),
                completed: false,
                completed_by: None,
                completed_at: None,
            },
        ],
        photos: vec![Photo {
            id: "PH001".into(),
            filename: "unboxing-1.jpg".into(),
            url: "https://images.pexels.com/photos/263402/pexels-photo-263402.jpeg".into(),
            uploaded_at: "2024-01-25T09:15:00Z".into(),
            uploaded_by: "John Smith".into(),
            category: PhotoCategory::Unboxing,
        }],
        training_completed: false,
        notes: "Installation proceeding smoothly. Network team scheduled for tomorrow.".into(),
    }]
}

fn visits() -> Vec<ServiceVisit> {
    vec![
        ServiceVisit {
            id: "SV001".into(),
            device_id: "DEV001".into(),
            facility_id: "FAC001".into(),
            engineer_id: "ENG001".into(),
            engineer_name: "John Smith".into(),
            visit_date: "2024-01-15".into(),
            purpose: VisitPurpose::Preventive,
            status: VisitStatus::Completed,
            notes: "Routine maintenance completed successfully. All systems functioning normally."
                .into(),
            photos: vec![Photo {
                id: "PH002".into(),
                filename: "maintenance-1.jpg".into(),
                url: "https://images.pexels.com/photos/3861458/pexels-photo-3861458.jpeg".into(),
                uploaded_at: "2024-01-15T14:30:00Z".into(),
                uploaded_by: "John Smith".into(),
                category: PhotoCategory::Maintenance,
            }],
            attachments: vec![],
            duration_minutes: 120,
        },
        ServiceVisit {
            id: "SV002".into(),
            device_id: "DEV002".into(),
            facility_id: "FAC002".into(),
            engineer_id: "ENG002".into(),
            engineer_name: "Sarah Johnson".into(),
            visit_date: "2024-01-20".into(),
            purpose: VisitPurpose::Breakdown,
            status: VisitStatus::InProgress,
            notes: "Investigating display issues. Replacement parts ordered.".into(),
            photos: vec![],
            attachments: vec![],
            duration_minutes: 90,
        },
    ]
}

fn contracts() -> Vec<Contract> {
    vec![
        Contract {
            id: "AMC001".into(),
            device_id: "DEV001".into(),
            contract_type: ContractType::AMC,
            start_date: "2023-06-01".into(),
            end_date: "2024-05-31".into(),
            status: ContractStatus::Active,
            cost: 50000,
            vendor: "MediTech Solutions".into(),
            terms: "Annual maintenance contract covering all preventive and corrective maintenance."
                .into(),
        },
        Contract {
            id: "CMC001".into(),
            device_id: "DEV002".into(),
            contract_type: ContractType::CMC,
            start_date: "2023-08-15".into(),
            end_date: "2024-03-15".into(),
            status: ContractStatus::ExpiringSoon,
            cost: 25000,
            vendor: "CardioTech Services".into(),
            terms: "Comprehensive maintenance contract with 24/7 support.".into(),
        },
    ]
}

fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "ALT001".into(),
            alert_type: AlertType::BatteryLow,
            severity: Severity::High,
            device_id: "DEV004".into(),
            facility_id: "FAC003".into(),
            message: "Defibrillator battery level critically low (15%)".into(),
            created_at: "2024-01-25T08:00:00Z".into(),
            resolved: false,
            resolved_at: None,
            resolved_by: None,
        },
        Alert {
            id: "ALT002".into(),
            alert_type: AlertType::ContractExpiring,
            severity: Severity::Medium,
            device_id: "DEV002".into(),
            facility_id: "FAC002".into(),
            message: "CMC contract expires in 30 days".into(),
            created_at: "2024-01-24T10:30:00Z".into(),
            resolved: false,
            resolved_at: None,
            resolved_by: None,
        },
        Alert {
            id: "ALT003".into(),
            alert_type: AlertType::ServiceDue,
            severity: Severity::Medium,
            device_id: "DEV003".into(),
            facility_id: "FAC001".into(),
            message: "Scheduled preventive maintenance due".into(),
            created_at: "2024-01-23T14:15:00Z".into(),
            resolved: true,
            resolved_at: Some("2024-01-25T09:00:00Z".into()),
            resolved_by: Some("Mike Davis".into()),
        },
    ]
}
