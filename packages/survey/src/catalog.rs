//! # Candidate tables: read-only lookup of projects and devices
//!
//! Stand-ins for the dispatch backend. Everything that needs a project or device
//! record goes through the [`CandidateTable`] trait, so a remote-backed table can
//! replace [`StaticTable`] without touching binding, readiness or report code.
//!
//! [`Catalog`] bundles the selector options, the assignment table, the device
//! table and the serial of the rangefinder to bind when a project is connected.
//! [`Catalog::builtin`] carries the simulated data; [`Catalog::from_config`] lets a
//! `polecheck.toml` replace any of it.

use crate::config::PolecheckConfig;
use crate::models::{Device, ProjectAssignment, ProjectBinding, ProjectOption};

/// Exact-match lookup of a record by identifier.
pub trait CandidateTable {
    type Record;

    fn find(&self, id: &str) -> Option<Self::Record>;
}

/// A record that can be looked up by a string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for ProjectAssignment {
    fn key(&self) -> &str {
        &self.project_id
    }
}

impl Keyed for Device {
    fn key(&self) -> &str {
        &self.serial_number
    }
}

/// In-memory table backed by a fixed list of records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticTable<R> {
    records: Vec<R>,
}

impl<R> StaticTable<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: Keyed + Clone> CandidateTable for StaticTable<R> {
    type Record = R;

    fn find(&self, id: &str) -> Option<R> {
        self.records.iter().find(|r| r.key() == id).cloned()
    }
}

/// Connect to `project_id`, deriving its assignment and the given device.
///
/// Missing records leave the corresponding part of the binding empty.
pub fn bind_project<P, D>(
    projects: &P,
    devices: &D,
    project_id: &str,
    device_serial: &str,
) -> ProjectBinding
where
    P: CandidateTable<Record = ProjectAssignment>,
    D: CandidateTable<Record = Device>,
{
    ProjectBinding {
        project_id: project_id.to_string(),
        assignment: projects.find(project_id),
        device: devices.find(device_serial),
    }
}

/// Everything the project selector and binder need.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    options: Vec<ProjectOption>,
    projects: StaticTable<ProjectAssignment>,
    devices: StaticTable<Device>,
    rangefinder_serial: String,
}

impl Catalog {
    /// The simulated assignment and device data.
    pub fn builtin() -> Self {
        Self {
            options: builtin_options(),
            projects: StaticTable::new(builtin_assignments()),
            devices: StaticTable::new(builtin_devices()),
            rangefinder_serial: crate::config::DEFAULT_RANGEFINDER_SERIAL.to_string(),
        }
    }

    /// Built-in data with any tables present in `config` substituted.
    pub fn from_config(config: &PolecheckConfig) -> Self {
        let mut catalog = Self::builtin();
        if !config.options.is_empty() {
            catalog.options = config.options.clone();
        }
        if !config.projects.is_empty() {
            catalog.projects = StaticTable::new(config.projects.clone());
        }
        if !config.devices.is_empty() {
            catalog.devices = StaticTable::new(config.devices.clone());
        }
        catalog.rangefinder_serial = config.field.rangefinder_serial.clone();
        catalog
    }

    pub fn options(&self) -> &[ProjectOption] {
        &self.options
    }

    pub fn projects(&self) -> &StaticTable<ProjectAssignment> {
        &self.projects
    }

    pub fn devices(&self) -> &StaticTable<Device> {
        &self.devices
    }

    pub fn rangefinder_serial(&self) -> &str {
        &self.rangefinder_serial
    }

    pub fn bind(&self, project_id: &str) -> ProjectBinding {
        bind_project(&self.projects, &self.devices, project_id, &self.rangefinder_serial)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_options() -> Vec<ProjectOption> {
    [
        ("PROJ-2024-123", "123 Main St - Pole Replacement"),
        ("PROJ-2024-456", "456 Oak Ave - Transformer Install"),
        ("PROJ-2024-789", "789 Pine Ln - Cable Repair"),
    ]
    .into_iter()
    .map(|(id, description)| ProjectOption {
        project_id: id.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn builtin_assignments() -> Vec<ProjectAssignment> {
    vec![
        ProjectAssignment {
            project_id: "PROJ-2024-123".to_string(),
            address: "123 Main Street, Anytown".to_string(),
            scope_of_work: "Replace damaged pole".to_string(),
            scheduled_dates: "2024-08-15".to_string(),
        },
        ProjectAssignment {
            project_id: "PROJ-2024-456".to_string(),
            address: "456 Oak Avenue, Anotherville".to_string(),
            scope_of_work: "Install new transformer".to_string(),
            scheduled_dates: "2024-08-22".to_string(),
        },
    ]
}

fn builtin_devices() -> Vec<Device> {
    vec![
        Device {
            serial_number: "TRU-12345".to_string(),
            device_type: "TruPulse 200x".to_string(),
            location: "Truck 1".to_string(),
        },
        Device {
            serial_number: "CAM-67890".to_string(),
            device_type: "Mobile Camera".to_string(),
            location: "Technician 1".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_known_project_derives_details() {
        let binding = Catalog::builtin().bind("PROJ-2024-123");
        assert_eq!(binding.project_id, "PROJ-2024-123");
        assert_eq!(binding.address(), Some("123 Main Street, Anytown"));
        assert_eq!(binding.scope_of_work(), Some("Replace damaged pole"));
        assert_eq!(binding.scheduled_dates(), Some("2024-08-15"));

        let device = binding.device.expect("rangefinder bound");
        assert_eq!(device.serial_number, "TRU-12345");
        assert_eq!(device.device_type, "TruPulse 200x");
        assert_eq!(device.location, "Truck 1");
    }

    #[test]
    fn test_bind_unlisted_project_has_no_details() {
        let binding = Catalog::builtin().bind("PROJ-2024-789");
        assert_eq!(binding.project_id, "PROJ-2024-789");
        assert!(binding.assignment.is_none());
        assert!(binding.address().is_none());
        assert!(binding.scope_of_work().is_none());
        assert!(binding.scheduled_dates().is_none());
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let catalog = Catalog::builtin();
        assert!(catalog.projects().find("PROJ-2024-456").is_some());
        assert!(catalog.projects().find("proj-2024-456").is_none());
        assert!(catalog.projects().find("PROJ-2024-45").is_none());
        assert!(catalog.devices().find("CAM-67890").is_some());
    }

    struct OneProject;

    impl CandidateTable for OneProject {
        type Record = ProjectAssignment;

        fn find(&self, id: &str) -> Option<ProjectAssignment> {
            (id == "REMOTE-1").then(|| ProjectAssignment {
                project_id: id.to_string(),
                address: "1 Remote Road".to_string(),
                scope_of_work: "Inspect".to_string(),
                scheduled_dates: "2025-01-01".to_string(),
            })
        }
    }

    #[test]
    fn test_bind_with_substituted_table() {
        let devices = StaticTable::new(builtin_devices());
        let binding = bind_project(&OneProject, &devices, "REMOTE-1", "CAM-67890");
        assert_eq!(binding.address(), Some("1 Remote Road"));
        assert_eq!(binding.device.map(|d| d.device_type), Some("Mobile Camera".to_string()));

        let missing = bind_project(&OneProject, &devices, "REMOTE-2", "NOPE");
        assert!(missing.assignment.is_none());
        assert!(missing.device.is_none());
    }

    #[test]
    fn test_from_config_overrides_tables() {
        let config = PolecheckConfig::from_toml(
            r#"
            [field]
            rangefinder_serial = "CAM-67890"

            [[projects]]
            project_id = "PROJ-X"
            address = "9 Elm Court"
            scope_of_work = "Survey"
            scheduled_dates = "2025-03-01"

            [[options]]
            project_id = "PROJ-X"
            description = "9 Elm Ct - Survey"
            "#,
        )
        .unwrap();
        let catalog = Catalog::from_config(&config);
        assert_eq!(catalog.options().len(), 1);
        assert_eq!(catalog.rangefinder_serial(), "CAM-67890");

        let binding = catalog.bind("PROJ-X");
        assert_eq!(binding.address(), Some("9 Elm Court"));
        // device table was not overridden
        assert_eq!(binding.device.map(|d| d.location), Some("Technician 1".to_string()));
        assert!(catalog.bind("PROJ-2024-123").assignment.is_none());
    }
}
