pub mod capture;
pub mod catalog;
pub mod checklist;
pub mod config;
pub mod fields;
pub mod models;
pub mod report;

pub use capture::CaptureLatch;
pub use catalog::{bind_project, CandidateTable, Catalog, Keyed, StaticTable};
pub use checklist::{is_ready, Checklist, Step};
pub use config::{ConfigError, PolecheckConfig};
pub use fields::{Field, ValidationError};
pub use models::{Attachment, Device, Measurement, ProjectAssignment, ProjectBinding, ProjectOption};
pub use report::{build_snapshot, DeviceSummary, NotReady, ReportSnapshot};
