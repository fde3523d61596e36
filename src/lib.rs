#![forbid(unsafe_code)]
//! Entrepôt : moteur de planification mensuelle des équipes d'un entrepôt.
//!
//! - Jours de pic, super-pic et fériés calculés à partir du calendrier.
//! - Un jour de repos par semaine, placé là où il gêne le moins.
//! - Affectation quotidienne par heures cumulées, rappel d'urgence les jours de pic.
//! - Équilibrage des heures vers l'objectif mensuel, puis validation.
//! - Aucune I/O dans le moteur ; le JSON n'est lu et écrit qu'aux bords (`io`, CLI).

pub mod calendar;
pub mod catalog;
pub mod config;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod staffing;
pub mod stats;
pub mod validation;

pub use calendar::peak_days_for;
pub use catalog::{BreakWindow, HourRange, ShiftKind, ShiftTemplate, ShiftVariant};
pub use config::{
    load_config_from_file, EngineConfig, HolidayTable, Multipliers, PeakDayRules, StaffingRules,
};
pub use model::{
    CoverageSummary, DaySchedule, Employee, EmployeeId, EmployeeStats, GenerationNotice, Roster,
    Schedule, ShiftAssignment,
};
pub use scheduler::{generate_schedule, SchedError, Scheduler};
pub use staffing::{analyze_staffing, StaffingAction, StaffingAnalysis};
pub use stats::calculate_employee_stats;
pub use validation::{validate_schedule, ValidationIssue, ValidationResult};
