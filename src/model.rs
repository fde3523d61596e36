use crate::catalog::{BreakWindow, ShiftKind};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Identifiant fort pour un employé
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employé de l'entrepôt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default = "EmployeeId::random")]
    pub id: EmployeeId,
    pub handle: String,
    pub display_name: String,
}

impl Employee {
    /// Employé dont l'identifiant est son handle (rosters saisis à la main).
    pub fn with_handle<H: Into<String>>(handle: H) -> Self {
        let handle = handle.into();
        Self {
            id: EmployeeId::new(&handle),
            display_name: handle.clone(),
            handle,
        }
    }
}

/// Effectif actif, dans l'ordre du roster (l'ordre compte pour les rappels).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Roster {
    pub employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    /// Construit un roster depuis une liste "handle1,handle2,...".
    pub fn from_handles(list: &str) -> Self {
        let employees = list
            .split(',')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(Employee::with_handle)
            .collect();
        Self { employees }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
    pub fn find_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Employee> {
        self.employees.iter().find(|e| e.handle == handle)
    }
    pub fn find_by_id<'a>(&'a self, id: &EmployeeId) -> Option<&'a Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
}

/// Affectation d'un employé à un créneau pour une journée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub employee: EmployeeId,
    pub kind: ShiftKind,
    pub start: NaiveTime,
    pub end: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_window: Option<BreakWindow>,
    pub hours: f64,
    pub is_overtime: bool,
    pub is_holiday: bool,
    pub description: String,
}

/// Résumé de couverture d'une journée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CoverageSummary {
    /// Heures d'horloge (0..=23) où au moins un employé est présent.
    pub hours: Vec<u8>,
    /// Heure limite de transporteur -> couverte ou non.
    pub critical: BTreeMap<String, bool>,
    /// Part de la fenêtre de référence 08:00–20:00 couverte, dans [0, 100].
    pub percentage: f64,
}

impl CoverageSummary {
    pub fn covers(&self, hour: u8) -> bool {
        self.hours.contains(&hour)
    }
}

/// Planning d'une journée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u32,
    pub shifts: Vec<ShiftAssignment>,
    pub is_peak: bool,
    pub is_super_peak: bool,
    pub is_holiday: bool,
    pub is_sunday: bool,
    pub coverage: CoverageSummary,
}

impl DaySchedule {
    pub fn shift_for(&self, employee: &EmployeeId) -> Option<&ShiftAssignment> {
        self.shifts.iter().find(|s| &s.employee == employee)
    }
}

/// Évènements de génération remontés aux appelants (jamais des erreurs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationNotice {
    /// Un jour de repos a été annulé pour tenir l'effectif d'un jour de pic.
    EmergencyCallIn { day: u32, employee: EmployeeId },
    /// L'effectif requis n'a pas pu être atteint.
    Understaffed { day: u32, required: usize, assigned: usize },
    /// L'employé termine le mois sous l'objectif malgré l'équilibrage.
    HoursShortfall { employee: EmployeeId, missing_hours: f64 },
}

/// Planning mensuel complet, unité de génération.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schedule {
    pub month: u32,
    pub year: i32,
    pub days: BTreeMap<u32, DaySchedule>,
    /// Jours de repos effectivement alloués (après rappels et reprises).
    #[serde(default)]
    pub rest_days: BTreeMap<EmployeeId, Vec<u32>>,
    #[serde(default)]
    pub notices: Vec<GenerationNotice>,
}

impl Schedule {
    pub fn day(&self, day: u32) -> Option<&DaySchedule> {
        self.days.get(&day)
    }
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
    pub fn rest_days_of(&self, employee: &EmployeeId) -> &[u32] {
        self.rest_days
            .get(employee)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
    /// Toutes les affectations d'un employé, en ordre chronologique.
    pub fn shifts_of<'a>(
        &'a self,
        employee: &'a EmployeeId,
    ) -> impl Iterator<Item = (u32, &'a ShiftAssignment)> + 'a {
        self.days
            .values()
            .filter_map(move |d| d.shift_for(employee).map(|s| (d.day, s)))
    }
}

/// Statistiques finales d'un employé (heures pondérées par multiplicateur).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmployeeStats {
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub holiday_hours: f64,
    pub total_hours: f64,
    pub rest_days: Vec<u32>,
    pub shifts: u32,
}
