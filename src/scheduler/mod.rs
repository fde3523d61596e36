mod assignment;
mod balance;
mod coverage;
mod rest_days;
mod types;
mod util;

pub use coverage::{calculate_day_coverage, DeliveryCutoff, DELIVERY_CUTOFFS};
pub use types::SchedError;
pub(crate) use types::HourBuckets;

use crate::calendar;
use crate::config::EngineConfig;
use crate::model::{DaySchedule, EmployeeStats, GenerationNotice, Roster, Schedule};
use crate::stats;
use crate::validation::{self, ValidationResult};
use rest_days::RestDayContext;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};
use types::RunningStats;

/// Scheduler : porte une configuration validée et génère des plannings.
///
/// Chaque génération travaille sur ses propres compteurs et son propre
/// planning ; un `Scheduler` peut donc servir plusieurs mois en parallèle.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: EngineConfig,
}

impl Scheduler {
    pub fn new(config: EngineConfig) -> Result<Self, SchedError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn peak_days(&self, month: u32, year: i32) -> Vec<u32> {
        calendar::peak_days_for(month, year, &self.config)
    }

    /// Génère le planning complet d'un mois : repos, affectations quotidiennes
    /// puis équilibrage des heures.
    pub fn generate(&self, month: u32, year: i32, roster: &Roster) -> Result<Schedule, SchedError> {
        generate_schedule(month, year, roster, &self.config)
    }

    pub fn employee_stats(
        &self,
        schedule: &Schedule,
        roster: &Roster,
    ) -> BTreeMap<crate::model::EmployeeId, EmployeeStats> {
        stats::calculate_employee_stats(schedule, roster, &self.config)
    }

    pub fn validate(&self, schedule: &Schedule, roster: &Roster) -> ValidationResult {
        validation::validate_schedule(schedule, roster, &self.config)
    }
}

/// Génère un planning mensuel ; la configuration est validée au préalable.
pub fn generate_schedule(
    month: u32,
    year: i32,
    roster: &Roster,
    config: &EngineConfig,
) -> Result<Schedule, SchedError> {
    config.validate()?;
    check_inputs(month, year, roster)?;
    let mut run = Generation::new(config, roster, month, year);
    run.allocate_rest_days();
    for day in 1..=run.days_in_month {
        let ds = run.assign_day(day);
        run.days.insert(day, ds);
    }
    run.balance_hours();

    let schedule = run.finish();
    info!(
        month,
        year,
        days = schedule.days.len(),
        notices = schedule.notices.len(),
        "schedule generated"
    );
    Ok(schedule)
}

fn check_inputs(month: u32, year: i32, roster: &Roster) -> Result<(), SchedError> {
    if !(1..=12).contains(&month) {
        return Err(SchedError::InvalidMonth(month));
    }
    if year < 1 {
        return Err(SchedError::InvalidYear(year));
    }
    if roster.is_empty() {
        return Err(SchedError::EmptyRoster);
    }
    let mut seen = BTreeSet::new();
    for e in &roster.employees {
        if !seen.insert(&e.id) {
            return Err(SchedError::DuplicateEmployee(e.id.as_str().to_string()));
        }
    }
    Ok(())
}

/// État d'une génération en cours. Les compteurs sont indexés comme le roster.
pub(crate) struct Generation<'a> {
    config: &'a EngineConfig,
    roster: &'a Roster,
    month: u32,
    year: i32,
    days_in_month: u32,
    peak_days: Vec<u32>,
    stats: Vec<RunningStats>,
    days: BTreeMap<u32, DaySchedule>,
    notices: Vec<GenerationNotice>,
}

impl<'a> Generation<'a> {
    fn new(config: &'a EngineConfig, roster: &'a Roster, month: u32, year: i32) -> Self {
        Self {
            config,
            roster,
            month,
            year,
            days_in_month: calendar::days_in_month(month, year),
            peak_days: calendar::peak_days_for(month, year, config),
            stats: vec![RunningStats::default(); roster.len()],
            days: BTreeMap::new(),
            notices: Vec::new(),
        }
    }

    fn allocate_rest_days(&mut self) {
        let ctx = RestDayContext {
            month: self.month,
            year: self.year,
            days_in_month: self.days_in_month,
            peak_days: &self.peak_days,
            holidays: &self.config.holidays,
        };
        for (idx, employee) in self.roster.employees.iter().enumerate() {
            let rest = ctx.allocate_for(idx);
            debug!(employee = %employee.id, rest_days = ?rest, "rest days allocated");
            self.stats[idx].rest_days = rest;
        }
    }

    fn finish(self) -> Schedule {
        let rest_days = self
            .roster
            .employees
            .iter()
            .zip(self.stats)
            .map(|(e, s)| (e.id.clone(), s.rest_days))
            .collect();
        Schedule {
            month: self.month,
            year: self.year,
            days: self.days,
            rest_days,
            notices: self.notices,
        }
    }
}
