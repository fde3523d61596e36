//! Équilibrage des heures vers l'objectif mensuel.
//!
//! Deux phases par employé : un plan d'opérations est calculé sur l'état
//! courant du planning, puis appliqué. Le plan ne mute rien, on peut donc le
//! tester isolément.

use super::assignment::resolve_assignment;
use super::coverage::calculate_day_coverage;
use super::types::HourBuckets;
use super::util::{add_hours, approx_zero, closing_time, hours_between, EXTENSION_CAP_HOUR};
use super::Generation;
use crate::catalog::{clock, ShiftKind};
use crate::model::GenerationNotice;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Prolongation maximale d'un créneau existant.
const MAX_EXTENSION_HOURS: f64 = 2.0;
/// Durée maximale d'un créneau après prolongation.
const MAX_SHIFT_HOURS: f64 = 10.0;
/// En dessous de ce manque, on ne reprend pas de jour de repos.
const RECLAIM_THRESHOLD_HOURS: f64 = 0.5;
/// Un jour repris ne doit pas déjà compter autant de créneaux.
const RECLAIM_DAY_CAPACITY: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum BalanceOp {
    /// Prolonge le créneau existant de l'employé ce jour-là.
    Extend { day: u32, employee: usize, hours: f64 },
    /// Annule un jour de repos et y ajoute un créneau.
    Reclaim { day: u32, employee: usize, kind: ShiftKind },
}

/// Créneau ajouté sur un jour repris, selon le nombre de créneaux existants.
fn reclaim_kind(existing: usize) -> ShiftKind {
    match existing {
        0 => ShiftKind::Morning,
        1 => ShiftKind::Afternoon,
        _ => ShiftKind::Midday,
    }
}

impl Generation<'_> {
    fn deficit_of(&self, idx: usize) -> f64 {
        self.config.target_hours - self.stats[idx].total(self.config.multipliers)
    }

    /// Plan d'équilibrage d'un employé, calculé sans muter le planning.
    pub(super) fn balance_plan(&self, idx: usize) -> Vec<BalanceOp> {
        let mut deficit = self.deficit_of(idx);
        let mut ops = Vec::new();
        if deficit <= 0.0 {
            return ops;
        }
        let employee = &self.roster.employees[idx].id;
        let cap = clock(EXTENSION_CAP_HOUR);

        for ds in self.days.values() {
            if deficit <= 0.0 || approx_zero(deficit) {
                break;
            }
            let Some(shift) = ds.shift_for(employee) else {
                continue;
            };
            if shift.hours >= MAX_SHIFT_HOURS {
                continue;
            }
            let limit = cap.min(closing_time(ds.is_super_peak));
            let hours = MAX_EXTENSION_HOURS
                .min(deficit)
                .min(MAX_SHIFT_HOURS - shift.hours)
                .min(hours_between(shift.end, limit));
            if hours <= 0.0 || approx_zero(hours) {
                continue;
            }
            ops.push(BalanceOp::Extend {
                day: ds.day,
                employee: idx,
                hours,
            });
            deficit -= hours;
        }

        if deficit > RECLAIM_THRESHOLD_HOURS {
            for &day in &self.stats[idx].rest_days {
                if deficit <= 0.0 {
                    break;
                }
                let Some(ds) = self.days.get(&day) else {
                    continue;
                };
                if ds.is_sunday || ds.shifts.len() >= RECLAIM_DAY_CAPACITY {
                    continue;
                }
                let kind = reclaim_kind(ds.shifts.len());
                let added = resolve_assignment(employee, kind, ds.is_super_peak, ds.is_holiday);
                ops.push(BalanceOp::Reclaim {
                    day,
                    employee: idx,
                    kind,
                });
                deficit -= added.hours;
            }
        }

        ops
    }

    /// Applique un plan, met à jour les compteurs et recalcule la couverture
    /// des jours touchés.
    pub(super) fn apply_balance_plan(&mut self, ops: &[BalanceOp]) {
        let m = self.config.multipliers;
        let mut touched = BTreeSet::new();

        for op in ops {
            match *op {
                BalanceOp::Extend { day, employee, hours } => {
                    let id = &self.roster.employees[employee].id;
                    let Some(shift) = self
                        .days
                        .get_mut(&day)
                        .and_then(|ds| ds.shifts.iter_mut().find(|s| &s.employee == id))
                    else {
                        continue;
                    };
                    let before = HourBuckets::of(shift.hours, shift.is_holiday, m);
                    shift.hours += hours;
                    shift.end = add_hours(shift.end, hours);
                    shift.is_overtime = shift.hours > 8.0;
                    let after = HourBuckets::of(shift.hours, shift.is_holiday, m);
                    self.stats[employee].add(after.minus(before));
                    touched.insert(day);
                }
                BalanceOp::Reclaim { day, employee, kind } => {
                    let Some(ds) = self.days.get_mut(&day) else {
                        continue;
                    };
                    let id = &self.roster.employees[employee].id;
                    let shift = resolve_assignment(id, kind, ds.is_super_peak, ds.is_holiday);
                    self.stats[employee].cancel_rest_day(day);
                    self.stats[employee].add(HourBuckets::of(shift.hours, shift.is_holiday, m));
                    debug!(day, employee = %id, kind = kind.as_str(), "rest day reclaimed");
                    ds.shifts.push(shift);
                    touched.insert(day);
                }
            }
        }

        for day in touched {
            if let Some(ds) = self.days.get_mut(&day) {
                ds.coverage = calculate_day_coverage(&ds.shifts);
            }
        }
    }

    /// Passe d'équilibrage, employé par employé dans l'ordre du roster.
    /// Au mieux : un manque résiduel est signalé, jamais retenté.
    pub(super) fn balance_hours(&mut self) {
        for idx in 0..self.roster.len() {
            let plan = self.balance_plan(idx);
            if !plan.is_empty() {
                debug!(
                    employee = %self.roster.employees[idx].id,
                    ops = plan.len(),
                    "balancing plan"
                );
            }
            self.apply_balance_plan(&plan);
        }

        for idx in 0..self.roster.len() {
            let employee = self.roster.employees[idx].id.clone();
            let total = self.stats[idx].total(self.config.multipliers);
            let missing = self.config.target_hours - total;
            info!(
                employee = %employee,
                total,
                target = self.config.target_hours,
                "hours after balancing"
            );
            if missing > RECLAIM_THRESHOLD_HOURS {
                warn!(employee = %employee, missing, "employee below target hours");
                self.notices.push(GenerationNotice::HoursShortfall {
                    employee,
                    missing_hours: missing,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::model::Roster;

    fn run<'a>(config: &'a EngineConfig, roster: &'a Roster) -> Generation<'a> {
        let mut g = Generation::new(config, roster, 3, 2026);
        g.allocate_rest_days();
        for day in 1..=g.days_in_month {
            let ds = g.assign_day(day);
            g.days.insert(day, ds);
        }
        g
    }

    #[test]
    fn no_plan_when_target_is_reached() {
        let config = EngineConfig {
            target_hours: 10.0,
            ..EngineConfig::default()
        };
        let roster = Roster::from_handles("a,b,c");
        let g = run(&config, &roster);
        assert!(g.balance_plan(0).is_empty());
    }

    #[test]
    fn plan_extends_first_then_reclaims() {
        let config = EngineConfig {
            target_hours: 260.0,
            ..EngineConfig::default()
        };
        let roster = Roster::from_handles("a,b,c");
        let g = run(&config, &roster);
        let plan = g.balance_plan(0);
        assert!(!plan.is_empty());

        let pos = plan
            .iter()
            .position(|op| matches!(op, BalanceOp::Reclaim { .. }))
            .expect("deficit too large for extensions alone");
        assert!(pos > 0);
        assert!(plan[..pos]
            .iter()
            .all(|op| matches!(op, BalanceOp::Extend { .. })));
        assert!(plan[pos..]
            .iter()
            .all(|op| matches!(op, BalanceOp::Reclaim { .. })));
        for op in &plan {
            if let BalanceOp::Extend { hours, .. } = op {
                assert!(*hours > 0.0 && *hours <= MAX_EXTENSION_HOURS);
            }
        }
    }

    #[test]
    fn applied_plan_keeps_bookkeeping_consistent() {
        let config = EngineConfig::default();
        let roster = Roster::from_handles("a,b,c");
        let mut g = run(&config, &roster);
        g.balance_hours();

        let m = config.multipliers;
        for (idx, e) in roster.employees.iter().enumerate() {
            let raw: f64 = g
                .days
                .values()
                .filter_map(|d| d.shift_for(&e.id))
                .map(|s| s.hours)
                .sum();
            assert!((raw - g.stats[idx].total(m)).abs() < 1e-6);
        }
        for ds in g.days.values().filter(|d| !d.is_super_peak) {
            assert!(ds.shifts.iter().all(|s| s.end <= clock(20)));
        }
    }
}
