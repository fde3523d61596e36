use super::coverage::calculate_day_coverage;
use super::types::HourBuckets;
use super::util::{closing_time, hours_between};
use super::Generation;
use crate::calendar;
use crate::catalog::ShiftKind;
use crate::model::{DaySchedule, EmployeeId, GenerationNotice, ShiftAssignment};
use tracing::{debug, warn};

const STANDARD_TRIO: [ShiftKind; 3] = [ShiftKind::Morning, ShiftKind::Midday, ShiftKind::Afternoon];
const SUPER_PEAK_TRIO: [ShiftKind; 3] = [
    ShiftKind::SuperPeakMorning,
    ShiftKind::SuperPeakMidday,
    ShiftKind::SuperPeakAfternoon,
];
const SKELETON_PAIR: [ShiftKind; 2] = [ShiftKind::Morning, ShiftKind::Afternoon];

/// Jeu de créneaux selon l'effectif réellement présent.
pub(super) fn select_shift_kinds(
    available: usize,
    super_peak_day: bool,
    super_peak_enabled: bool,
) -> &'static [ShiftKind] {
    match available {
        0 => &[],
        1 | 2 => &SKELETON_PAIR,
        _ if super_peak_day && super_peak_enabled => &SUPER_PEAK_TRIO,
        _ => &STANDARD_TRIO,
    }
}

/// Instancie un créneau type pour un jour donné. Hors super-pic, la fin est
/// écrêtée à 20:00 et les heures réduites d'autant.
pub(super) fn resolve_assignment(
    employee: &EmployeeId,
    kind: ShiftKind,
    super_peak_day: bool,
    is_holiday: bool,
) -> ShiftAssignment {
    let template = kind.template();
    let mut end = template.end;
    let mut hours = template.actual_hours;

    if !super_peak_day {
        let closing = closing_time(false);
        if end > closing {
            hours = (hours - hours_between(closing, end)).max(0.0);
            end = closing;
        }
    }

    ShiftAssignment {
        employee: employee.clone(),
        kind,
        start: template.start,
        end,
        break_window: template.break_window,
        hours,
        is_overtime: hours > 8.0,
        is_holiday,
        description: template.description.to_string(),
    }
}

impl Generation<'_> {
    fn required_headcount(&self, is_peak: bool, is_sunday: bool) -> usize {
        let rules = self.config.staffing;
        if is_peak {
            rules.peak
        } else if is_sunday {
            rules.sunday
        } else {
            rules.weekday
        }
    }

    /// Rappelle des employés en repos, dans l'ordre du roster, jusqu'à
    /// atteindre l'effectif requis. Le jour de repos est définitivement annulé.
    fn emergency_call_in(&mut self, day: u32, available: &mut Vec<usize>, required: usize) {
        warn!(day, available = available.len(), required, "peak day understaffed, calling in");
        for idx in 0..self.roster.len() {
            if available.len() >= required {
                break;
            }
            if !self.stats[idx].is_resting(day) {
                continue;
            }
            self.stats[idx].cancel_rest_day(day);
            available.push(idx);
            let employee = self.roster.employees[idx].id.clone();
            warn!(day, employee = %employee, "rest day cancelled for emergency call-in");
            self.notices
                .push(GenerationNotice::EmergencyCallIn { day, employee });
        }
    }

    /// Planning d'une journée : disponibles, rappel d'urgence éventuel, choix
    /// des créneaux puis affectation par heures cumulées croissantes.
    pub(super) fn assign_day(&mut self, day: u32) -> DaySchedule {
        let is_peak = self.peak_days.contains(&day);
        let is_super_peak = calendar::is_super_peak_day(day, self.month);
        let is_holiday = calendar::is_holiday(day, self.month, &self.config.holidays);
        let is_sunday = calendar::is_sunday(day, self.month, self.year);

        let mut available: Vec<usize> = (0..self.roster.len())
            .filter(|idx| !self.stats[*idx].is_resting(day))
            .collect();
        let required = self.required_headcount(is_peak, is_sunday);

        if is_peak && available.len() < required {
            self.emergency_call_in(day, &mut available, required);
        }

        let count = required.min(available.len());
        let kinds = select_shift_kinds(count, is_super_peak, self.config.super_peak_enabled);

        let m = self.config.multipliers;
        // tri stable : à heures égales, l'ordre du roster est conservé
        available.sort_by(|a, b| {
            self.stats[*a]
                .total(m)
                .total_cmp(&self.stats[*b].total(m))
        });

        let mut shifts = Vec::with_capacity(count);
        for (slot, idx) in available.into_iter().take(count).enumerate() {
            let kind = kinds[slot % kinds.len()];
            let employee = &self.roster.employees[idx].id;
            let shift = resolve_assignment(employee, kind, is_super_peak, is_holiday);
            self.stats[idx].add(HourBuckets::of(shift.hours, is_holiday, m));
            shifts.push(shift);
        }

        if shifts.len() < required {
            warn!(day, required, assigned = shifts.len(), "day below required headcount");
            self.notices.push(GenerationNotice::Understaffed {
                day,
                required,
                assigned: shifts.len(),
            });
        }
        debug!(day, shifts = shifts.len(), is_peak, is_super_peak, "day assigned");

        let coverage = calculate_day_coverage(&shifts);
        DaySchedule {
            day,
            shifts,
            is_peak,
            is_super_peak,
            is_holiday,
            is_sunday,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::clock;

    #[test]
    fn shift_set_depends_on_headcount() {
        assert!(select_shift_kinds(0, false, true).is_empty());
        assert_eq!(select_shift_kinds(2, true, true), &SKELETON_PAIR);
        assert_eq!(select_shift_kinds(3, true, true), &SUPER_PEAK_TRIO);
        assert_eq!(select_shift_kinds(3, true, false), &STANDARD_TRIO);
        assert_eq!(select_shift_kinds(3, false, true), &STANDARD_TRIO);
    }

    #[test]
    fn afternoon_is_clamped_to_closing_on_ordinary_days() {
        let id = EmployeeId::new("a");
        let s = resolve_assignment(&id, ShiftKind::Afternoon, false, false);
        assert_eq!(s.end, clock(20));
        assert_eq!(s.hours, 7.0);
        assert!(!s.is_overtime);

        let s = resolve_assignment(&id, ShiftKind::SuperPeakAfternoon, true, false);
        assert_eq!(s.end, clock(22));
        assert_eq!(s.hours, 10.0);
        assert!(s.is_overtime);
    }
}
