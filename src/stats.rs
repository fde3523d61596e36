use crate::config::EngineConfig;
use crate::model::{EmployeeId, EmployeeStats, Roster, Schedule};
use crate::scheduler::HourBuckets;
use std::collections::BTreeMap;

/// Recalcule les heures de chaque employé du roster à partir des seuls
/// créneaux finalisés du planning. Source de vérité pour les rapports.
///
/// Les créneaux d'employés absents du roster sont ignorés. Les jours de repos
/// sont ceux alloués à la génération, pas les jours sans créneau.
pub fn calculate_employee_stats(
    schedule: &Schedule,
    roster: &Roster,
    config: &EngineConfig,
) -> BTreeMap<EmployeeId, EmployeeStats> {
    let m = config.multipliers;
    let mut stats: BTreeMap<EmployeeId, EmployeeStats> = roster
        .employees
        .iter()
        .map(|e| (e.id.clone(), EmployeeStats::default()))
        .collect();

    for day in schedule.days.values() {
        for shift in &day.shifts {
            let Some(entry) = stats.get_mut(&shift.employee) else {
                continue;
            };
            let b = HourBuckets::of(shift.hours, shift.is_holiday, m);
            entry.shifts += 1;
            entry.regular_hours += b.regular;
            entry.overtime_hours += b.overtime;
            entry.holiday_hours += b.holiday;
        }
    }

    for (id, entry) in stats.iter_mut() {
        entry.total_hours = entry.regular_hours
            + entry.overtime_hours / m.overtime
            + entry.holiday_hours / m.holiday;
        entry.rest_days = schedule.rest_days_of(id).to_vec();
    }

    stats
}
