use crate::calendar;
use crate::config::EngineConfig;
use serde::Serialize;

/// Effectif de base retenu pour l'analyse (deux personnes sur toute l'amplitude).
const BASELINE_HEADCOUNT: f64 = 2.0;
const ORDINARY_DAY_HOURS: f64 = 12.0;
const SUPER_PEAK_DAY_HOURS: f64 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffingAction {
    Hire,
    Reduce,
    Maintain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffingAnalysis {
    pub month: u32,
    pub year: i32,
    pub current: usize,
    pub optimal: usize,
    pub action: StaffingAction,
    pub total_hours: f64,
    pub avg_hours_per_employee: f64,
    /// Écart moyen à l'objectif mensuel ; positif = heures sup probables.
    pub overtime_risk: f64,
    pub peak_days: Vec<u32>,
}

/// Estime l'effectif nécessaire pour tenir l'amplitude d'ouverture du mois
/// avec l'objectif d'heures par employé.
pub fn analyze_staffing(
    month: u32,
    year: i32,
    headcount: usize,
    config: &EngineConfig,
) -> StaffingAnalysis {
    let open_hours: f64 = (1..=calendar::days_in_month(month, year))
        .map(|day| {
            if calendar::is_super_peak_day(day, month) {
                SUPER_PEAK_DAY_HOURS
            } else {
                ORDINARY_DAY_HOURS
            }
        })
        .sum();
    let total_hours = open_hours * BASELINE_HEADCOUNT;
    let optimal = (total_hours / config.target_hours).ceil() as usize;

    let action = if optimal > headcount {
        StaffingAction::Hire
    } else if optimal + 1 < headcount {
        StaffingAction::Reduce
    } else {
        StaffingAction::Maintain
    };

    let avg_hours_per_employee = if headcount == 0 {
        total_hours
    } else {
        total_hours / headcount as f64
    };

    StaffingAnalysis {
        month,
        year,
        current: headcount,
        optimal,
        action,
        total_hours,
        avg_hours_per_employee,
        overtime_risk: avg_hours_per_employee - config.target_hours,
        peak_days: calendar::peak_days_for(month, year, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn february_needs_a_fourth_person() {
        // 28 jours dont 3 super-pics (2, 15, 25) : (25*12 + 3*14) * 2 = 684 h
        let a = analyze_staffing(2, 2026, 3, &EngineConfig::default());
        assert_eq!(a.total_hours, 684.0);
        assert_eq!(a.optimal, 4);
        assert_eq!(a.action, StaffingAction::Hire);
        assert_eq!(a.peak_days, vec![2, 15, 25]);
    }

    #[test]
    fn large_team_can_shrink() {
        let a = analyze_staffing(2, 2026, 8, &EngineConfig::default());
        assert_eq!(a.action, StaffingAction::Reduce);
        let a = analyze_staffing(2, 2026, 5, &EngineConfig::default());
        assert_eq!(a.action, StaffingAction::Maintain);
    }
}
