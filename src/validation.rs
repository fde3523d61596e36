use crate::calendar;
use crate::config::EngineConfig;
use crate::model::{EmployeeId, Roster, Schedule};
use crate::scheduler::DELIVERY_CUTOFFS;
use crate::stats::calculate_employee_stats;
use std::fmt;

/// Nombre minimal de créneaux par jour sous lequel on avertit.
const MIN_DAILY_SHIFTS: usize = 2;
/// Couverture minimale attendue, en pourcentage.
const MIN_COVERAGE_PERCENT: f64 = 80.0;
/// Part de l'objectif d'heures sous laquelle on avertit.
const MIN_TARGET_RATIO: f64 = 0.9;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    EmptySchedule,
    InvalidPeriod { month: u32, year: i32 },
    MissingDay(u32),
    FewShifts { day: u32, shifts: usize },
    UncoveredCutoff { day: u32, cutoff: &'static str },
    LowCoverage { day: u32, percentage: f64 },
    HoursBelowTarget { employee: EmployeeId, hours: f64, target: f64 },
    OvertimeAboveCap { employee: EmployeeId, overtime: f64, cap: f64 },
}

impl ValidationIssue {
    pub fn day(&self) -> Option<u32> {
        match self {
            ValidationIssue::MissingDay(day)
            | ValidationIssue::FewShifts { day, .. }
            | ValidationIssue::UncoveredCutoff { day, .. }
            | ValidationIssue::LowCoverage { day, .. } => Some(*day),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptySchedule => write!(f, "schedule is empty"),
            ValidationIssue::InvalidPeriod { month, year } => {
                write!(f, "invalid period: month {month}, year {year}")
            }
            ValidationIssue::MissingDay(day) => write!(f, "day {day}: no schedule"),
            ValidationIssue::FewShifts { day, shifts } => {
                write!(f, "day {day}: only {shifts} shift(s)")
            }
            ValidationIssue::UncoveredCutoff { day, cutoff } => {
                write!(f, "day {day}: cutoff {cutoff} not covered")
            }
            ValidationIssue::LowCoverage { day, percentage } => {
                write!(f, "day {day}: low coverage ({percentage:.1}%)")
            }
            ValidationIssue::HoursBelowTarget { employee, hours, target } => {
                write!(f, "{employee}: {hours:.1}h below target {target:.0}h")
            }
            ValidationIssue::OvertimeAboveCap { employee, overtime, cap } => {
                write!(f, "{employee}: {overtime:.1}h overtime exceeds cap {cap:.0}h")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// Contrôle un planning : période invalide et jours manquants en erreur, couverture et quotas
/// d'heures en avertissement. Seules les erreurs invalident le planning.
pub fn validate_schedule(
    schedule: &Schedule,
    roster: &Roster,
    config: &EngineConfig,
) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if schedule.is_empty() {
        errors.push(ValidationIssue::EmptySchedule);
        return ValidationResult {
            is_valid: false,
            errors,
            warnings,
        };
    }

    let (month, year) = (schedule.month, schedule.year);
    if !(1..=12).contains(&month) || year < 1 {
        errors.push(ValidationIssue::InvalidPeriod { month, year });
        return ValidationResult {
            is_valid: false,
            errors,
            warnings,
        };
    }
    for day in 1..=calendar::days_in_month(month, year) {
        let Some(ds) = schedule.day(day) else {
            errors.push(ValidationIssue::MissingDay(day));
            continue;
        };

        if ds.shifts.len() < MIN_DAILY_SHIFTS {
            warnings.push(ValidationIssue::FewShifts {
                day,
                shifts: ds.shifts.len(),
            });
        }

        if let Some(weekday) = calendar::weekday(day, month, year) {
            let dow = weekday.num_days_from_sunday();
            for cutoff in DELIVERY_CUTOFFS.iter().filter(|c| c.applies_on(dow)) {
                if !ds.coverage.covers(cutoff.hour) {
                    warnings.push(ValidationIssue::UncoveredCutoff {
                        day,
                        cutoff: cutoff.label,
                    });
                }
            }
        }

        if ds.coverage.percentage < MIN_COVERAGE_PERCENT {
            warnings.push(ValidationIssue::LowCoverage {
                day,
                percentage: ds.coverage.percentage,
            });
        }
    }

    let m = config.multipliers;
    for (employee, stats) in calculate_employee_stats(schedule, roster, config) {
        if stats.total_hours < config.target_hours * MIN_TARGET_RATIO {
            warnings.push(ValidationIssue::HoursBelowTarget {
                employee: employee.clone(),
                hours: stats.total_hours,
                target: config.target_hours,
            });
        }
        let overtime = stats.overtime_hours / m.overtime;
        if overtime > config.max_overtime_hours {
            warnings.push(ValidationIssue::OvertimeAboveCap {
                employee,
                overtime,
                cap: config.max_overtime_hours,
            });
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}
