//! Classification du calendrier : jours du mois, jours de semaine, fériés,
//! jours de pic et de super-pic. Fonctions pures.

use crate::config::{EngineConfig, HolidayTable, PeakDayRules};
use chrono::{Datelike, NaiveDate, Weekday};

/// Jours de pic fixes qui ouvrent aussi droit aux créneaux super-pic.
pub const SUPER_PEAK_FIXED_DAYS: [u32; 2] = [15, 25];

/// Nombre de jours du mois (calendrier grégorien). 0 si le mois est invalide.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Jour de la semaine d'une date du mois.
pub fn weekday(day: u32, month: u32, year: i32) -> Option<Weekday> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.weekday())
}

pub fn is_sunday(day: u32, month: u32, year: i32) -> bool {
    weekday(day, month, year) == Some(Weekday::Sun)
}

/// "Date double" du mois : 1/1, 2/2 … 12/12.
pub fn double_date(month: u32) -> Option<u32> {
    (1..=12).contains(&month).then_some(month)
}

pub fn is_double_date(day: u32, month: u32) -> bool {
    double_date(month) == Some(day)
}

/// Jour de pic : jours fixes, date double (si activée) et jours personnalisés,
/// dans la limite du mois.
pub fn is_peak_day(day: u32, month: u32, year: i32, rules: &PeakDayRules) -> bool {
    if day == 0 || day > days_in_month(month, year) {
        return false;
    }
    rules.fixed.contains(&day)
        || rules.custom.contains(&day)
        || (rules.double_dates && is_double_date(day, month))
}

/// Super-pic : date double ou 15/25. Ces jours peuvent tourner jusqu'à 22:00.
pub fn is_super_peak_day(day: u32, month: u32) -> bool {
    is_double_date(day, month) || SUPER_PEAK_FIXED_DAYS.contains(&day)
}

pub fn is_holiday(day: u32, month: u32, holidays: &HolidayTable) -> bool {
    holidays.contains(month, day)
}

/// Jours de pic du mois, triés et dédoublonnés.
pub fn peak_days_for(month: u32, year: i32, config: &EngineConfig) -> Vec<u32> {
    (1..=days_in_month(month, year))
        .filter(|d| is_peak_day(*d, month, year, &config.peak_days))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gregorian_month_lengths() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2026), 28);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
        assert_eq!(days_in_month(4, 2026), 30);
        assert_eq!(days_in_month(12, 2026), 31);
        assert_eq!(days_in_month(13, 2026), 0);
    }

    #[test]
    fn double_dates_follow_month() {
        assert!(is_double_date(8, 8));
        assert!(is_double_date(12, 12));
        assert!(!is_double_date(22, 12));
        assert!(is_super_peak_day(25, 3));
        assert!(!is_super_peak_day(10, 3));
    }

    #[test]
    fn custom_peak_days_are_bounded_by_month() {
        let rules = PeakDayRules {
            custom: vec![30],
            ..PeakDayRules::default()
        };
        assert!(!is_peak_day(30, 2, 2026, &rules));
        assert!(is_peak_day(30, 3, 2026, &rules));
    }

    #[test]
    fn default_holidays() {
        let table = HolidayTable::default();
        assert!(is_holiday(30, 4, &table));
        assert!(!is_holiday(29, 4, &table));
        let table = table.with_extra(2, 17);
        assert!(is_holiday(17, 2, &table));
    }
}
