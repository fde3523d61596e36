//! Allocation des jours de repos : environ un par semaine et par employé.

use crate::calendar;
use crate::config::HolidayTable;
use chrono::Weekday;

/// Fenêtre de jours consécutifs (au plus 7) dans le mois.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct WeekWindow {
    pub first: u32,
    pub last: u32,
}

pub(super) fn week_windows(days_in_month: u32) -> Vec<WeekWindow> {
    (0..days_in_month.div_ceil(7))
        .map(|week| {
            let first = week * 7 + 1;
            WeekWindow {
                first,
                last: (first + 6).min(days_in_month),
            }
        })
        .collect()
}

/// Jour de semaine préféré, décalé le long du roster (0 = dimanche).
pub(super) fn preferred_weekday(employee_index: usize) -> u32 {
    ((employee_index + 2) % 7) as u32
}

/// Contexte commun au calcul des scores d'un mois.
pub(super) struct RestDayContext<'a> {
    pub month: u32,
    pub year: i32,
    pub days_in_month: u32,
    pub peak_days: &'a [u32],
    pub holidays: &'a HolidayTable,
}

impl RestDayContext<'_> {
    /// Score d'un jour candidat : plus il est élevé, moins le repos gêne.
    pub fn score(&self, day: u32, preferred: u32) -> i32 {
        let weekday = calendar::weekday(day, self.month, self.year);
        let dow = weekday.map(|w| w.num_days_from_sunday());
        let mut score = 0;
        score += if self.peak_days.contains(&day) { -50 } else { 30 };
        if !calendar::is_holiday(day, self.month, self.holidays) {
            score += 20;
        }
        if dow == Some(preferred) {
            score += 10;
        }
        if weekday != Some(Weekday::Sun) {
            score += 5;
        }
        if matches!(dow, Some(1..=4)) {
            score += 3;
        }
        score
    }

    /// Jours de repos d'un employé : meilleur jour de chaque semaine (à score
    /// égal, le plus tôt), jusqu'à `floor(jours / 7)` jours.
    pub fn allocate_for(&self, employee_index: usize) -> Vec<u32> {
        let needed = (self.days_in_month / 7) as usize;
        let preferred = preferred_weekday(employee_index);
        let mut rest = Vec::with_capacity(needed);

        for window in week_windows(self.days_in_month) {
            if rest.len() >= needed {
                break;
            }
            let mut best: Option<(u32, i32)> = None;
            for day in window.first..=window.last {
                let score = self.score(day, preferred);
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((day, score));
                }
            }
            if let Some((day, _)) = best {
                rest.push(day);
            }
        }

        rest.sort_unstable();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(peaks: &'a [u32], holidays: &'a HolidayTable) -> RestDayContext<'a> {
        // mars 2026 : le 1er est un dimanche
        RestDayContext {
            month: 3,
            year: 2026,
            days_in_month: 31,
            peak_days: peaks,
            holidays,
        }
    }

    #[test]
    fn windows_cover_the_month() {
        let w = week_windows(31);
        assert_eq!(w.len(), 5);
        assert_eq!(
            w[4],
            WeekWindow {
                first: 29,
                last: 31
            }
        );
        assert_eq!(week_windows(28).len(), 4);
    }

    #[test]
    fn one_rest_day_per_week_on_preferred_weekday() {
        let holidays = HolidayTable::empty();
        let peaks = [3, 15, 25];
        let c = ctx(&peaks, &holidays);
        // index 0 -> mardi ; le mardi 3 est un pic, on retombe sur lundi 2
        assert_eq!(c.allocate_for(0), vec![2, 10, 17, 24]);
        // index 1 -> mercredi ; le mercredi 25 est un pic, lundi 23 le remplace
        assert_eq!(c.allocate_for(1), vec![4, 11, 18, 23]);
    }

    #[test]
    fn peak_days_are_heavily_penalised() {
        let holidays = HolidayTable::empty();
        let peaks = [10];
        let c = ctx(&peaks, &holidays);
        assert!(c.score(10, 2) < c.score(8, 2));
        // dimanche non préféré : 30 + 20
        assert_eq!(c.score(8, 2), 50);
        // mardi préféré : 30 + 20 + 10 + 5 + 3
        assert_eq!(c.score(17, 2), 68);
    }

    #[test]
    fn rest_day_count_is_floor_of_weeks() {
        let holidays = HolidayTable::default();
        let c = RestDayContext {
            month: 2,
            year: 2026,
            days_in_month: 28,
            peak_days: &[2, 15, 25],
            holidays: &holidays,
        };
        for idx in 0..7 {
            assert_eq!(c.allocate_for(idx).len(), 4);
        }
    }
}
