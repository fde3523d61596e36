use super::util::ceil_hour;
use crate::model::{CoverageSummary, ShiftAssignment};
use std::collections::BTreeSet;

/// Fenêtre de référence de l'entrepôt : 08:00–20:00.
pub const REFERENCE_OPEN: u8 = 8;
pub const REFERENCE_CLOSE: u8 = 20;

/// Heure limite d'enlèvement d'un transporteur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryCutoff {
    pub label: &'static str,
    pub carrier: &'static str,
    /// Heure d'horloge qui doit être couverte.
    pub hour: u8,
    /// Jours concernés (0 = dimanche).
    pub weekdays: &'static [u32],
}

impl DeliveryCutoff {
    pub fn applies_on(&self, weekday_from_sunday: u32) -> bool {
        self.weekdays.contains(&weekday_from_sunday)
    }
}

const EVERY_DAY: &[u32] = &[0, 1, 2, 3, 4, 5, 6];

pub const DELIVERY_CUTOFFS: [DeliveryCutoff; 4] = [
    DeliveryCutoff {
        label: "11:59",
        carrier: "Shopee Express / GHN",
        hour: 11,
        weekdays: EVERY_DAY,
    },
    DeliveryCutoff {
        label: "18:00",
        carrier: "Shopee Express / GHN",
        hour: 18,
        weekdays: EVERY_DAY,
    },
    DeliveryCutoff {
        label: "15:00",
        carrier: "VNP",
        hour: 15,
        weekdays: &[2, 3, 4, 5, 6],
    },
    DeliveryCutoff {
        label: "09:00",
        carrier: "VNP",
        hour: 9,
        weekdays: &[0, 1],
    },
];

/// Couverture d'une journée, fonction pure de sa liste de créneaux.
///
/// Chaque créneau couvre ses deux plages (avant et après la pause) ; la plage
/// d'après-pause s'arrête à l'heure de fin effective, arrondie à l'heure
/// supérieure, pour refléter écrêtages et prolongations.
pub fn calculate_day_coverage(shifts: &[ShiftAssignment]) -> CoverageSummary {
    let mut covered = BTreeSet::new();

    for shift in shifts {
        let Some([pre, post]) = shift.kind.template().coverage else {
            continue;
        };
        let end = ceil_hour(shift.end);
        covered.extend(pre.hours().take_while(|h| *h < end));
        covered.extend(post.start..end);
    }

    let critical = DELIVERY_CUTOFFS
        .iter()
        .map(|c| (c.label.to_string(), covered.contains(&c.hour)))
        .collect();

    let in_window = covered
        .range(REFERENCE_OPEN..REFERENCE_CLOSE)
        .count();
    let percentage =
        in_window as f64 / f64::from(REFERENCE_CLOSE - REFERENCE_OPEN) * 100.0;

    CoverageSummary {
        hours: covered.into_iter().collect(),
        critical,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{clock, ShiftKind};
    use crate::model::EmployeeId;

    fn shift(kind: ShiftKind, end: u32) -> ShiftAssignment {
        let t = kind.template();
        ShiftAssignment {
            employee: EmployeeId::new("x"),
            kind,
            start: t.start,
            end: clock(end),
            break_window: t.break_window,
            hours: t.actual_hours,
            is_overtime: false,
            is_holiday: false,
            description: t.description.to_string(),
        }
    }

    #[test]
    fn three_standard_shifts_cover_the_whole_window() {
        let c = calculate_day_coverage(&[
            shift(ShiftKind::Morning, 17),
            shift(ShiftKind::Midday, 19),
            shift(ShiftKind::Afternoon, 20),
        ]);
        assert_eq!(c.percentage, 100.0);
        assert!(c.critical.values().all(|v| *v));
    }

    #[test]
    fn morning_alone_misses_the_evening() {
        let c = calculate_day_coverage(&[shift(ShiftKind::Morning, 17)]);
        insta::assert_snapshot!(format!("{:?}", c.hours), @"[8, 9, 10, 11, 13, 14, 15, 16]");
        assert!(!c.critical["18:00"]);
        assert!(c.critical["11:59"]);
        assert!((c.percentage - 8.0 / 12.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn super_peak_hours_do_not_exceed_100_percent() {
        let c = calculate_day_coverage(&[
            shift(ShiftKind::SuperPeakMorning, 19),
            shift(ShiftKind::SuperPeakMidday, 21),
            shift(ShiftKind::SuperPeakAfternoon, 22),
        ]);
        assert_eq!(c.hours.last(), Some(&21));
        assert_eq!(c.percentage, 100.0);
    }

    #[test]
    fn empty_day_has_no_coverage() {
        let c = calculate_day_coverage(&[]);
        assert!(c.hours.is_empty());
        assert_eq!(c.percentage, 0.0);
    }
}
