use crate::catalog::{clock, clock_hours};
use chrono::{Duration, NaiveTime, Timelike};

/// Fermeture normale de l'entrepôt.
pub(super) const CLOSING_HOUR: u32 = 20;
/// Fermeture des jours super-pic.
pub(super) const SUPER_PEAK_CLOSING_HOUR: u32 = 22;
/// Limite des prolongations de l'équilibrage.
pub(super) const EXTENSION_CAP_HOUR: u32 = 21;

pub(super) fn closing_time(super_peak: bool) -> NaiveTime {
    clock(if super_peak { SUPER_PEAK_CLOSING_HOUR } else { CLOSING_HOUR })
}

/// Heures (fractionnaires) entre deux heures d'horloge, 0 si `to <= from`.
pub(super) fn hours_between(from: NaiveTime, to: NaiveTime) -> f64 {
    (clock_hours(to) - clock_hours(from)).max(0.0)
}

pub(super) fn add_hours(t: NaiveTime, hours: f64) -> NaiveTime {
    let minutes = (hours * 60.0).round() as i64;
    t.overflowing_add_signed(Duration::minutes(minutes)).0
}

/// Heure d'horloge arrondie au supérieur (17:30 -> 18).
pub(super) fn ceil_hour(t: NaiveTime) -> u8 {
    let extra = u32::from(t.minute() > 0 || t.second() > 0);
    (t.hour() + extra).min(24) as u8
}

/// Comparaison tolérante pour les soldes d'heures fractionnaires.
pub(super) fn approx_zero(x: f64) -> bool {
    x.abs() < 1e-9
}
