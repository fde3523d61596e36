//! Catalogue des créneaux types de l'entrepôt.
//!
//! Table figée au premier accès : créneaux standard (8 h de travail sur une
//! amplitude de 9 h), variantes "pic" (9 h) et variantes "super-pic" (10 h,
//! jusqu'à 22:00).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Nom d'un créneau type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    Morning,
    Midday,
    Afternoon,
    PeakMorning,
    PeakMidday,
    PeakAfternoon,
    SuperPeakMorning,
    SuperPeakMidday,
    SuperPeakAfternoon,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 9] = [
        ShiftKind::Morning,
        ShiftKind::Midday,
        ShiftKind::Afternoon,
        ShiftKind::PeakMorning,
        ShiftKind::PeakMidday,
        ShiftKind::PeakAfternoon,
        ShiftKind::SuperPeakMorning,
        ShiftKind::SuperPeakMidday,
        ShiftKind::SuperPeakAfternoon,
    ];

    /// Créneau type correspondant dans le catalogue.
    pub fn template(self) -> &'static ShiftTemplate {
        &catalog()[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Midday => "midday",
            ShiftKind::Afternoon => "afternoon",
            ShiftKind::PeakMorning => "peak_morning",
            ShiftKind::PeakMidday => "peak_midday",
            ShiftKind::PeakAfternoon => "peak_afternoon",
            ShiftKind::SuperPeakMorning => "super_peak_morning",
            ShiftKind::SuperPeakMidday => "super_peak_midday",
            ShiftKind::SuperPeakAfternoon => "super_peak_afternoon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftVariant {
    Standard,
    Peak,
    SuperPeak,
}

/// Pause non travaillée à l'intérieur d'un créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Plage horaire semi-ouverte `[start, end)` en heures d'horloge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl HourRange {
    pub fn hours(self) -> impl Iterator<Item = u8> {
        self.start..self.end
    }
}

/// Créneau type immuable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftTemplate {
    pub kind: ShiftKind,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_window: Option<BreakWindow>,
    pub actual_hours: f64,
    /// Aucune plage, ou exactement (avant pause, après pause).
    pub coverage: Option<[HourRange; 2]>,
    pub variant: ShiftVariant,
    pub description: &'static str,
}

impl ShiftTemplate {
    fn build(kind: ShiftKind) -> Self {
        use ShiftKind::*;
        let (start, end, pause, hours, variant, description) = match kind {
            Morning => (8, 17, 12, 8.0, ShiftVariant::Standard, "Ca sáng"),
            Afternoon => (12, 21, 16, 8.0, ShiftVariant::Standard, "Ca chiều"),
            Midday => (10, 19, 14, 8.0, ShiftVariant::Standard, "Ca trưa"),
            PeakMorning => (8, 18, 12, 9.0, ShiftVariant::Peak, "Ca sáng mở rộng"),
            PeakAfternoon => (11, 21, 15, 9.0, ShiftVariant::Peak, "Ca chiều mở rộng"),
            PeakMidday => (9, 19, 13, 9.0, ShiftVariant::Peak, "Ca trưa mở rộng"),
            SuperPeakMorning => (
                8,
                19,
                12,
                10.0,
                ShiftVariant::SuperPeak,
                "Ca sáng siêu cao điểm",
            ),
            SuperPeakMidday => (
                10,
                21,
                14,
                10.0,
                ShiftVariant::SuperPeak,
                "Ca trưa siêu cao điểm",
            ),
            SuperPeakAfternoon => (
                11,
                22,
                15,
                10.0,
                ShiftVariant::SuperPeak,
                "Ca chiều siêu cao điểm",
            ),
        };
        Self {
            kind,
            start: clock(start),
            end: clock(end),
            break_window: Some(BreakWindow {
                start: clock(pause),
                end: clock(pause + 1),
            }),
            actual_hours: hours,
            coverage: Some([
                HourRange {
                    start: start as u8,
                    end: pause as u8,
                },
                HourRange {
                    start: pause as u8 + 1,
                    end: end as u8,
                },
            ]),
            variant,
            description,
        }
    }

    /// Amplitude en heures, pause incluse.
    pub fn span_hours(&self) -> f64 {
        clock_hours(self.end) - clock_hours(self.start)
    }
}

/// Table complète, indexée par `ShiftKind as usize`.
pub fn catalog() -> &'static [ShiftTemplate; 9] {
    static CATALOG: OnceLock<[ShiftTemplate; 9]> = OnceLock::new();
    CATALOG.get_or_init(|| ShiftKind::ALL.map(ShiftTemplate::build))
}

/// Heure pleine `h:00`. Les heures hors 0..=23 retombent sur minuit.
pub fn clock(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Heure d'horloge en fraction d'heures depuis minuit.
pub fn clock_hours(t: NaiveTime) -> f64 {
    f64::from(t.num_seconds_from_midnight()) / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in ShiftKind::ALL {
            assert_eq!(kind.template().kind, kind);
        }
    }

    #[test]
    fn actual_hours_match_span_minus_break() {
        for t in catalog() {
            let pause = t
                .break_window
                .map(|b| clock_hours(b.end) - clock_hours(b.start))
                .unwrap_or(0.0);
            assert_eq!(t.span_hours() - pause, t.actual_hours, "{}", t.kind.as_str());
        }
    }

    #[test]
    fn super_peak_afternoon_reaches_22() {
        let t = ShiftKind::SuperPeakAfternoon.template();
        assert_eq!(t.end, clock(22));
        assert_eq!(t.actual_hours, 10.0);
        insta::assert_snapshot!(
            format!("{:?}", t.coverage),
            @"Some([HourRange { start: 11, end: 15 }, HourRange { start: 16, end: 22 }])"
        );
    }
}
