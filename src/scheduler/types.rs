use crate::config::Multipliers;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {0} (expected 1..=12)")]
    InvalidMonth(u32),
    #[error("invalid year: {0} (expected >= 1)")]
    InvalidYear(i32),
    #[error("roster is empty")]
    EmptyRoster,
    #[error("duplicate employee id: {0}")]
    DuplicateEmployee(String),
    #[error("target hours must be > 0 (got {0})")]
    InvalidTargetHours(f64),
    #[error("{name} multiplier must be > 0 (got {value})")]
    InvalidMultiplier { name: &'static str, value: f64 },
    #[error("invalid staffing rules: {0}")]
    InvalidStaffing(&'static str),
    #[error("peak day out of range: {0}")]
    InvalidPeakDay(u32),
    #[error("day {day} out of range for month {month}")]
    InvalidDay { month: u32, day: u32 },
}

/// Heures d'une affectation réparties par seau, pondérées par multiplicateur.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct HourBuckets {
    pub regular: f64,
    pub overtime: f64,
    pub holiday: f64,
}

impl HourBuckets {
    /// Férié : tout en seau férié ; au-delà de 8 h : 8 h normales + reste en
    /// heures sup ; sinon tout en normal.
    pub fn of(hours: f64, is_holiday: bool, m: Multipliers) -> Self {
        if is_holiday {
            Self {
                holiday: hours * m.holiday,
                ..Self::default()
            }
        } else if hours > 8.0 {
            Self {
                regular: 8.0,
                overtime: (hours - 8.0) * m.overtime,
                holiday: 0.0,
            }
        } else {
            Self {
                regular: hours,
                ..Self::default()
            }
        }
    }

    pub fn minus(self, other: Self) -> Self {
        Self {
            regular: self.regular - other.regular,
            overtime: self.overtime - other.overtime,
            holiday: self.holiday - other.holiday,
        }
    }

    /// Heures réelles, multiplicateurs retirés.
    pub fn raw(self, m: Multipliers) -> f64 {
        self.regular + self.overtime / m.overtime + self.holiday / m.holiday
    }
}

/// Compteurs d'un employé pendant une génération.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunningStats {
    pub hours: HourBuckets,
    pub rest_days: Vec<u32>,
}

impl RunningStats {
    pub fn add(&mut self, delta: HourBuckets) {
        self.hours.regular += delta.regular;
        self.hours.overtime += delta.overtime;
        self.hours.holiday += delta.holiday;
    }

    pub fn total(&self, m: Multipliers) -> f64 {
        self.hours.raw(m)
    }

    pub fn is_resting(&self, day: u32) -> bool {
        self.rest_days.contains(&day)
    }

    pub fn cancel_rest_day(&mut self, day: u32) {
        self.rest_days.retain(|d| *d != day);
    }
}
