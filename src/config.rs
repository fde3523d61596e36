use crate::scheduler::SchedError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration immuable passée à chaque appel du moteur.
///
/// Tous les champs ont une valeur par défaut : un fichier JSON partiel ne
/// surcharge que ce qu'il nomme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Objectif d'heures mensuelles par employé.
    pub target_hours: f64,
    pub multipliers: Multipliers,
    pub peak_days: PeakDayRules,
    /// Autorise les créneaux de 10 h jusqu'à 22:00 les jours super-pic.
    pub super_peak_enabled: bool,
    pub holidays: HolidayTable,
    pub staffing: StaffingRules,
    /// Plafond d'heures supplémentaires (brutes) au-delà duquel on avertit.
    pub max_overtime_hours: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_hours: 208.0,
            multipliers: Multipliers::default(),
            peak_days: PeakDayRules::default(),
            super_peak_enabled: true,
            holidays: HolidayTable::default(),
            staffing: StaffingRules::default(),
            max_overtime_hours: 40.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), SchedError> {
        if self.target_hours.is_nan() || self.target_hours <= 0.0 {
            return Err(SchedError::InvalidTargetHours(self.target_hours));
        }
        for (name, value) in [
            ("overtime", self.multipliers.overtime),
            ("holiday", self.multipliers.holiday),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(SchedError::InvalidMultiplier { name, value });
            }
        }
        let StaffingRules {
            peak,
            sunday,
            weekday,
        } = self.staffing;
        if peak == 0 || sunday == 0 || weekday == 0 {
            return Err(SchedError::InvalidStaffing("required headcount must be > 0"));
        }
        if let Some(day) = self
            .peak_days
            .fixed
            .iter()
            .chain(&self.peak_days.custom)
            .find(|d| !(1..=31).contains(*d))
        {
            return Err(SchedError::InvalidPeakDay(*day));
        }
        for (month, days) in &self.holidays.0 {
            if !(1..=12).contains(month) {
                return Err(SchedError::InvalidMonth(*month));
            }
            if let Some(day) = days.iter().find(|d| !(1..=31).contains(*d)) {
                return Err(SchedError::InvalidDay {
                    month: *month,
                    day: *day,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Multipliers {
    pub overtime: f64,
    pub holiday: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            overtime: 1.5,
            holiday: 4.0,
        }
    }
}

/// Règles de jours de pic : jours fixes, "dates doubles" (8/8, 12/12) et
/// jours ajoutés par l'utilisateur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeakDayRules {
    pub fixed: Vec<u32>,
    pub double_dates: bool,
    pub custom: Vec<u32>,
}

impl Default for PeakDayRules {
    fn default() -> Self {
        Self {
            fixed: vec![15, 25],
            double_dates: true,
            custom: Vec::new(),
        }
    }
}

/// Effectif requis par type de jour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingRules {
    pub peak: usize,
    pub sunday: usize,
    pub weekday: usize,
}

impl Default for StaffingRules {
    fn default() -> Self {
        Self {
            peak: 3,
            sunday: 2,
            weekday: 3,
        }
    }
}

/// Jours fériés fixes par mois (1..=12). Les fêtes lunaires sont fournies de
/// l'extérieur via [`HolidayTable::with_extra`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable(pub BTreeMap<u32, Vec<u32>>);

impl Default for HolidayTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (1, vec![1]),
            (4, vec![30]),
            (5, vec![1]),
            (9, vec![2]),
        ]))
    }
}

impl HolidayTable {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_extra(mut self, month: u32, day: u32) -> Self {
        let days = self.0.entry(month).or_default();
        if !days.contains(&day) {
            days.push(day);
            days.sort_unstable();
        }
        self
    }

    pub fn contains(&self, month: u32, day: u32) -> bool {
        self.0.get(&month).is_some_and(|days| days.contains(&day))
    }
}

/// Charge et valide une configuration JSON.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<EngineConfig> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_slice(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn export_config_json<P: AsRef<Path>>(path: P, config: &EngineConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}
