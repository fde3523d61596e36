use crate::model::{Employee, Roster, Schedule};
use anyhow::{bail, Context};
use std::fs;
use std::path::Path;

/// Roster JSON : tableau d'employés `[{ "handle": .., "display_name": .. }]`
/// ou objet `{ "employees": [...] }`. L'`id` est optionnel.
pub fn load_roster_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Roster> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading roster {}", path.display()))?;
    let roster = match serde_json::from_slice::<Vec<Employee>>(&data) {
        Ok(employees) => Roster::new(employees),
        Err(_) => serde_json::from_slice::<Roster>(&data)
            .with_context(|| format!("parsing roster {}", path.display()))?,
    };
    if roster
        .employees
        .iter()
        .any(|e| e.handle.trim().is_empty())
    {
        bail!("invalid roster entry (empty handle)");
    }
    Ok(roster)
}

/// Relit un planning généré précédemment (revalidation sans régénération).
pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading schedule {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing schedule {}", path.display()))
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}
