#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use entrepot::{
    analyze_staffing, io,
    model::{Roster, Schedule},
    load_config_from_file, EngineConfig, Scheduler, ValidationResult,
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification mensuelle d'entrepôt
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (valeurs par défaut sinon)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

/// Source du roster : liste en ligne ou fichier JSON
#[derive(Args, Debug)]
struct RosterArgs {
    /// liste "handle1,handle2,..."
    #[arg(long, conflicts_with = "roster")]
    employees: Option<String>,
    /// Fichier JSON de roster
    #[arg(long)]
    roster: Option<String>,
}

impl RosterArgs {
    fn load(&self) -> Result<Roster> {
        let roster = match (&self.employees, &self.roster) {
            (Some(list), _) => Roster::from_handles(list),
            (None, Some(path)) => io::load_roster_json(path)?,
            (None, None) => bail!("--employees ou --roster est requis"),
        };
        if roster.is_empty() {
            bail!("roster vide");
        }
        Ok(roster)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lister les jours de pic du mois
    Peaks {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },

    /// Générer le planning d'un mois
    Generate {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        roster: RosterArgs,
        /// Export JSON du planning (optionnel)
        #[arg(long)]
        out: Option<String>,
    },

    /// Valider un planning existant
    Validate {
        #[arg(long)]
        schedule: String,
        #[command(flatten)]
        roster: RosterArgs,
    },

    /// Statistiques d'heures par employé
    Stats {
        #[arg(long)]
        schedule: String,
        #[command(flatten)]
        roster: RosterArgs,
    },

    /// Analyse d'effectif pour un mois
    Staffing {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        roster: RosterArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => EngineConfig::default(),
    };
    let scheduler = Scheduler::new(config)?;

    let code = match cli.cmd {
        Commands::Peaks { month, year } => {
            let days: Vec<String> = scheduler
                .peak_days(month, year)
                .iter()
                .map(u32::to_string)
                .collect();
            println!("{}", days.join(","));
            0
        }
        Commands::Generate {
            month,
            year,
            roster,
            out,
        } => {
            let roster = roster.load()?;
            let schedule = scheduler.generate(month, year, &roster)?;
            if let Some(path) = out {
                io::export_schedule_json(path, &schedule)?;
            }
            print_schedule(&schedule, &roster);
            print_stats(&scheduler, &schedule, &roster);
            for notice in &schedule.notices {
                eprintln!("notice: {}", serde_json::to_string(notice)?);
            }
            report(&scheduler.validate(&schedule, &roster))
        }
        Commands::Validate { schedule, roster } => {
            let roster = roster.load()?;
            let schedule = io::load_schedule_json(schedule)?;
            report(&scheduler.validate(&schedule, &roster))
        }
        Commands::Stats { schedule, roster } => {
            let roster = roster.load()?;
            let schedule = io::load_schedule_json(schedule)?;
            print_stats(&scheduler, &schedule, &roster);
            0
        }
        Commands::Staffing {
            month,
            year,
            roster,
        } => {
            let roster = roster.load()?;
            let analysis = analyze_staffing(month, year, roster.len(), scheduler.config());
            println!("{}", serde_json::to_string_pretty(&analysis)?);
            0
        }
    };

    std::process::exit(code);
}

fn handle_of<'a>(roster: &'a Roster, id: &'a entrepot::EmployeeId) -> &'a str {
    roster
        .find_by_id(id)
        .map(|e| e.handle.as_str())
        .unwrap_or(id.as_str())
}

// impression compacte : un jour par ligne
fn print_schedule(schedule: &Schedule, roster: &Roster) {
    for ds in schedule.days.values() {
        let mut flags = String::new();
        if ds.is_super_peak {
            flags.push('S');
        } else if ds.is_peak {
            flags.push('P');
        }
        if ds.is_holiday {
            flags.push('H');
        }
        if ds.is_sunday {
            flags.push('D');
        }
        let shifts: Vec<String> = ds
            .shifts
            .iter()
            .map(|s| {
                format!(
                    "{} {}-{} ({}h)",
                    handle_of(roster, &s.employee),
                    s.start.format("%H:%M"),
                    s.end.format("%H:%M"),
                    s.hours
                )
            })
            .collect();
        println!(
            "{:>2} {:<3} {:>5.1}% | {}",
            ds.day,
            flags,
            ds.coverage.percentage,
            shifts.join(" | ")
        );
    }
}

fn print_stats(scheduler: &Scheduler, schedule: &Schedule, roster: &Roster) {
    let target = scheduler.config().target_hours;
    for (id, s) in scheduler.employee_stats(schedule, roster) {
        println!(
            "{} | total {:.1}h / {:.0}h | regular {:.1} | overtime {:.1} | holiday {:.1} | shifts {} | rest {:?}",
            handle_of(roster, &id),
            s.total_hours,
            target,
            s.regular_hours,
            s.overtime_hours,
            s.holiday_hours,
            s.shifts,
            s.rest_days
        );
    }
}

// Code 1 = INVALID, 2 = WARNING
fn report(result: &ValidationResult) -> i32 {
    for e in &result.errors {
        eprintln!("error: {e}");
    }
    for w in &result.warnings {
        eprintln!("warning: {w}");
    }
    if !result.is_valid {
        1
    } else if !result.warnings.is_empty() {
        2
    } else {
        println!("OK: schedule valid");
        0
    }
}
