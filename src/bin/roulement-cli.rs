#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use roulement::{
    ical::{self, EncodeOptions},
    io::{self, CalendarSink, FileSink},
    plan::{self, ShiftPlan},
    render::{self, ShiftBoundary},
    scheduler,
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de génération de roulements (jours travaillés / repos)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Paramètres du roulement, depuis un fichier plan et/ou la ligne de commande
#[derive(Args, Debug)]
struct PlanArgs {
    /// Fichier plan JSON ; les autres options le surchargent
    #[arg(long)]
    plan: Option<PathBuf>,
    /// Date de début (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Dernière année générée (défaut : année de début)
    #[arg(long)]
    end_year: Option<i32>,
    /// Titre des événements
    #[arg(long)]
    title: Option<String>,
    /// Cycle "on/off,on/off,..." ex. "4/3,2/2"
    #[arg(long, conflicts_with = "pattern_csv")]
    pattern: Option<String>,
    /// Cycle depuis un CSV `on,off`
    #[arg(long)]
    pattern_csv: Option<PathBuf>,
    /// Entrée du cycle utilisée en premier (base 0)
    #[arg(long)]
    index: Option<usize>,
}

impl PlanArgs {
    fn resolve(self) -> Result<ShiftPlan> {
        let base = match &self.plan {
            Some(path) => Some(plan::load_plan_from_file(path)?),
            None => None,
        };

        let pattern = if let Some(raw) = &self.pattern {
            Some(io::parse_pattern_spec(raw)?.into())
        } else if let Some(path) = &self.pattern_csv {
            Some(io::import_pattern_csv(path)?.into())
        } else {
            None
        };

        let resolved = match base {
            Some(mut p) => {
                if let Some(start) = self.start {
                    p.start_date = start;
                }
                if self.end_year.is_some() {
                    p.end_year = self.end_year;
                }
                if let Some(title) = self.title {
                    p.title = title;
                }
                if let Some(pattern) = pattern {
                    p.pattern = pattern;
                }
                if self.index.is_some() {
                    p.start_index = self.index;
                }
                p
            }
            None => {
                let Some(start_date) = self.start else {
                    bail!("--start is required without --plan");
                };
                let Some(pattern) = pattern else {
                    bail!("--pattern or --pattern-csv is required without --plan");
                };
                ShiftPlan {
                    start_date,
                    end_year: self.end_year,
                    title: self.title.unwrap_or_else(|| plan::DEFAULT_TITLE.to_string()),
                    pattern,
                    start_index: self.index,
                }
            }
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Générer le planning et l'exporter en .ics
    Generate {
        #[command(flatten)]
        input: PlanArgs,
        /// Fichier iCalendar de sortie, ou répertoire (nom par défaut)
        #[arg(long, default_value = ical::DEFAULT_FILE_NAME)]
        out: PathBuf,
        /// Échappe le texte selon RFC 5545
        #[arg(long)]
        escape: bool,
        /// Fins de ligne CRLF, lignes pliées à 75 octets
        #[arg(long)]
        crlf: bool,
        #[arg(long)]
        out_json: Option<PathBuf>,
        #[arg(long)]
        out_csv: Option<PathBuf>,
    },

    /// Afficher la grille mensuelle
    Preview {
        #[command(flatten)]
        input: PlanArgs,
        #[arg(long, default_value_t = render::DEFAULT_MONTHS)]
        months: u32,
        /// Marque aussi le jour `end` de chaque période
        #[arg(long)]
        inclusive_end: bool,
    },

    /// Écrire un fichier plan JSON
    InitPlan {
        #[command(flatten)]
        input: PlanArgs,
        #[arg(long, default_value = "plan.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    match cli.cmd {
        Commands::Generate {
            input,
            out,
            escape,
            crlf,
            out_json,
            out_csv,
        } => {
            let shift_plan = input.resolve()?;
            let request = shift_plan.to_request()?;
            let intervals = scheduler::generate_request(&request)?;

            if let Some(path) = out_json {
                io::export_intervals_json(path, &intervals)?;
            }
            if let Some(path) = out_csv {
                io::export_intervals_csv(path, &intervals)?;
            }

            let opts = EncodeOptions {
                escape_text: escape,
                crlf,
            };
            let file = ical::to_calendar_file(&intervals, &shift_plan.title, opts);
            let written = FileSink::for_output(&out).deliver(&file)?;

            for i in &intervals {
                println!("{} → {} | {}", i.start, i.end, i.sequence);
            }
            println!(
                "{} interval(s) written to {} ({})",
                intervals.len(),
                written.display(),
                file.mime_type
            );
        }
        Commands::Preview {
            input,
            months,
            inclusive_end,
        } => {
            let request = input.resolve()?.to_request()?;
            let intervals = scheduler::generate_request(&request)?;
            if intervals.is_empty() {
                println!("No events to display.");
                return Ok(());
            }
            let boundary = if inclusive_end {
                ShiftBoundary::Inclusive
            } else {
                ShiftBoundary::Exclusive
            };
            let grids = render::month_grids(&intervals, months, boundary);
            let text: Vec<String> = grids.iter().map(|g| g.to_text()).collect();
            println!("{}", text.join("\n\n"));
        }
        Commands::InitPlan { input, out } => {
            let shift_plan = input.resolve()?;
            plan::export_plan_json(&out, &shift_plan)?;
            println!("Plan written to {}", out.display());
        }
    }

    Ok(())
}
