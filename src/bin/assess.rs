//! Scriptable JSON front end for Cardiowise.
//!
//! # Usage
//!
//! ```bash
//! assess analyze <file.json>
//! assess submit <file.json> [--patient <id>]
//! assess history [--patient <id>] [--limit <n>]
//! assess review <assessment-id> --doctor-id <id> --doctor-name <name> --notes <text>
//!        [--status reviewed|needs_followup] [--risk low|medium|high]
//!        [--recommendation <text>]... [--action <text>]... [--follow-up YYYY-MM-DD]
//! assess summary --patient <id>
//! assess delete <assessment-id>
//! assess clear --yes
//! assess overview
//! ```
//!
//! Results are printed to stdout as pretty JSON. Logs go to stderr.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiowise::adapters::random::RandomPredictor;
use cardiowise::adapters::sanitize::SanitizingMakeWriter;
use cardiowise::adapters::sqlite::SqliteStorage;
use cardiowise::application::{load_questionnaire, AssessmentService, DashboardService};
use cardiowise::{Config, DoctorReview, ReviewStatus, RiskLevel};

/// Patient id used by `submit` when none is given.
const DEFAULT_PATIENT: &str = "self";

#[derive(Debug, PartialEq)]
struct ReviewArgs {
    doctor_id: String,
    doctor_name: String,
    notes: String,
    status: ReviewStatus,
    risk: Option<RiskLevel>,
    recommendations: Vec<String>,
    actions: Vec<String>,
    follow_up: Option<NaiveDate>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Analyze {
        file: PathBuf,
    },
    Submit {
        file: PathBuf,
        patient: String,
    },
    History {
        patient: Option<String>,
        limit: Option<usize>,
    },
    Review {
        id: String,
        review: ReviewArgs,
    },
    Summary {
        patient: String,
    },
    Delete {
        id: String,
    },
    Clear,
    Overview,
}

fn usage() -> String {
    "Usage:\n  \
     assess analyze <file.json>\n  \
     assess submit <file.json> [--patient <id>]\n  \
     assess history [--patient <id>] [--limit <n>]\n  \
     assess review <assessment-id> --doctor-id <id> --doctor-name <name> --notes <text>\n         \
     [--status reviewed|needs_followup] [--risk low|medium|high]\n         \
     [--recommendation <text>]... [--action <text>]... [--follow-up YYYY-MM-DD]\n  \
     assess summary --patient <id>\n  \
     assess delete <assessment-id>\n  \
     assess clear --yes\n  \
     assess overview"
        .to_string()
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = args.next().ok_or_else(usage)?;

    let mut positional: Option<String> = None;
    let mut patient: Option<String> = None;
    let mut limit: Option<usize> = None;
    let mut doctor_id: Option<String> = None;
    let mut doctor_name: Option<String> = None;
    let mut notes: Option<String> = None;
    let mut status = ReviewStatus::Reviewed;
    let mut risk: Option<RiskLevel> = None;
    let mut recommendations = Vec::new();
    let mut actions = Vec::new();
    let mut follow_up: Option<NaiveDate> = None;
    let mut confirmed = false;

    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(usage);
        match arg.as_str() {
            "--patient" => patient = Some(value()?),
            "--limit" => {
                let v = value()?;
                let parsed = v
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| "--limit must be a positive integer".to_string())?;
                limit = Some(parsed);
            }
            "--doctor-id" => doctor_id = Some(value()?),
            "--doctor-name" => doctor_name = Some(value()?),
            "--notes" => notes = Some(value()?),
            "--status" => status = value()?.parse()?,
            "--risk" => {
                let v = value()?;
                risk = Some(
                    RiskLevel::from_label(&v)
                        .ok_or_else(|| format!("--risk must be low, medium or high, got {v:?}"))?,
                );
            }
            "--recommendation" => recommendations.push(value()?),
            "--action" => actions.push(value()?),
            "--follow-up" => {
                let v = value()?;
                let date = NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                    .map_err(|_| format!("--follow-up must be YYYY-MM-DD, got {v:?}"))?;
                follow_up = Some(date);
            }
            "--yes" => confirmed = true,
            "-h" | "--help" => return Err(usage()),
            flag if flag.starts_with("--") => return Err(format!("Unknown option {flag}\n{}", usage())),
            _ => {
                if positional.is_none() {
                    positional = Some(arg);
                } else {
                    return Err(usage());
                }
            }
        }
    }

    match command.as_str() {
        "analyze" => Ok(Command::Analyze {
            file: positional.map(PathBuf::from).ok_or_else(usage)?,
        }),
        "submit" => Ok(Command::Submit {
            file: positional.map(PathBuf::from).ok_or_else(usage)?,
            patient: patient.unwrap_or_else(|| DEFAULT_PATIENT.to_string()),
        }),
        "history" => Ok(Command::History { patient, limit }),
        "review" => Ok(Command::Review {
            id: positional.ok_or_else(usage)?,
            review: ReviewArgs {
                doctor_id: doctor_id.ok_or_else(usage)?,
                doctor_name: doctor_name.ok_or_else(usage)?,
                notes: notes.ok_or_else(usage)?,
                status,
                risk,
                recommendations,
                actions,
                follow_up,
            },
        }),
        "summary" => Ok(Command::Summary {
            patient: patient.ok_or_else(usage)?,
        }),
        "delete" => Ok(Command::Delete {
            id: positional.ok_or_else(usage)?,
        }),
        "clear" if confirmed => Ok(Command::Clear),
        "clear" => Err(format!("Refusing to clear without --yes\n{}", usage())),
        "overview" => Ok(Command::Overview),
        _ => Err(usage()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Command, config: &Config) -> Result<()> {
    let storage = Arc::new(
        SqliteStorage::new(&config.db_path)
            .with_context(|| format!("opening database {}", config.db_path.display()))?,
    );
    let predictor = Arc::new(match config.prediction_seed {
        Some(seed) => RandomPredictor::seeded(seed),
        None => RandomPredictor::new(),
    });
    let assessments = AssessmentService::new(predictor, Arc::clone(&storage));

    match command {
        Command::Analyze { file } => {
            let questionnaire = load_questionnaire(&file)
                .with_context(|| format!("reading questionnaire {}", file.display()))?;
            print_json(&assessments.preview(&questionnaire))
        }
        Command::Submit { file, patient } => {
            let questionnaire = load_questionnaire(&file)
                .with_context(|| format!("reading questionnaire {}", file.display()))?;
            let assessment = assessments.assess(&patient, questionnaire)?;
            print_json(&assessment)
        }
        Command::History { patient, limit } => {
            let limit = limit.unwrap_or(config.history_limit);
            let items = match patient {
                Some(p) => assessments.patient_history(&p, limit)?,
                None => assessments.recent(limit)?,
            };
            print_json(&items)
        }
        Command::Review { id, review: args } => {
            let risk = match args.risk {
                Some(level) => level,
                None => assessments.get(&id)?.health_score.tier(),
            };
            let mut review = DoctorReview::new(args.doctor_id, args.doctor_name, args.notes, risk);
            review.status = args.status;
            review.recommendations = args.recommendations;
            review.action_items = args.actions;
            review.follow_up_date = args.follow_up;

            let updated = assessments.submit_review(&id, review)?;
            print_json(&updated)
        }
        Command::Summary { patient } => print_json(&assessments.patient_summary(&patient)?),
        Command::Delete { id } => {
            assessments.delete(&id)?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::Clear => {
            let removed = assessments.clear_all()?;
            print_json(&serde_json::json!({ "removed": removed }))
        }
        Command::Overview => {
            let dashboard = DashboardService::new(storage);
            let today = Utc::now().date_naive();
            print_json(&serde_json::json!({
                "doctor": dashboard.doctor_overview(today)?,
                "admin": dashboard.admin_overview()?,
            }))
        }
    }
}

fn main() -> ExitCode {
    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    let config = Config::from_env();
    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
