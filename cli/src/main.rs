//! CLI entrypoint for cohort
//!
//! This is the main binary that wires together all layers using
//! dependency injection: config and roster from the infrastructure loader,
//! the in-memory store behind the gateway port, and the admission use case
//! driving all questionnaires concurrently.

use anyhow::{Context, Result, bail};
use clap::Parser;
use cohort_application::{AdmitPatientUseCase, ClinicianScheduleUseCase, SummarizeGroupUseCase};
use cohort_domain::QuestionnaireReport;
use cohort_infrastructure::{ConfigLoader, InMemoryGroupStore, JsonlAdmissionLogger};
use cohort_presentation::{Cli, ConsoleFormatter, OutputFormat};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration and reference data
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };
    let roster = Arc::new(config.roster.to_roster()?);
    let params = config.admission.to_params();

    // Read questionnaire reports
    let reports_path = match &cli.reports {
        Some(path) => path,
        None => bail!("Path to a questionnaire reports JSON file is required."),
    };
    let raw = std::fs::read_to_string(reports_path)
        .with_context(|| format!("reading {}", reports_path.display()))?;
    let reports: Vec<QuestionnaireReport> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", reports_path.display()))?;

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|           Cohort - Group Consultation Admission            |");
        println!("+============================================================+");
        println!();
        println!("Reports: {} from {}", reports.len(), reports_path.display());
        println!("Roster:  {} clinician(s)", roster.len());
        println!();
    }

    // === Dependency Injection ===
    let store = Arc::new(InMemoryGroupStore::new());
    let mut admit = AdmitPatientUseCase::new(Arc::clone(&store), Arc::clone(&roster), params);
    if let Some(path) = &config.log.admission_log
        && let Some(logger) = JsonlAdmissionLogger::new(path)
    {
        info!("Admission audit log: {}", logger.path().display());
        admit = admit.with_admission_log(Arc::new(logger));
    }
    let admit = Arc::new(admit);

    // Admit all reports concurrently; the engine is stateless per call and
    // the store's conditional insert keeps groups within capacity.
    info!("Admitting {} questionnaire(s)", reports.len());
    let now = chrono::Utc::now();
    let mut join_set = JoinSet::new();
    for report in reports {
        let admit = Arc::clone(&admit);
        join_set.spawn(async move {
            let patient = report.patient_id.clone();
            let result = admit.execute(report, now).await;
            (patient, result)
        });
    }

    let mut admissions = Vec::new();
    let mut failures = 0;
    while let Some(joined) = join_set.join_next().await {
        let (patient, result) = joined?;
        match result {
            Ok(admission) => admissions.push(admission),
            Err(error) => {
                failures += 1;
                eprintln!("Admission failed for {}: {}", patient, error);
            }
        }
    }
    admissions.sort_by(|a, b| a.member.patient_id.cmp(&b.member.patient_id));

    match cli.output {
        OutputFormat::Json => {
            println!("{}", ConsoleFormatter::format_admissions_json(&admissions));
        }
        OutputFormat::Full => {
            for admission in &admissions {
                println!("{}", ConsoleFormatter::format_admission(admission));
            }
        }
    }

    if cli.summary {
        let summarizer = SummarizeGroupUseCase::new(Arc::clone(&store));
        for group in store.all_groups() {
            let report = summarizer.execute(&group.id).await?;
            match cli.output {
                OutputFormat::Json => {
                    println!("{}", ConsoleFormatter::format_group_report_json(&report));
                }
                OutputFormat::Full => {
                    println!("{}", ConsoleFormatter::format_group_report(&report));
                }
            }
        }
    }

    if cli.schedule {
        let scheduler = ClinicianScheduleUseCase::new(Arc::clone(&store));
        for clinician in roster.iter() {
            let schedule = scheduler.execute(&clinician.id).await?;
            if schedule.is_empty() {
                continue;
            }
            match cli.output {
                OutputFormat::Json => {
                    println!("{}", ConsoleFormatter::format_schedule_json(&schedule));
                }
                OutputFormat::Full => {
                    println!("{}", ConsoleFormatter::format_schedule(&clinician.name, &schedule));
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} admission(s) failed");
    }

    Ok(())
}
