use std::fmt::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod db;
mod diagnostics;
mod error;
mod format;
mod goals;
mod models;
mod ordering;
mod period;
mod reevaluations;
mod report;
mod reviewers;
mod rigs;
mod schema;
mod services;
mod status;
mod table;
mod timeline;

use config::Palette;
use diagnostics::{Built, RecordDiagnostic};
use models::{Goal, ReevaluationEntry, ReviewerSummary, Rig, Service};
use period::ReportingYear;
use services::ScheduleOverview;
use status::Classification;
use table::DataTable;

#[derive(Parser)]
#[command(name = "cronobi-insights")]
#[command(
    about = "Rig schedule, re-evaluation and goal reports over a tabular data view",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file overriding the status and marker colors
    #[arg(long, env = "CRONOBI_PALETTE", global = true)]
    palette: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["csv", "query"])
        .required(true)
        .multiple(false)
))]
struct SourceArgs {
    /// Read the data view from a CSV export
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Read the data view from a Postgres query
    #[arg(long)]
    query: Option<String>,

    #[arg(long, default_value_t = ',')]
    delimiter: char,

    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rigs of the data view
    Rigs {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Classify the interventions scheduled for a reporting year
    Schedule {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Reporting year; defaults to the "Ano" column of the first row
        #[arg(long)]
        year: Option<i32>,
    },
    /// List re-evaluations with inventory values
    Reevaluations {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List goals merged by title
    Goals {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Summarize goals per assignee
    Reviewers {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
        /// Only summarize this assignee
        #[arg(long)]
        name: Option<String>,
    },
    /// Project phases and milestones
    Timeline {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Serialize)]
struct ScheduledService<'a> {
    #[serde(flatten)]
    service: &'a Service,
    bar_start: chrono::NaiveDate,
    bar_end: chrono::NaiveDate,
    classification: Classification,
}

#[derive(Serialize)]
struct ScheduleView<'a> {
    year: Option<ReportingYear>,
    overview: ScheduleOverview,
    rigs: &'a [Rig],
    services: Vec<ScheduledService<'a>>,
    diagnostics: Vec<RecordDiagnostic>,
}

#[derive(Serialize)]
struct ReviewersView<'a> {
    reviewers: &'a [ReviewerSummary],
    diagnostics: &'a [RecordDiagnostic],
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn load_table(source: &SourceArgs) -> anyhow::Result<DataTable> {
    if !source.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character");
    }
    let delimiter = source.delimiter as u8;

    if let Some(path) = &source.csv {
        return DataTable::from_csv_path(path, delimiter)
            .with_context(|| format!("failed to load {}", path.display()));
    }

    let query = source
        .query
        .as_deref()
        .context("either --csv or --query is required")?;
    let database_url = source
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set to run --query")?;
    let pool = db::connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    db::fetch_table(&pool, query)
        .await
        .context("failed to load the query result")
}

fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
    markdown: impl FnOnce() -> String,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Text => text(),
        OutputFormat::Markdown => markdown(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value)?;
            json.push('\n');
            json
        }
    })
}

fn emit(out: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "output written");
            println!("Output written to {}.", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn write_diagnostics_line(text: &mut String, diagnostics: &[RecordDiagnostic]) {
    if !diagnostics.is_empty() {
        let _ = writeln!(text, "{} rows had unreadable fields.", diagnostics.len());
    }
}

fn rigs_text(built: &Built<Rig>) -> String {
    let mut text = String::new();
    if built.records.is_empty() {
        let _ = writeln!(text, "No rigs found.");
    }
    for rig in &built.records {
        let _ = writeln!(
            text,
            "- {} {} (capacity {} of {}, {})",
            rig.code,
            rig.name.as_deref().unwrap_or("-"),
            rig.current_capacity.as_deref().unwrap_or("-"),
            rig.total_capacity.as_deref().unwrap_or("-"),
            rig.positioning.as_deref().unwrap_or("-")
        );
    }
    write_diagnostics_line(&mut text, &built.diagnostics);
    text
}

/// Year for the schedule: `--year`, else the first row's year column. An
/// empty data view has no first row and yields `None`.
fn resolve_year(table: &DataTable, year: Option<i32>) -> anyhow::Result<Option<ReportingYear>> {
    if let Some(year) = year {
        return Ok(Some(ReportingYear::new(year)));
    }
    if table.is_empty() {
        return Ok(None);
    }
    ReportingYear::from_first_row(table)
        .map(Some)
        .with_context(|| {
            format!(
                "no reporting year: pass --year or provide an integral \"{}\" column",
                schema::REPORTING_YEAR.name()
            )
        })
}

fn schedule_view<'a>(
    year: Option<ReportingYear>,
    rigs: &'a Built<Rig>,
    services: &'a Built<Service>,
    palette: &Palette,
) -> ScheduleView<'a> {
    let mut diagnostics = rigs.diagnostics.clone();
    diagnostics.extend(services.diagnostics.iter().cloned());

    ScheduleView {
        year,
        overview: services::schedule_overview(&rigs.records, &services.records),
        rigs: &rigs.records,
        services: services
            .records
            .iter()
            .map(|service| {
                let (bar_start, bar_end) = match year {
                    Some(year) => service.bar_within(year),
                    None => (service.start, service.end),
                };
                ScheduledService {
                    service,
                    bar_start,
                    bar_end,
                    classification: status::classify(service, palette),
                }
            })
            .collect(),
        diagnostics,
    }
}

fn schedule_text(view: &ScheduleView<'_>) -> String {
    let mut text = String::new();
    match view.year {
        Some(year) => {
            let _ = writeln!(
                text,
                "{}: {} rigs, {} interventions",
                year.value(),
                view.overview.rigs,
                view.overview.services
            );
        }
        None => {
            let _ = writeln!(text, "The data view has no rows.");
        }
    }
    for scheduled in &view.services {
        let service = scheduled.service;
        let _ = writeln!(
            text,
            "- {} {} {} to {}: {}; {}; {}",
            service.rig_code().unwrap_or("-"),
            service.well.as_deref().unwrap_or("-"),
            format::format_date(scheduled.bar_start),
            format::format_date(scheduled.bar_end),
            scheduled.classification.review.label(),
            scheduled.classification.motivation.label(),
            scheduled.classification.applied.label()
        );
    }
    write_diagnostics_line(&mut text, &view.diagnostics);
    text
}

fn reevaluations_text(built: &Built<ReevaluationEntry>) -> String {
    let mut text = String::new();
    if built.records.is_empty() {
        let _ = writeln!(text, "No re-evaluations found.");
    }
    for entry in &built.records {
        let _ = writeln!(
            text,
            "- {} {}: {}, inventory {}",
            entry.rig,
            entry.well.as_deref().unwrap_or("-"),
            entry.applied_marker().label(),
            format::format_optional_brl(entry.reevaluation.inventory_value)
        );
    }
    write_diagnostics_line(&mut text, &built.diagnostics);
    text
}

fn goals_text(built: &Built<Goal>) -> String {
    let mut text = String::new();
    if built.records.is_empty() {
        let _ = writeln!(text, "No goals found.");
    }
    for goal in &built.records {
        let _ = writeln!(
            text,
            "- {} score {} ({})",
            goal.title,
            format::format_score(goal.score),
            goal.assignees.join(", ")
        );
    }
    write_diagnostics_line(&mut text, &built.diagnostics);
    text
}

fn reviewers_text(reviewers: &[ReviewerSummary]) -> String {
    let mut text = String::new();
    if reviewers.is_empty() {
        let _ = writeln!(text, "No assigned goals found.");
    }
    for reviewer in reviewers {
        let _ = writeln!(
            text,
            "- {} score {} across {} goals ({} in progress, {} not started, {} completed)",
            reviewer.name,
            format::format_score(reviewer.average_score),
            reviewer.goals.len(),
            reviewer.counts.in_progress,
            reviewer.counts.not_started,
            reviewer.counts.completed
        );
    }
    text
}

fn timeline_text(timeline: &timeline::Timeline) -> String {
    let mut text = String::new();
    if timeline.phases.is_empty() {
        let _ = writeln!(text, "No phases with milestones found.");
    }
    for phase in &timeline.phases {
        let _ = writeln!(
            text,
            "- {} {}: {} to {}, {} milestones",
            phase.project,
            phase.phase.as_deref().unwrap_or("-"),
            format::format_date(phase.start),
            format::format_date(phase.end),
            phase.milestones.len()
        );
    }
    write_diagnostics_line(&mut text, &timeline.diagnostics);
    text
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let palette = match &cli.palette {
        Some(path) => Palette::load(path).context("failed to load the palette")?,
        None => Palette::default(),
    };

    match cli.command {
        Commands::Rigs { source, output } => {
            let table = load_table(&source).await?;
            let built = rigs::build_rigs(&table);
            let rendered = render(
                output.format,
                &built,
                || rigs_text(&built),
                || report::rigs_report(&built.records, &built.diagnostics),
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
        Commands::Schedule {
            source,
            output,
            year,
        } => {
            let table = load_table(&source).await?;
            let year = resolve_year(&table, year)?;
            let rigs = rigs::build_rigs(&table);
            let services = match year {
                Some(year) => services::build_services(&table, year),
                None => Built::default(),
            };

            let view = schedule_view(year, &rigs, &services, &palette);
            let rendered = render(
                output.format,
                &view,
                || schedule_text(&view),
                || {
                    report::schedule_report(
                        year,
                        &rigs.records,
                        &services.records,
                        &view.diagnostics,
                        &palette,
                    )
                },
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
        Commands::Reevaluations { source, output } => {
            let table = load_table(&source).await?;
            let built = reevaluations::build_reevaluations(&table);
            let rendered = render(
                output.format,
                &built,
                || reevaluations_text(&built),
                || report::reevaluation_report(&built.records, &built.diagnostics, &palette),
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
        Commands::Goals { source, output } => {
            let table = load_table(&source).await?;
            let built = goals::build_goals(&table);
            let rendered = render(
                output.format,
                &built,
                || goals_text(&built),
                || report::goals_report(&built.records, &built.diagnostics),
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
        Commands::Reviewers {
            source,
            output,
            name,
        } => {
            let table = load_table(&source).await?;
            let rows = goals::goal_rows(&table);
            let summaries = match &name {
                Some(name) => vec![reviewers::summarize_reviewer(&rows.records, name)],
                None => reviewers::build_reviewers(&rows.records),
            };
            let view = ReviewersView {
                reviewers: &summaries,
                diagnostics: &rows.diagnostics,
            };
            let rendered = render(
                output.format,
                &view,
                || reviewers_text(&summaries),
                || report::reviewers_report(&summaries, &rows.diagnostics),
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
        Commands::Timeline { source, output } => {
            let table = load_table(&source).await?;
            let timeline = timeline::build_timeline(&table);
            let rendered = render(
                output.format,
                &timeline,
                || timeline_text(&timeline),
                || report::timeline_report(&timeline),
            )?;
            emit(output.out.as_deref(), &rendered)?;
        }
    }

    Ok(())
}
