use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};

use roadmap::error::{ErrorCode, ErrorReport};
use roadmap::gantt::{self, LayoutError, render::DEFAULT_CHART_WIDTH};
use roadmap::llm::{LlmChat, LlmClient, LlmError};
use roadmap::mindmap::{self, MindmapLayout, layout::DEFAULT_NODE_SPACING};
use roadmap::project::{self, ProjectData};
use roadmap::requirements;
use roadmap::style::{DEFAULT_ROW_HEIGHT, DisplayOptions, StylePreset};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "E_READ_INPUT",
            Self::Json(_) => "E_INVALID_JSON",
            Self::Layout(e) => e.error_code(),
            Self::InvalidDate(_) => "E_INVALID_DATE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "roadmap", about = "Gantt timelines, mind maps and requirements drafts from plain text")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse Gantt text and print the timeline layout.
    Gantt(GanttArgs),
    /// Parse a markdown outline and print the mind-map tree and placed graph.
    Mindmap(MindmapArgs),
    /// Generate mind-map markdown and Gantt text from a project JSON file.
    Project(ProjectArgs),
    /// Draft a requirements document from a project JSON file.
    Requirements(RequirementsArgs),
}

#[derive(Args, Debug)]
struct InputArg {
    /// Input file, `-` for stdin.
    #[arg(long, short, default_value = "-")]
    input: String,
}

#[derive(Args, Debug)]
struct GanttArgs {
    #[command(flatten)]
    input: InputArg,
    #[arg(long)]
    no_markers: bool,
    #[arg(long)]
    hide_weekends: bool,
    /// Print positioned drawing objects instead of the layout.
    #[arg(long)]
    render: bool,
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH)]
    width: f64,
    #[arg(long, default_value = "classic")]
    style: StylePreset,
    #[arg(long, default_value_t = DEFAULT_ROW_HEIGHT)]
    row_height: u32,
    #[arg(long)]
    compact: bool,
}

#[derive(Args, Debug)]
struct MindmapArgs {
    #[command(flatten)]
    input: InputArg,
    #[arg(long, default_value = "horizontal")]
    layout: MindmapLayout,
    #[arg(long, default_value_t = DEFAULT_NODE_SPACING)]
    spacing: f64,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    input: InputArg,
    /// Date used for the placeholder roadmap, defaults to today (UTC).
    #[arg(long)]
    today: Option<String>,
}

#[derive(Args, Debug)]
struct RequirementsArgs {
    #[command(flatten)]
    input: InputArg,
    /// Print Markdown instead of JSON.
    #[arg(long)]
    markdown: bool,
}

#[derive(Serialize)]
struct MindmapOutput {
    tree: mindmap::MindmapNode,
    graph: mindmap::MindmapGraph,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Gantt(args) => run_gantt(&args),
        Command::Mindmap(args) => run_mindmap(&args),
        Command::Project(args) => run_project(&args),
        Command::Requirements(args) => run_requirements(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let report = ErrorReport::from_error(&e);
            match serde_json::to_string(&report) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}: {}", report.code, report.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn run_gantt(args: &GanttArgs) -> Result<(), CliError> {
    let text = read_input(&args.input)?;
    let tasks = gantt::parse(&text);
    debug!(tasks = tasks.len(), "gantt: parsed input");

    let options = DisplayOptions {
        style: args.style,
        show_date_markers: !args.no_markers,
        compact_view: args.compact,
        show_weekends: !args.hide_weekends,
        ..DisplayOptions::default()
    }
    .with_row_height(args.row_height);

    let laid_out = gantt::layout(&tasks, options.layout_options())?;
    if args.render {
        print_json(&gantt::render_to_objects(&laid_out, &options, args.width))
    } else {
        print_json(&laid_out)
    }
}

fn run_mindmap(args: &MindmapArgs) -> Result<(), CliError> {
    let text = read_input(&args.input)?;
    let tree = mindmap::parse(&text);
    let graph = mindmap::layout(&tree, args.layout, args.spacing);
    print_json(&MindmapOutput { tree, graph })
}

fn run_project(args: &ProjectArgs) -> Result<(), CliError> {
    let data = read_project(&args.input)?;
    let today = match &args.today {
        Some(raw) => parse_day(raw)?,
        None => Utc::now().date_naive(),
    };
    print_json(&project::generate(&data, today))
}

async fn run_requirements(args: &RequirementsArgs) -> Result<(), CliError> {
    let data = read_project(&args.input)?;
    let client = llm_client();
    let chat = client.as_ref().map(|c| c as &dyn LlmChat);
    let doc = requirements::draft(chat, &data).await;

    if args.markdown {
        print!("{}", doc.to_markdown());
        Ok(())
    } else {
        print_json(&doc)
    }
}

/// The configured LLM client, or `None` when no provider is set up.
fn llm_client() -> Option<LlmClient> {
    match LlmClient::from_env() {
        Ok(client) => {
            debug!(model = client.model(), "requirements: llm client configured");
            Some(client)
        }
        Err(LlmError::MissingApiKey { var }) => {
            debug!(%var, "requirements: no llm api key");
            None
        }
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "requirements: llm config invalid");
            None
        }
    }
}

fn read_input(arg: &InputArg) -> Result<String, CliError> {
    if arg.input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read { path: "<stdin>".into(), source })?;
        return Ok(text);
    }
    let path = PathBuf::from(&arg.input);
    std::fs::read_to_string(&path).map_err(|source| CliError::Read { path: path.display().to_string(), source })
}

fn read_project(arg: &InputArg) -> Result<ProjectData, CliError> {
    Ok(serde_json::from_str(&read_input(arg)?)?)
}

fn parse_day(raw: &str) -> Result<NaiveDate, CliError> {
    gantt::parse::parse_date(raw).ok_or_else(|| CliError::InvalidDate(raw.to_string()))
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
