use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use fleetplan::{
    config::{DEFAULT_BASE_URL, DEFAULT_SHEET_ID, DEFAULT_TIMEOUT_SECS},
    fetch::fetch_sheet,
    html::render_page,
    load_dashboard, Page, SourceConfig, Vocabulary,
};
use reqwest::Client;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Render the maintenance planning sheets as a tabbed HTML dashboard.
#[derive(Parser, Debug)]
#[command(name = "fleetplan", version)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Spreadsheet id
    #[arg(long, env = "FLEETPLAN_SHEET_ID", default_value = DEFAULT_SHEET_ID, global = true)]
    sheet_id: String,

    /// Base URL the spreadsheet id is appended to
    #[arg(long, env = "FLEETPLAN_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "FLEETPLAN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    /// Header vocabulary: `en`, `pt-br`, or a YAML file
    #[arg(long, env = "FLEETPLAN_VOCABULARY", default_value = "en", global = true)]
    vocabulary: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all sheets and write the dashboard
    Render {
        #[command(flatten)]
        view: ViewArgs,
    },
    /// Fetch one sheet and print it as JSON
    Dump {
        /// Sheet name, e.g. "Preventive Planning"
        sheet: String,
    },
    /// Re-open a rendered dashboard and apply tab/filter
    View {
        input: PathBuf,
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Output file (stdout when omitted)
    #[arg(long, short)]
    out: Option<PathBuf>,

    /// Tab panel to show, e.g. calibragemTab
    #[arg(long)]
    tab: Option<String>,

    /// Carrier/plate substring to filter rows by
    #[arg(long)]
    filter: Option<String>,
}

fn apply_view(page: &mut Page, args: &ViewArgs, vocab: &Vocabulary) {
    if let Some(tab) = &args.tab {
        page.show_tab(tab);
    }
    if let Some(filter) = &args.filter {
        let shown = page.filter_by_carrier(filter, vocab);
        info!(filter = %filter, shown, total = page.total_rows(), "rows filtered");
    }
}

fn write_output(out: Option<&PathBuf>, html: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = html.len(), "dashboard written");
        }
        None => print!("{}", html),
    }
    Ok(())
}

impl SourceArgs {
    fn settings(&self) -> Result<(Vocabulary, SourceConfig)> {
        let vocab = Vocabulary::resolve(&self.vocabulary)?;
        let source = SourceConfig::new(
            &self.base_url,
            self.sheet_id.clone(),
            Duration::from_secs(self.timeout_secs),
        )?;
        Ok((vocab, source))
    }
}

/// Runs one subcommand against an already configured client.
async fn execute(
    command: Command,
    client: &Client,
    source: &SourceConfig,
    vocab: &Vocabulary,
) -> Result<()> {
    match command {
        Command::Render { view } => {
            let today = Local::now().date_naive();
            info!(%today, sheet_id = %source.sheet_id, "loading dashboard");

            let mut load = load_dashboard(client, source, vocab, today).await;
            apply_view(&mut load.page, &view, vocab);
            write_output(view.out.as_ref(), &render_page(&load.page))?;

            for (table_id, message) in &load.failures {
                warn!(table_id = %table_id, %message, "table rendered with load error");
            }
            if load.all_failed() {
                bail!("every sheet failed to load");
            }
        }
        Command::Dump { sheet } => {
            let data = fetch_sheet(client, source, &sheet)
                .await
                .with_context(|| format!("loading sheet {:?}", sheet))?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::View { input, view } => {
            let html = fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let mut page = Page::parse_html(&html)
                .with_context(|| format!("parsing {}", input.display()))?;
            apply_view(&mut page, &view, vocab);
            write_output(view.out.as_ref(), &render_page(&page))?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // logs go to stderr so the page can be piped from stdout
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let (vocab, source) = cli.source.settings()?;
    let client = source.build_client()?;
    execute(cli.command, &client, &source, &vocab).await
}
