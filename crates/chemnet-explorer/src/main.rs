//! ChemNet Explorer - Entry Point
//!
//! One-shot searches from the command line, or the web front end with `serve`.

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use chemnet_explorer::formatters::{
    examples_json, format_examples_markdown, format_funding_markdown, format_panel_markdown,
    funding_json, panel_json, to_pretty,
};
use chemnet_explorer::models::{
    ChemicalGroup, ChemicalSearchRequest, Chemicals, Companies, CompanyCategory,
    CompanySearchRequest, ResponseFormat, Researchers, Universities, UniversityCategory,
    UniversitySearchRequest,
};
use chemnet_explorer::panel::{FundingPanel, ResearcherPanel, SearchPanel};
use chemnet_explorer::views::{PanelView, Present};
use chemnet_explorer::{ChemNetClient, Config, PanelError, server};

#[derive(Parser, Debug)]
#[command(name = "chemnet")]
#[command(about = "Explore the ChemNet chemical-research network")]
#[command(version)]
struct Cli {
    /// API base URL (including the /api prefix)
    #[arg(long, env = "CHEMNET_API_URL", global = true)]
    api_url: Option<String>,

    /// Host the network visualizations are embedded from
    #[arg(long, env = "CHEMNET_VIZ_HOST", global = true)]
    viz_host: Option<String>,

    /// Output format: markdown or json
    #[arg(long, default_value = "markdown", value_parser = parse_format, global = true)]
    format: ResponseFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a chemical
    Chemical {
        name: String,
        /// InChIKey for a more precise match
        #[arg(long)]
        inchikey: Option<String>,
    },
    /// Search for a funding source
    Company {
        name: String,
        #[arg(long, default_value_t)]
        category: CompanyCategory,
        #[arg(long, default_value_t)]
        chemical_group: ChemicalGroup,
        /// Split affiliations by country
        #[arg(long)]
        sep_country: bool,
    },
    /// Search for a university
    University {
        name: String,
        #[arg(long, default_value_t)]
        category: UniversityCategory,
        #[arg(long, default_value_t)]
        chemical_group: ChemicalGroup,
    },
    /// Search for a researcher ("Last, First")
    Researcher {
        name: String,
        /// Pick one match of an ambiguous name by index
        #[arg(long, conflicts_with = "combine")]
        select: Option<usize>,
        /// Merge every match of an ambiguous name
        #[arg(long)]
        combine: bool,
    },
    /// Show the top funding sources
    Funding {
        /// Also show details of one funding source
        #[arg(long)]
        company: Option<String>,
    },
    /// List example names of a search endpoint
    Examples { kind: Kind },
    /// Run the web front end
    Serve {
        #[arg(long, default_value = "8000", env = "PORT")]
        port: u16,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Chemicals,
    Companies,
    Universities,
    Researchers,
}

fn parse_format(s: &str) -> Result<ResponseFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "markdown" | "md" => Ok(ResponseFormat::Markdown),
        "json" => Ok(ResponseFormat::Json),
        other => Err(format!("unknown format {other:?}, expected markdown or json")),
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays clean for rendered output.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }
    if let Some(viz_host) = cli.viz_host {
        config.visualization_host = viz_host;
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        api = %config.api_base_url,
        "Starting ChemNet Explorer"
    );

    let client = ChemNetClient::new(config)?;
    let format = cli.format;

    match cli.command {
        Command::Chemical { name, inchikey } => {
            let request = ChemicalSearchRequest::new(name, inchikey);
            run_search::<Chemicals>(&client, request, format).await?;
        }
        Command::Company { name, category, chemical_group, sep_country } => {
            let request = CompanySearchRequest { company: name, category, chemical_group, sep_country };
            run_search::<Companies>(&client, request, format).await?;
        }
        Command::University { name, category, chemical_group } => {
            let request = UniversitySearchRequest { university: name, category, chemical_group };
            run_search::<Universities>(&client, request, format).await?;
        }
        Command::Researcher { name, select, combine } => {
            run_researcher(&client, &name, select, combine, format).await?;
        }
        Command::Funding { company } => {
            let mut panel = FundingPanel::new();
            panel.load(&client).await;
            if let Some(company) = company {
                panel.open_details(&client, &company).await?;
            }
            let view = panel.view();
            match format {
                ResponseFormat::Markdown => println!("{}", format_funding_markdown(&view)),
                ResponseFormat::Json => println!("{}", to_pretty(&funding_json(&view))),
            }
        }
        Command::Examples { kind } => {
            let examples = match kind {
                Kind::Chemicals => examples::<Chemicals>(&client).await,
                Kind::Companies => examples::<Companies>(&client).await,
                Kind::Universities => examples::<Universities>(&client).await,
                Kind::Researchers => examples::<Researchers>(&client).await,
            };
            match format {
                ResponseFormat::Markdown => println!("{}", format_examples_markdown(&examples)),
                ResponseFormat::Json => println!("{}", to_pretty(&examples_json(&examples))),
            }
        }
        Command::Serve { port } => {
            tracing::info!(port, "Running web front end");
            server::serve(client, port).await?;
        }
    }

    Ok(())
}

async fn run_search<K: Present>(
    client: &ChemNetClient,
    request: K::Request,
    format: ResponseFormat,
) -> anyhow::Result<()> {
    let mut panel = SearchPanel::<K>::new();
    panel.search(client, request).await;
    reject_validation(panel.state().error())?;

    print_view(&panel.view(client.visualization_host()), format);
    Ok(())
}

async fn run_researcher(
    client: &ChemNetClient,
    name: &str,
    select: Option<usize>,
    combine: bool,
    format: ResponseFormat,
) -> anyhow::Result<()> {
    let mut panel = ResearcherPanel::new();
    panel.search(client, name).await;
    reject_validation(panel.state().error())?;

    let pending = panel.view(client.visualization_host()).as_selection().is_some();
    if pending {
        if combine {
            panel.combine_all(client).await?;
        } else if let Some(index) = select {
            panel.select(client, index).await?;
        }
    }

    print_view(&panel.view(client.visualization_host()), format);
    Ok(())
}

async fn examples<K: Present>(client: &ChemNetClient) -> Vec<String> {
    let mut panel = SearchPanel::<K>::new();
    panel.load_examples(client).await;
    panel.examples().to_vec()
}

/// Bad input is a local error; everything else is rendered.
fn reject_validation(error: Option<&PanelError>) -> anyhow::Result<()> {
    match error {
        Some(err @ PanelError::Validation { .. }) => Err(anyhow::anyhow!(err.to_user_message())),
        _ => Ok(()),
    }
}

fn print_view(view: &PanelView, format: ResponseFormat) {
    match format {
        ResponseFormat::Markdown => println!("{}", format_panel_markdown(view)),
        ResponseFormat::Json => println!("{}", to_pretty(&panel_json(view))),
    }
}
