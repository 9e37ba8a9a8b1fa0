use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rule_impact_simulator::catalog::RuleId;
use rule_impact_simulator::config::{Config, ConfigOverrides};
use rule_impact_simulator::display::{self, SessionView, SimulationView};
use rule_impact_simulator::output::json::render_json;
use rule_impact_simulator::output::table::{
    render_comparison_chart, render_metrics_table, render_rules_table,
};
use rule_impact_simulator::server::run_server;
use rule_impact_simulator::session::Session;
use tracing::warn;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "rule-impact-simulator",
    about = "Simulate the acceptance-rate impact of credit scoring rules"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show today's baseline metrics and the advisory caption
    Status,
    /// List the rule catalog with impacts and current toggles
    Rules,
    /// Run a projection, optionally with some rules toggled off
    Simulate {
        #[arg(long, value_delimiter = ',')]
        disable: Vec<String>,
    },
    /// Print the (simulated) hand-off confirmation
    Confirm,
    /// Start the HTTP display surface
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write or show the configuration file
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = Config::load(Some(&config_path))?;
    let output = cli
        .output
        .unwrap_or_else(|| parse_output_format(&config.display.output_format));

    match &cli.command {
        Commands::Status => {
            let session = Session::new();
            print_status(&display::session_view(&session), output)?;
        }
        Commands::Rules => {
            let session = Session::new();
            print_rules(&display::session_view(&session), output)?;
        }
        Commands::Simulate { disable } => {
            let mut session = Session::new();
            for name in disable {
                let id = RuleId::from_str(name)?;
                session.toggle_rule(id, false);
            }
            let result = session.simulate();
            let view = display::simulation_view(session.baseline(), &result);
            print_simulation(&view, output)?;
        }
        Commands::Confirm => {
            println!("{}", Session::new().confirm());
        }
        Commands::Serve { host, port } => {
            let mut config = config;
            config.apply_overrides(ConfigOverrides {
                host: host.clone(),
                port: *port,
            });
            let bind = format!("{}:{}", config.server.host, config.server.port);
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            run_server(config, addr).await?;
        }
        Commands::Config { init, show } => {
            if *init {
                Config::write_template(&config_path)?;
                println!("Wrote config template to {}", config_path.display());
            }
            if *show || !*init {
                println!("{}", render_json(&config)?);
            }
        }
    }

    Ok(())
}

fn parse_output_format(raw: &str) -> OutputFormat {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "table" => OutputFormat::Table,
        other => {
            warn!("unknown output format in config: {other}, using table");
            OutputFormat::Table
        }
    }
}

fn print_status(view: &SessionView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("Analysis date: {}", view.analysis_date);
            println!("{}", render_metrics_table(&view.baseline_panels));
            println!("{}", view.advisory);
        }
        OutputFormat::Json => println!("{}", render_json(view)?),
    }
    Ok(())
}

fn print_rules(view: &SessionView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_rules_table(&view.toggles)),
        OutputFormat::Json => println!("{}", render_json(&view.toggles)?),
    }
    Ok(())
}

fn print_simulation(view: &SimulationView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_metrics_table(&view.panels));
            println!("{}", render_comparison_chart(&view.chart));
            println!("{}", view.notice);
        }
        OutputFormat::Json => println!("{}", render_json(view)?),
    }
    Ok(())
}
