use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use aq_graph::FlowGraph;
use aq_layout::LayoutConfig;
use aq_project::{Project, builtin};
use aq_session::{HouseholdSettings, Session};
use aq_visuals::ThicknessBasis;

#[derive(Parser)]
#[command(name = "aq-cli")]
#[command(about = "AquaFlow CLI - Household wastewater network tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network file
    Validate {
        /// Path to the network file (JSON or YAML)
        project_path: PathBuf,
    },
    /// Show computed node values for a network
    Show {
        /// Path to the network file; the builtin household network when omitted
        project_path: Option<PathBuf>,
    },
    /// Run the layout simulation and print final node positions
    Simulate {
        /// Path to the network file; the builtin household network when omitted
        project_path: Option<PathBuf>,
        /// Number of layout ticks to run
        #[arg(long, default_value_t = 600)]
        ticks: u32,
        /// Household occupancy
        #[arg(long)]
        people: Option<u32>,
        /// Washwater litres per person per day
        #[arg(long)]
        litres: Option<f64>,
        /// Divert urine into its valorisation output
        #[arg(long)]
        urine_diversion: bool,
        /// Divert fecal matter into its valorisation output
        #[arg(long)]
        fecal_diversion: bool,
    },
    /// Print derived visual attributes (edge widths, labels)
    Visuals {
        /// Path to the network file; the builtin household network when omitted
        project_path: Option<PathBuf>,
        /// Quantity edge thickness encodes
        #[arg(long, value_enum, default_value = "flow")]
        basis: BasisArg,
        /// Use a logarithmic thickness scale
        #[arg(long)]
        log: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BasisArg {
    Flow,
    FlowCod,
    FlowN,
    FlowP,
}

impl From<BasisArg> for ThicknessBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Flow => ThicknessBasis::Flow,
            BasisArg::FlowCod => ThicknessBasis::FlowCod,
            BasisArg::FlowN => ThicknessBasis::FlowN,
            BasisArg::FlowP => ThicknessBasis::FlowP,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error(transparent)]
    Project(#[from] aq_project::ProjectError),

    #[error(transparent)]
    Graph(#[from] aq_graph::GraphError),

    #[error(transparent)]
    Session(#[from] aq_session::SessionError),
}

type AppResult<T> = Result<T, AppError>;

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Show { project_path } => cmd_show(project_path.as_deref()),
        Commands::Simulate {
            project_path,
            ticks,
            people,
            litres,
            urine_diversion,
            fecal_diversion,
        } => cmd_simulate(
            project_path.as_deref(),
            ticks,
            people,
            litres,
            urine_diversion,
            fecal_diversion,
        ),
        Commands::Visuals {
            project_path,
            basis,
            log,
        } => cmd_visuals(project_path.as_deref(), basis.into(), log),
    }
}

fn load_project(path: Option<&Path>) -> AppResult<Project> {
    match path {
        None => Ok(builtin::household()),
        Some(path) => {
            let by_ext = path.extension().and_then(|e| e.to_str());
            let project = match by_ext {
                Some("yaml") | Some("yml") => aq_project::load_yaml(path)?,
                _ => aq_project::load_json(path)?,
            };
            Ok(project)
        }
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating network: {}", project_path.display());
    let project = load_project(Some(project_path))?;
    let graph = FlowGraph::load(project.to_topology())?;
    println!(
        "✓ Network is valid ({} nodes, {} edges)",
        graph.nodes().len(),
        graph.edges().len()
    );
    Ok(())
}

fn cmd_show(project_path: Option<&Path>) -> AppResult<()> {
    let project = load_project(project_path)?;
    let graph = FlowGraph::load(project.to_topology())?;

    println!("Network: {}", project.name);
    println!(
        "{:<4} {:<26} {:<10} {:>14} {:>12} {:>10} {:>10}",
        "key", "alias", "kind", "Q [L/d]", "COD [mg/L]", "N [mg/L]", "P [mg/L]"
    );
    for node in graph.nodes() {
        println!(
            "{:<4} {:<26} {:<10} {:>14.2} {:>12.2} {:>10.2} {:>10.2}",
            node.key,
            node.alias,
            format!("{:?}", node.kind),
            node.flow,
            node.loads.cod,
            node.loads.n,
            node.loads.p
        );
    }
    Ok(())
}

fn cmd_simulate(
    project_path: Option<&Path>,
    ticks: u32,
    people: Option<u32>,
    litres: Option<f64>,
    urine_diversion: bool,
    fecal_diversion: bool,
) -> AppResult<()> {
    let project = load_project(project_path)?;
    let mut session = Session::load(project.to_topology(), LayoutConfig::default())?;

    if people.is_some() || litres.is_some() {
        let defaults = HouseholdSettings::default();
        session.set_household(HouseholdSettings {
            people: people.unwrap_or(defaults.people),
            litres_per_person: litres.unwrap_or(defaults.litres_per_person),
        })?;
    }
    if urine_diversion {
        session.set_urine_diversion(true)?;
    }
    if fecal_diversion {
        session.set_fecal_diversion(true)?;
    }

    let mut snapshot = session.tick_layout(16.67);
    for _ in 1..ticks {
        snapshot = session.tick_layout(16.67);
    }

    println!("✓ Simulation finished (alpha {:.4})", snapshot.alpha);
    for position in &snapshot.positions {
        let node = &session.graph().nodes()[position.id.index() as usize];
        println!(
            "{:<4} {:<26} x {:>8.1}  y {:>8.1}  Q {:>12.2}",
            node.key, node.alias, position.x, position.y, node.flow
        );
    }
    Ok(())
}

fn cmd_visuals(project_path: Option<&Path>, basis: ThicknessBasis, log: bool) -> AppResult<()> {
    let project = load_project(project_path)?;
    let mut session = Session::load(project.to_topology(), LayoutConfig::default())?;
    session.tick_layout(16.67);
    let visuals = session.derive_visuals(basis, log);

    println!("Edges:");
    for edge in &visuals.edges {
        let source = &session.graph().nodes()[edge.source.index() as usize];
        let target = &session.graph().nodes()[edge.target.index() as usize];
        println!(
            "  {} -> {}  width {:.2}  {:?}{}",
            source.key,
            target.key,
            edge.width,
            edge.direction,
            if edge.dashed { "  dashed" } else { "" }
        );
    }

    println!("Nodes:");
    for node in &visuals.nodes {
        let labels: Vec<&str> = [
            node.labels.name.as_deref(),
            node.labels.flow.as_deref(),
            node.labels.concentration.as_deref(),
            node.labels.mass.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        let key = &session.graph().nodes()[node.id.index() as usize].key;
        println!(
            "  {:<4} opacity {:.0}  {}",
            key,
            node.opacity,
            labels.join(" | ")
        );
    }
    Ok(())
}
