//! Netforge CLI - build example circuits and extract their netlists.

mod designs;

use clap::{Parser, Subcommand, ValueEnum};
use netforge::{
    CircuitOptions, DuplicatePolicy, Extraction, ExtractionOptions, NetforgeCore, Severity,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use crate::designs::Design;

/// Extraction finished with resolution errors.
const EXIT_RESOLUTION: i32 = 1;
/// The design itself could not be built.
const EXIT_CONSTRUCTION: i32 = 2;

#[derive(Parser)]
#[command(name = "netforge")]
#[command(about = "Hierarchical circuit netlist extraction tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Log extraction details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the pin-resolved netlist of a built-in design
    Netlist {
        #[arg(value_enum, value_name = "DESIGN")]
        design: Design,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Write the netlist to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Fail when a trait is attached twice instead of replacing it
        #[arg(long)]
        strict_traits: bool,

        /// Treat dangling nets as errors
        #[arg(long)]
        fail_on_dangling: bool,
    },

    /// Print the logical nets of a built-in design with interface paths
    Nets {
        #[arg(value_enum, value_name = "DESIGN")]
        design: Design,
    },

    /// List built-in designs
    Designs,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for downstream tools
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Netlist {
            design,
            format,
            output,
            strict_traits,
            fail_on_dangling,
        } => handle_netlist(design, format, output, strict_traits, fail_on_dangling),
        Commands::Nets { design } => handle_nets(design),
        Commands::Designs => {
            handle_designs(cli.verbose);
            0
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "netforge=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn handle_netlist(
    design: Design,
    format: OutputFormat,
    output: Option<PathBuf>,
    strict_traits: bool,
    fail_on_dangling: bool,
) -> i32 {
    let circuit_options = if strict_traits {
        CircuitOptions::new().with_duplicate_traits(DuplicatePolicy::Reject)
    } else {
        CircuitOptions::default()
    };
    let (circuit, root) = match design.build(circuit_options) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: failed to build '{}': {}", design.name(), e);
            return EXIT_CONSTRUCTION;
        }
    };

    let options = ExtractionOptions::new().with_strict_dangling(fail_on_dangling);
    let extraction = match NetforgeCore::extract(&circuit, root, &options) {
        Ok(extraction) => extraction,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONSTRUCTION;
        }
    };

    let rendered = match format {
        OutputFormat::Human => render_human(design, &extraction),
        OutputFormat::Json => render_json(design, &extraction),
    };
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, rendered) {
                eprintln!("Error: cannot write {}: {}", path.display(), e);
                return EXIT_RESOLUTION;
            }
            eprintln!("Netlist written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if extraction.has_errors() {
        EXIT_RESOLUTION
    } else {
        0
    }
}

fn render_human(design: Design, extraction: &Extraction) -> String {
    let mut out = String::new();
    let netlist = &extraction.physical;
    out.push_str(&format!("\nDesign: {}\n", design.name()));
    out.push_str(&format!("{}\n", "─".repeat(60)));

    out.push_str("\n  Components:\n");
    for component in &netlist.components {
        let value = component
            .value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "    {:<5} {:<8} {}\n",
            component.reference, value, component.path
        ));
        if let Some(ref footprint) = component.footprint {
            out.push_str(&format!("          {}\n", footprint));
        }
    }

    out.push_str("\n  Nets:\n");
    for net in &netlist.nets {
        let pins: Vec<String> = net
            .pins
            .iter()
            .map(|p| format!("{}.{}", p.reference, p.pin))
            .collect();
        let marker = if net.dangling { " (dangling)" } else { "" };
        out.push_str(&format!("    {}{}: {}\n", net.name, marker, pins.join(" ")));
    }

    let errors: Vec<_> = extraction
        .issues
        .iter()
        .filter(|i| matches!(i.severity, Severity::Error))
        .collect();
    let warnings: Vec<_> = extraction.warnings().collect();
    if !errors.is_empty() {
        out.push_str("\n  ERRORS:\n");
        for issue in errors {
            out.push_str(&format!("    - {}\n", issue.message));
        }
    }
    if !warnings.is_empty() {
        out.push_str("\n  WARNINGS:\n");
        for issue in warnings {
            out.push_str(&format!("    - {}\n", issue.message));
        }
    }

    let stats = &extraction.stats;
    out.push_str("\n  Summary:\n");
    out.push_str(&format!("    Components: {}\n", stats.components));
    out.push_str(&format!(
        "    Nets:       {} ({} logical)\n",
        stats.physical_nets, stats.logical_nets
    ));
    out.push_str(&format!("    Pins:       {}\n", stats.pins));
    out.push_str(&format!("    Dangling:   {}\n", stats.dangling));
    out.push_str(&format!("    Withheld:   {}\n", stats.withheld));
    out.push_str(&format!("    Errors:     {}\n", stats.errors));
    out
}

fn render_json(design: Design, extraction: &Extraction) -> String {
    let output = serde_json::json!({
        "design": design.name(),
        "components": extraction.physical.components,
        "nets": extraction.physical.nets.iter().map(|n| {
            serde_json::json!({
                "name": n.name,
                "dangling": n.dangling,
                "pins": n.pins.iter().map(|p| {
                    serde_json::json!({ "reference": p.reference, "pin": p.pin })
                }).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
        "issues": extraction.issues,
        "stats": extraction.stats,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(json) => json + "\n",
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

fn handle_nets(design: Design) -> i32 {
    let (circuit, root) = match design.build(CircuitOptions::default()) {
        Ok(built) => built,
        Err(e) => {
            eprintln!("Error: failed to build '{}': {}", design.name(), e);
            return EXIT_CONSTRUCTION;
        }
    };
    let logical = match NetforgeCore::logical_nets(&circuit, root) {
        Ok(logical) => logical,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_CONSTRUCTION;
        }
    };

    for net in logical.nets() {
        println!("{}", net.name());
        for member in &net.members {
            println!("  {}", circuit.interface_path(*member));
        }
    }
    0
}

fn handle_designs(verbose: bool) {
    println!("Available designs:\n");
    for design in Design::all() {
        println!("  {}", design.name());
        if verbose {
            println!("    {}", design.description());
        }
    }
}
