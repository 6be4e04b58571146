use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nistmat::constants::DEFAULT_OUTPUT;
use nistmat::{Catalog, build_user_materials, write_materials_xml};
use tracing_subscriber::EnvFilter;

/// Export the element, isotope and material catalog, including the
/// built-in user materials, to an XML file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Output file
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut catalog = Catalog::new();
    println!(
        "Catalog: {} elements, {} predefined materials",
        catalog.element_names().len(),
        catalog.predefined_material_names().len()
    );

    let derived = match build_user_materials(&mut catalog) {
        Ok(derived) => derived,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("  User materials: {}", derived.len());

    match write_materials_xml(&mut catalog, &derived, &cli.output) {
        Ok(summary) => {
            println!(
                "  Isotopes: {}, elements: {}, materials: {}",
                summary.isotopes, summary.elements, summary.materials
            );
            println!("\nWrote {:?}", cli.output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
