//! arborist: rebuilds tree structure templates for the mod's world generation.
//!
//! Every template is read, its logs joined into a tree and its leaves given a
//! distance, and the result written out with those stored as block properties.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use arborist_gen::{
    BlockFilter, DecomposeOptions, DirectoryStore, GenerateConfig, LeafConnectivity, TreeSet,
    TreeTables,
};
use arborist_nbt::DATA_VERSION;

#[derive(Parser)]
#[command(
    name = "arborist",
    about = "Rebuilds tree structure templates with branch directions and leaf distances"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rebuild every tree template
    Generate(GenerateArgs),

    /// Print a structure file as JSON
    Dump {
        path: PathBuf,

        #[arg(long)]
        pretty: bool,
    },
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Directory of hand-built templates
    #[arg(long, env = "TEMPLATES_DIR", default_value = "./resources/structure_templates")]
    pub templates_dir: PathBuf,

    /// Directory the rebuilt structures are written to, one folder per tree
    #[arg(long, env = "STRUCTURES_DIR", default_value = "./src/main/resources/data/tfc/structures")]
    pub output_dir: PathBuf,

    /// Namespace of the emitted blocks
    #[arg(long, default_value = "tfc")]
    pub namespace: String,

    #[arg(long, env = "DATA_VERSION", default_value_t = DATA_VERSION)]
    pub data_version: i32,

    /// Tree sets to build: normal, large, dead
    #[arg(long, value_delimiter = ',', default_value = "normal,large,dead")]
    pub sets: Vec<TreeSet>,

    /// Only build these trees (repeatable)
    #[arg(long = "tree")]
    pub trees: Vec<String>,

    /// Leaf distance neighbourhood: "full" (26) or "faces" (6)
    #[arg(long, default_value = "full")]
    pub leaf_connectivity: LeafConnectivity,

    /// JSON tree tables to use instead of the built-in ones
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Generate(generate) => run_generate(generate),
        Command::Dump { path, pretty } => {
            let value = arborist_nbt::read_value(&path)?;
            let json = arborist_nbt::json::nbt_to_json(value);
            let text = if pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };
            println!("{}", text);
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let tables = match &args.manifest {
        Some(path) => {
            log::info!("Using tree manifest {}", path.display());
            TreeTables::load(path)?
        }
        None => TreeTables::builtin(),
    };

    let config = GenerateConfig {
        options: DecomposeOptions {
            filter: BlockFilter::vanilla(),
            namespace: args.namespace,
            connectivity: args.leaf_connectivity,
            data_version: args.data_version,
        },
        tables,
        sets: args.sets,
        only: args.trees,
    };

    println!("Reading templates from {}", args.templates_dir.display());
    println!("Writing structures to {}", args.output_dir.display());
    let store = DirectoryStore::new(args.templates_dir, args.output_dir);

    let report = arborist_gen::run(&store, &config);
    println!("{}", report.generate_report());

    if !report.is_success() {
        anyhow::bail!("{} structures failed", report.failures.len());
    }
    Ok(())
}
