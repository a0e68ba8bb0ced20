use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{nearest::NearestArgs, route::RouteArgs};

mod graph_loader;
mod nearest;
mod parsers;
mod route;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Route between two coordinates and print the result as JSON
    #[command(visible_alias = "r")]
    Route {
        #[command(flatten)]
        args: RouteArgs,
    },
    /// Print the edge nearest to a coordinate
    #[command(visible_alias = "n")]
    Nearest {
        #[command(flatten)]
        args: NearestArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Route { args } => route::run(args)?,
        Commands::Nearest { args } => nearest::run(args)?,
    }

    Ok(())
}
