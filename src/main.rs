//! Entry point for the npzvis application.
//! Handles CLI parsing, archive loading, and dispatches listing, description,
//! plot planning, table paging and CSV export for the selected array.

use clap::Parser;
use npz_vis::demo::create_demo_archive;
use npz_vis::parallel::{get_parallel_info, ParallelConfig};
use npz_vis::sink::{RenderSink, TextSink};
use npz_vis::{format_shape, PlotKind, Session};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();
    init_tracing(args.verbose);

    ParallelConfig::new(args.threads).setup_global_pool()?;
    debug!("{}", get_parallel_info());

    if let Some(demo_path) = &args.create_demo {
        let names = create_demo_archive(demo_path)?;
        println!(
            "✅ Wrote demo archive {} with arrays: {}",
            demo_path.display(),
            names.join(", ")
        );
    }

    let Some(file) = &args.file else {
        return Ok(());
    };

    let mut session = Session::new();
    let archive = session.open(file)?;
    println!("{archive}");

    if args.list {
        list_arrays(&session);
    }

    let Some(name) = &args.array else {
        if !args.list {
            list_arrays(&session);
        }
        if args.plot.is_some() || args.page.is_some() || args.export.is_some() {
            warn!("--plot, --page and --export need an array; pass one with --array");
        }
        return Ok(());
    };

    session.select(name)?;

    let description = session.describe()?;
    if args.json {
        print_json(&description)?;
    } else {
        println!("\n{description}");
    }

    if let Some(kind) = args.plot {
        if kind == PlotKind::Scatter {
            let advice = session.advise_dimensions()?;
            if args.json {
                print_json(&advice)?;
            }
        }
        let plan = session.plan_render(kind, args.x_axis.clone(), args.y_axis.clone())?;
        println!();
        TextSink::new(std::io::stdout().lock()).draw(&plan)?;
    }

    if let Some(number) = args.page {
        let page = session.page(number)?;
        if args.json {
            print_json(&page)?;
        } else {
            println!("\n{page}");
        }
    }

    if let Some(path) = &args.export {
        let rows = session.export(path)?;
        println!("✅ Exported {rows} rows of '{name}' to {}", path.display());
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_arrays(session: &Session) {
    let Some(archive) = session.archive() else {
        return;
    };
    println!("\nArrays:");
    for array in archive.iter() {
        println!(
            "  {:<24} {:<16} {}",
            array.name(),
            format_shape(array.shape()),
            array.dtype()
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
