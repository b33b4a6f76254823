//! apiview: describe types declared in compiled module images
//!
//! ```bash
//! # Describe one type from two images
//! apiview describe --image corlib.avmi --image shapes.avmi Shapes.Circle
//!
//! # Every image in a directory, with the base chain
//! apiview describe --image-dir out/ --ancestors --pretty "Shapes.Box`1+Lid"
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use apiview::logging::init_tracing;
use apiview::{Documentation, TypeDescriptionJson};

#[derive(Parser)]
#[command(
    name = "apiview",
    version,
    about = "Describe types declared in compiled module images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the JSON description of one type
    Describe(DescribeCmd),
}

#[derive(Parser, Debug)]
struct DescribeCmd {
    /// Module image file (repeatable)
    #[arg(long = "image", value_name = "FILE")]
    images: Vec<PathBuf>,

    /// Directory whose *.avmi files are all loaded
    #[arg(long, value_name = "DIR")]
    image_dir: Option<PathBuf>,

    /// Include the base type chain
    #[arg(long)]
    ancestors: bool,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Metadata name, e.g. "Ns.Outer+Inner`1"
    metadata_name: String,
}

impl DescribeCmd {
    fn execute(&self) -> Result<()> {
        let mut builder = Documentation::builder();
        for path in &self.images {
            builder = builder.add_image_file(path)?;
        }
        if let Some(dir) = &self.image_dir {
            builder = builder.add_image_dir(dir)?;
        }
        let docs = builder.build()?;

        let ty = docs
            .get_metadata_type(&self.metadata_name)
            .ok_or_else(|| anyhow!("type {} not found", self.metadata_name))?;

        let mut description = TypeDescriptionJson::from_resolved(&ty);
        if self.ancestors {
            description = description.with_ancestors(&ty);
        }
        let out = if self.pretty {
            serde_json::to_string_pretty(&description)?
        } else {
            serde_json::to_string(&description)?
        };
        println!("{}", out);
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();
    let Cli { command } = Cli::parse();
    match command {
        Commands::Describe(cmd) => cmd.execute(),
    }
}
