//! Command implementations for the EMIG CLI.
//!
//! Runs the choropleth pipeline headless: join, classify and order the
//! bars for one attribute, then print what the views would show.

use clap::Subcommand;

pub mod summary;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join records onto regions and print classes and bar order for one attribute
    Summary {
        /// Path to the migrant counts CSV
        #[arg(short = 'r', long)]
        records: String,

        /// Path to the region GeoJSON feature collection
        #[arg(short = 'g', long)]
        regions: String,

        /// Attribute to express (defaults to the first one)
        #[arg(short = 'a', long)]
        attribute: Option<String>,

        /// Optional JSON file overriding the map configuration
        #[arg(short = 'c', long)]
        config: Option<String>,

        /// Print the full view update as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the attributes that can be expressed
    Attributes,
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Summary {
            records,
            regions,
            attribute,
            config,
            json,
        } => summary::run_summary(&records, &regions, attribute.as_deref(), config.as_deref(), json),
        Command::Attributes => {
            summary::list_attributes();
            Ok(())
        }
    }
}
