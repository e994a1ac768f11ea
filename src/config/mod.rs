pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::export::ExportFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "curriculum-map")]
#[command(about = "Role-to-curriculum table for the FHIR for Research site")]
pub struct CliConfig {
    /// Load the table from a JSON or mappings.js file instead of the built-in one
    #[arg(long, global = true)]
    pub table: Option<PathBuf>,

    /// Path to curriculum.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the defined roles
    Roles,

    /// Show the modules of a role
    Show {
        role: String,

        /// Sort by position instead of stored order
        #[arg(long)]
        sorted: bool,
    },

    /// List the roles whose curriculum includes a module
    RolesFor { slug: String },

    /// Export the table
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Regenerate the table from the site sidebar and page front matter
    Build {
        /// Site root (overrides site.root)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output file (overrides site.output_path); format follows the extension
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Report pages no other page or the sidebar links to
    Orphans {
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(table) = &self.table {
            validation::validate_path("--table", &table.to_string_lossy())?;
        }
        if let Some(config) = &self.config {
            validation::validate_path("--config", &config.to_string_lossy())?;
        }

        match &self.command {
            Command::Show { role, .. } => validation::validate_non_empty_string("role", role),
            Command::RolesFor { slug } => validation::validate_non_empty_string("slug", slug),
            Command::Build { root, output, .. } => {
                if let Some(root) = root {
                    validation::validate_path("--root", &root.to_string_lossy())?;
                }
                if let Some(output) = output {
                    validation::validate_path("--output", &output.to_string_lossy())?;
                }
                Ok(())
            }
            Command::Orphans { root: Some(root) } => {
                validation::validate_path("--root", &root.to_string_lossy())
            }
            _ => Ok(()),
        }
    }
}
