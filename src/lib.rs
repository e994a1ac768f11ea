pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::toml_config::CurriculumConfig;
pub use core::{builder::CurriculumBuilder, orphans::OrphanFinder, table::CurriculumTable};
pub use domain::model::{ModuleRef, RoleCurriculum};
pub use domain::ports::CurriculumProvider;
pub use utils::error::{CurriculumError, Result};
