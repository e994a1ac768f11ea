pub mod builder;
pub mod export;
pub mod frontmatter;
pub mod orphans;
pub mod sidebar;
pub mod table;

pub use crate::domain::model::{ModuleRef, RoleCurriculum};
pub use crate::domain::ports::CurriculumProvider;
pub use crate::utils::error::Result;
