use crate::domain::model::ModuleRef;
use crate::utils::error::Result;
use std::collections::BTreeSet;

/// 唯讀的角色課程查詢介面，供導覽/渲染層使用
pub trait CurriculumProvider: Send + Sync {
    fn get_curriculum(&self, role: &str) -> Result<&[ModuleRef]>;
    fn list_roles(&self) -> BTreeSet<&str>;
}
