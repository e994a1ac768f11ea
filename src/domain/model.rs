use serde::{Deserialize, Serialize};

/// 課程中的單一模組引用
///
/// `position` 只是排序提示：同一角色內可能不連續、也可能重複，
/// 且同一個 slug 在不同角色下可以有不同的 position。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRef {
    pub slug: String,
    pub position: u32,
    pub text: String,
}

/// 一個學習角色與其課程模組列表 (依原始順序儲存)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleCurriculum {
    pub role: String,
    pub modules: Vec<ModuleRef>,
}

impl ModuleRef {
    pub fn new(slug: impl Into<String>, position: u32, text: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            position,
            text: text.into(),
        }
    }
}

impl RoleCurriculum {
    /// 依 position 排序的模組 (穩定排序，同值保留原本順序)
    pub fn sorted_modules(&self) -> Vec<ModuleRef> {
        let mut modules = self.modules.clone();
        modules.sort_by_key(|m| m.position);
        modules
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.modules.iter().any(|m| m.slug == slug)
    }
}
