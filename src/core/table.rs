use crate::domain::model::{ModuleRef, RoleCurriculum};
use crate::domain::ports::CurriculumProvider;
use crate::utils::error::{CurriculumError, Result};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::OnceLock;

/// 隨套件發佈的角色課程表
const BUILTIN_TABLE: &str = include_str!("../../data/role_module_map.json");

/// Variable name the site scripts read the table from.
pub const JS_VARIABLE: &str = "role_module_map";

static BUILTIN: OnceLock<std::result::Result<CurriculumTable, String>> = OnceLock::new();

/// 角色對課程的唯讀查詢表
///
/// 保留原始的角色順序 (序列化時使用)，另外建立 role -> index 的索引供查詢。
#[derive(Debug, Clone)]
pub struct CurriculumTable {
    entries: Vec<RoleCurriculum>,
    index: HashMap<String, usize>,
}

impl PartialEq for CurriculumTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CurriculumTable {}

impl CurriculumTable {
    /// 由角色列表建立查詢表，並做載入時的結構驗證
    pub fn from_entries(entries: Vec<RoleCurriculum>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            if entry.role.trim().is_empty() {
                return Err(CurriculumError::invalid_table(format!(
                    "entry #{} has an empty role",
                    i
                )));
            }
            if index.insert(entry.role.clone(), i).is_some() {
                return Err(CurriculumError::invalid_table(format!(
                    "duplicate role '{}'",
                    entry.role
                )));
            }
            if entry.modules.is_empty() {
                return Err(CurriculumError::invalid_table(format!(
                    "role '{}' has no modules",
                    entry.role
                )));
            }
            for (j, module) in entry.modules.iter().enumerate() {
                if module.slug.trim().is_empty() {
                    return Err(CurriculumError::invalid_table(format!(
                        "role '{}' module #{} has an empty slug",
                        entry.role, j
                    )));
                }
                if module.text.trim().is_empty() {
                    return Err(CurriculumError::invalid_table(format!(
                        "role '{}' module '{}' has an empty text",
                        entry.role, module.slug
                    )));
                }
            }
        }

        tracing::debug!("Loaded curriculum table with {} roles", entries.len());
        Ok(Self { entries, index })
    }

    /// 從 JSON 字串解析 (持久化格式)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: Vec<RoleCurriculum> = serde_json::from_str(content)?;
        Self::from_entries(entries)
    }

    /// 從網站使用的 `const role_module_map = [...];` 檔案內容解析
    pub fn from_js_str(content: &str) -> Result<Self> {
        let re = Regex::new(r"^\s*(?:const|let|var)\s+role_module_map\s*=")
            .map_err(|e| CurriculumError::invalid_table(e.to_string()))?;

        let prefix = re.find(content).ok_or_else(|| {
            CurriculumError::invalid_table(format!(
                "expected a `const {} = [...]` declaration",
                JS_VARIABLE
            ))
        })?;

        let body = content[prefix.end()..].trim();
        let body = body.strip_suffix(';').unwrap_or(body);
        Self::from_json_str(body)
    }

    /// 從檔案載入；副檔名為 `.js` 時視為網站腳本格式，其餘視為 JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::info!("Loading curriculum table from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("js") => Self::from_js_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// 內建課程表，第一次存取時解析一次
    pub fn builtin() -> Result<&'static CurriculumTable> {
        BUILTIN
            .get_or_init(|| Self::from_json_str(BUILTIN_TABLE).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| CurriculumError::invalid_table(message.clone()))
    }

    fn entry(&self, role: &str) -> Result<&RoleCurriculum> {
        self.index
            .get(role)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| CurriculumError::RoleNotFound {
                role: role.to_string(),
            })
    }

    pub fn get_curriculum(&self, role: &str) -> Result<&[ModuleRef]> {
        Ok(self.entry(role)?.modules.as_slice())
    }

    pub fn list_roles(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|e| e.role.as_str()).collect()
    }

    /// 依 position 排序後的課程 (穩定排序)
    pub fn ordered_curriculum(&self, role: &str) -> Result<Vec<ModuleRef>> {
        Ok(self.entry(role)?.sorted_modules())
    }

    /// 包含指定模組的角色
    pub fn roles_for_slug(&self, slug: &str) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|e| e.contains_slug(slug))
            .map(|e| e.role.as_str())
            .collect()
    }

    pub fn contains_role(&self, role: &str) -> bool {
        self.index.contains_key(role)
    }

    pub fn entries(&self) -> &[RoleCurriculum] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CurriculumProvider for CurriculumTable {
    fn get_curriculum(&self, role: &str) -> Result<&[ModuleRef]> {
        CurriculumTable::get_curriculum(self, role)
    }

    fn list_roles(&self) -> BTreeSet<&str> {
        CurriculumTable::list_roles(self)
    }
}
