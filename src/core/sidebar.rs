use crate::utils::error::{CurriculumError, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub slug: String,
    pub position: u32,
}

/// 側邊欄展平後的頁面順序；position 即為頁面在側邊欄中 (去重後) 的索引
///
/// 只計入各選單中 section 底下的頁面：選單最上層的頁面與 section 本身的
/// `href` 都不列入，巢狀 section 只展開一層。
#[derive(Debug, Clone, Default)]
pub struct SidebarOrdering {
    entries: Vec<SidebarEntry>,
    index: HashMap<String, usize>,
}

impl SidebarOrdering {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_quarto_str(&content).map_err(|e| match e {
            CurriculumError::SiteSourceError { message, .. } => CurriculumError::SiteSourceError {
                file: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 解析 `_quarto.yml` 的 `website.sidebar`
    pub fn from_quarto_str(content: &str) -> Result<Self> {
        let document: Value = serde_yaml::from_str(content)?;

        let sidebar = document
            .get("website")
            .and_then(|website| website.get("sidebar"))
            .ok_or_else(|| CurriculumError::SiteSourceError {
                file: "_quarto.yml".to_string(),
                message: "missing website.sidebar".to_string(),
            })?;

        // 可能是單一側邊欄 (mapping) 或多個側邊欄 (sequence)
        let menus: Vec<&Value> = match sidebar {
            Value::Sequence(items) => items.iter().collect(),
            other => vec![other],
        };

        let mut pages = Vec::new();
        for menu in menus {
            if let Some(contents) = menu.get("contents") {
                collect_sections(contents, &mut pages);
            }
        }

        let mut ordering = SidebarOrdering::default();
        for path in pages {
            ordering.push(&path);
        }

        tracing::debug!("Sidebar lists {} pages", ordering.len());
        Ok(ordering)
    }

    fn push(&mut self, path: &str) {
        let slug = path.strip_suffix(".qmd").unwrap_or(path).to_string();
        if self.index.contains_key(&slug) {
            return;
        }

        let position = self.entries.len() as u32;
        self.index.insert(slug.clone(), self.entries.len());
        self.entries.push(SidebarEntry { slug, position });
    }

    pub fn get(&self, slug: &str) -> Option<&SidebarEntry> {
        self.index.get(slug).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 選單最上層：只取 section 的 `contents`
fn collect_sections(value: &Value, pages: &mut Vec<String>) {
    match value {
        Value::Sequence(items) => {
            for item in items {
                collect_sections(item, pages);
            }
        }
        Value::Mapping(_) => {
            if let Some(contents) = value.get("contents") {
                collect_entries(contents, true, pages);
            }
        }
        _ => {}
    }
}

fn collect_entries(value: &Value, expand_sections: bool, pages: &mut Vec<String>) {
    match value {
        Value::String(path) => push_page(path, pages),
        Value::Sequence(items) => {
            for item in items {
                collect_entries(item, expand_sections, pages);
            }
        }
        Value::Mapping(_) => match value.get("contents") {
            Some(contents) if expand_sections => collect_entries(contents, false, pages),
            _ => {
                let path = value
                    .get("file")
                    .or_else(|| value.get("href"))
                    .and_then(Value::as_str);
                if let Some(path) = path {
                    push_page(path, pages);
                }
            }
        },
        _ => {}
    }
}

fn push_page(path: &str, pages: &mut Vec<String>) {
    let path = path.trim();
    if path.is_empty() || path == "null" {
        return;
    }
    pages.push(path.to_string());
}
