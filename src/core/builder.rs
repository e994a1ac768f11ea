use crate::config::toml_config::CurriculumConfig;
use crate::core::frontmatter::FrontMatter;
use crate::core::sidebar::SidebarOrdering;
use crate::core::table::CurriculumTable;
use crate::domain::model::{ModuleRef, RoleCurriculum};
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 從網站原始檔 (側邊欄 + 頁面 front matter) 重新產生角色課程表
pub struct CurriculumBuilder {
    config: CurriculumConfig,
}

impl CurriculumBuilder {
    pub fn new(config: CurriculumConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Result<CurriculumTable> {
        let root = self.config.site_root();
        let sidebar_path = self.config.sidebar_path();
        tracing::info!("Reading sidebar ordering from {}", sidebar_path.display());
        let ordering = SidebarOrdering::from_file(&sidebar_path)?;

        let role_mapping = self.config.role_mapping();
        let mut curricula: BTreeMap<String, Vec<ModuleRef>> = BTreeMap::new();

        for page in find_pages(&root)? {
            let slug = page_slug(&root, &page);
            let Some(entry) = ordering.get(&slug) else {
                tracing::debug!("Skipping {}: not listed in the sidebar", slug);
                continue;
            };

            let Some(front_matter) = FrontMatter::from_file(&page)? else {
                continue;
            };
            if front_matter.roles().is_empty() {
                continue;
            }

            let text = module_text(front_matter.title.as_deref(), &slug);

            for role_name in front_matter.roles() {
                let Some(role) = role_mapping.get(role_name) else {
                    tracing::warn!("Unknown role '{}' in {}", role_name, slug);
                    continue;
                };
                curricula
                    .entry(role.clone())
                    .or_default()
                    .push(ModuleRef::new(slug.clone(), entry.position, text.clone()));
            }
        }

        // BTreeMap 已依角色代號排序；角色內依 position 排序
        let entries = curricula
            .into_iter()
            .map(|(role, mut modules)| {
                modules.sort_by_key(|m| m.position);
                RoleCurriculum { role, modules }
            })
            .collect::<Vec<_>>();

        for entry in &entries {
            tracing::info!("Role {}: {} modules", entry.role, entry.modules.len());
        }

        CurriculumTable::from_entries(entries)
    }
}

/// 顯示文字一律取頁面標題，側邊欄的 `text` 不採用；沒有標題時退回 slug
fn module_text(title: Option<&str>, slug: &str) -> String {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => slug.to_string(),
    }
}

/// 頁面 slug：相對於網站根目錄、以 `/` 分隔且去掉副檔名的路徑
pub fn page_slug(root: &Path, page: &Path) -> String {
    let relative = page.strip_prefix(root).unwrap_or(page).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `.qmd` 頁面：根目錄下一層與兩層 (`dir/page.qmd`, `dir/sub/page.qmd`)
fn find_pages(root: &Path) -> Result<Vec<PathBuf>> {
    let mut pages = Vec::new();

    for dir in subdirectories(root)? {
        collect_qmd(&dir, &mut pages)?;
        for sub in subdirectories(&dir)? {
            collect_qmd(&sub, &mut pages)?;
        }
    }

    pages.sort();
    Ok(pages)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    Ok(dirs)
}

fn collect_qmd(dir: &Path, pages: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "qmd") {
            pages.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_text_uses_title_or_slug() {
        assert_eq!(module_text(Some("History of FHIR"), "m"), "History of FHIR");
        assert_eq!(module_text(None, "modules/x"), "modules/x");
        assert_eq!(module_text(Some("  "), "modules/x"), "modules/x");
    }

    #[test]
    fn test_page_slug() {
        let root = Path::new("/site");
        assert_eq!(
            page_slug(root, Path::new("/site/workshops/bulk-data/index.qmd")),
            "workshops/bulk-data/index"
        );
        assert_eq!(
            page_slug(root, Path::new("/site/modules/cdms.qmd")),
            "modules/cdms"
        );
    }
}
