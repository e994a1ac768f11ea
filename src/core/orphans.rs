use crate::utils::error::{CurriculumError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

const SIDEBAR_FILE: &str = "_quarto.yml";

/// 找出沒有被任何頁面或側邊欄連結到的 `.qmd` 頁面
pub struct OrphanFinder {
    root: PathBuf,
    excludes: Vec<String>,
    link_pattern: Regex,
}

impl OrphanFinder {
    pub fn new<P: AsRef<Path>>(root: P, excludes: Vec<String>) -> Result<Self> {
        let link_pattern = Regex::new(r"([-\w/.]*\.(?:qmd|html))\b").map_err(|e| {
            CurriculumError::ConfigError {
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            excludes,
            link_pattern,
        })
    }

    /// 回傳相對於網站根目錄的孤兒頁面 (已排序)
    pub fn find(&self) -> Result<Vec<String>> {
        let mut sources = Vec::new();
        walk(&self.root, &mut sources)?;

        let mut pages = BTreeSet::new();
        let mut linked = BTreeSet::new();

        for source in &sources {
            if source.extension().is_some_and(|ext| ext == "qmd") {
                pages.insert(normalize(source));
            }

            let content = std::fs::read_to_string(source)?;
            let base = source.parent().unwrap_or(&self.root);
            for caps in self.link_pattern.captures_iter(&content) {
                let target = normalize(&base.join(&caps[1]));
                linked.insert(target.with_extension("qmd"));
            }
        }

        let excluded: BTreeSet<PathBuf> = self
            .excludes
            .iter()
            .map(|file| normalize(&self.root.join(file)))
            .collect();

        let root = normalize(&self.root);
        let orphans: Vec<String> = pages
            .difference(&linked)
            .filter(|page| !excluded.contains(*page))
            .map(|page| relative_display(&root, page))
            .collect();

        tracing::info!(
            "Scanned {} pages, {} linked, {} orphaned",
            pages.len(),
            linked.len(),
            orphans.len()
        );
        Ok(orphans)
    }
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // 不跟隨符號連結，避免目錄迴圈
        if entry.file_type()?.is_dir() {
            walk(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "qmd")
            || path.file_name().is_some_and(|name| name == SIDEBAR_FILE)
        {
            files.push(path);
        }
    }
    Ok(())
}

/// 純字面上的路徑正規化 (處理 `.` 與 `..`，不存取檔案系統)
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

fn relative_display(root: &Path, page: &Path) -> String {
    let relative = page.strip_prefix(root).unwrap_or(page);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
