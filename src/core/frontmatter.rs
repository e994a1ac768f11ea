use crate::utils::error::{CurriculumError, Result};
use serde::Deserialize;
use std::path::Path;

/// 頁面 front matter 中用得到的欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrontMatter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl FrontMatter {
    pub fn roles(&self) -> &[String] {
        self.roles.as_deref().unwrap_or(&[])
    }

    /// 解析 `---` 之間的 YAML；沒有 front matter 時回傳 `None`
    pub fn parse(page: &str, content: &str) -> Result<Option<Self>> {
        let Some(rest) = content.trim_start().strip_prefix("---") else {
            return Ok(None);
        };
        let Some((yaml, _body)) = rest.split_once("---") else {
            return Err(CurriculumError::SiteSourceError {
                file: page.to_string(),
                message: "front matter is not terminated by `---`".to_string(),
            });
        };

        if yaml.trim().is_empty() {
            return Ok(Some(FrontMatter::default()));
        }

        serde_yaml::from_str(yaml)
            .map(Some)
            .map_err(|e| CurriculumError::SiteSourceError {
                file: page.to_string(),
                message: e.to_string(),
            })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&path.display().to_string(), &content)
    }
}
