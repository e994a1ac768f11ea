use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 預設的角色顯示名稱 -> 角色代號對照
pub const DEFAULT_ROLE_MAPPING: [(&str, &str); 5] = [
    ("Investigator", "investigator"),
    ("Research Leaders", "research-leader"),
    ("Informaticist", "informaticist"),
    ("Software Engineer", "software-engineer"),
    ("Clinician Scientist/Trainee", "clinician-scientist"),
];

/// `curriculum.toml`：課程表產生與網站檢查的設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumConfig {
    #[serde(default)]
    pub site: SiteConfig,
    /// Role display name (as written in page front matter) -> role id.
    pub roles: Option<BTreeMap<String, String>>,
    pub orphans: Option<OrphansConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_sidebar_file")]
    pub sidebar_file: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphansConfig {
    /// Files relative to the site root that are never reported.
    pub exclude: Vec<String>,
}

fn default_root() -> String {
    ".".to_string()
}

fn default_sidebar_file() -> String {
    "_quarto.yml".to_string()
}

fn default_output_path() -> String {
    "modules/mappings.js".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            sidebar_file: default_sidebar_file(),
            output_path: default_output_path(),
        }
    }
}

impl CurriculumConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CurriculumError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CurriculumError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SITE_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CurriculumError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 角色對照表；未設定時使用預設值
    pub fn role_mapping(&self) -> BTreeMap<String, String> {
        match &self.roles {
            Some(roles) => roles.clone(),
            None => DEFAULT_ROLE_MAPPING
                .iter()
                .map(|(name, id)| (name.to_string(), id.to_string()))
                .collect(),
        }
    }

    pub fn site_root(&self) -> PathBuf {
        PathBuf::from(&self.site.root)
    }

    pub fn sidebar_path(&self) -> PathBuf {
        self.site_root().join(&self.site.sidebar_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.site_root().join(&self.site.output_path)
    }

    /// 孤兒頁面檢查時排除的檔案 (相對於網站根目錄)
    pub fn orphan_excludes(&self) -> Vec<String> {
        match &self.orphans {
            Some(orphans) => orphans.exclude.clone(),
            None => vec!["index.qmd".to_string()],
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("site.root", &self.site.root)?;
        validation::validate_path("site.sidebar_file", &self.site.sidebar_file)?;
        validation::validate_path("site.output_path", &self.site.output_path)?;

        if let Some(roles) = &self.roles {
            if roles.is_empty() {
                return Err(CurriculumError::ConfigValidationError {
                    field: "roles".to_string(),
                    message: "at least one role mapping is required".to_string(),
                });
            }
            for (name, id) in roles {
                validation::validate_non_empty_string("roles", name)?;
                validation::validate_role_id(&format!("roles.\"{}\"", name), id)?;
            }
        }

        if let Some(orphans) = &self.orphans {
            for file in &orphans.exclude {
                validation::validate_path("orphans.exclude", file)?;
            }
        }

        Ok(())
    }
}

impl Validate for CurriculumConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
