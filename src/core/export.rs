use crate::core::table::{CurriculumTable, JS_VARIABLE};
use crate::utils::error::{CurriculumError, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// Persisted JSON shape
    Json,
    /// `const role_module_map = [...];` for the site scripts
    Js,
    Csv,
    Tsv,
}

impl FromStr for ExportFormat {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "js" => Ok(ExportFormat::Js),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            other => Err(CurriculumError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: json, js, csv, tsv".to_string(),
            }),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Js => "js",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        };
        f.write_str(name)
    }
}

impl ExportFormat {
    /// 依副檔名推斷格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

pub fn render(table: &CurriculumTable, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(table),
        ExportFormat::Js => to_js(table),
        ExportFormat::Csv => to_delimited(table, b','),
        ExportFormat::Tsv => to_delimited(table, b'\t'),
    }
}

/// 持久化格式，兩格縮排
pub fn to_json(table: &CurriculumTable) -> Result<String> {
    let mut json = serde_json::to_string_pretty(table.entries())?;
    json.push('\n');
    Ok(json)
}

/// 網站 `modules/mappings.js` 的內容
pub fn to_js(table: &CurriculumTable) -> Result<String> {
    let json = serde_json::to_string_pretty(table.entries())?;
    Ok(format!("const {} = {};", JS_VARIABLE, json))
}

/// 每個模組一列：`role,position,slug,text`
pub fn to_delimited(table: &CurriculumTable, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["role", "position", "slug", "text"])?;
    for entry in table.entries() {
        for module in &entry.modules {
            writer.write_record([
                entry.role.as_str(),
                module.position.to_string().as_str(),
                module.slug.as_str(),
                module.text.as_str(),
            ])?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CurriculumError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| CurriculumError::invalid_table(e.to_string()))
}

/// 寫出檔案，必要時建立上層目錄
pub fn write_output<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
