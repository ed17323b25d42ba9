// ==========================================
// 商品目录批量导入系统 - 文件解析器实现
// ==========================================
// 职责: 原始文本 + 格式标识 → 有序字段映射序列
// 支持: 分隔文本 (.csv) / 结构化对象 (.json)
// 红线: 解析失败整批中止(全有或全无),不同于行级校验失败
// ==========================================

use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;
use std::path::Path;

/// 字段分隔符
pub const FIELD_DELIMITER: char = ',';

/// 字段包裹引号
pub const FIELD_QUOTE: char = '"';

/// 原始行记录: 小写列名 → 原始字符串值
pub type RawRow = HashMap<String, String>;

// ==========================================
// SourceFormat - 输入格式标识
// ==========================================
// 约定: 仅由文件扩展名推断,其余扩展名在解析前拒绝
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    DelimitedText,
    StructuredObject,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::DelimitedText),
            "json" => Ok(SourceFormat::StructuredObject),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// 读取源文件: 返回完整文本与格式标识
///
/// 扩展名检查先于读取,不支持的后缀在解析开始前拒绝
pub fn read_source<P: AsRef<Path>>(path: P) -> ImportResult<(String, SourceFormat)> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let format = SourceFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    Ok((content, format))
}

// ==========================================
// DelimitedTextParser - 分隔文本解析
// ==========================================
// 算法: 首行为表头(小写 + 去空白);数据行逐字符扫描,
//       引号切换 in_quoted_field,引号内的分隔符按字面追加
// 限制: 不支持跨行的引号字段(单行一条记录)
pub struct DelimitedTextParser;

impl FileParser for DelimitedTextParser {
    fn parse_to_raw_rows(&self, content: &str) -> ImportResult<Vec<RawRow>> {
        let text = content.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut lines = text.lines();

        // 表头: 按原样匹配列名,不做去引号处理
        let header: Vec<String> = match lines.next() {
            Some(line) => line
                .split(FIELD_DELIMITER)
                .map(|h| h.trim().to_lowercase())
                .collect(),
            None => return Ok(Vec::new()),
        };

        let mut rows = Vec::new();
        for line in lines {
            let values = tokenize_line(line);
            let mut row = RawRow::with_capacity(header.len());

            // 按位置对齐表头;短行的尾部列取空串,键永不缺失
            for (col_idx, key) in header.iter().enumerate() {
                let value = values.get(col_idx).cloned().unwrap_or_default();
                row.insert(key.clone(), value);
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

/// 单行分词
///
/// - 引号字符切换 in_quoted_field,本身不进入缓冲
/// - 分隔符仅在引号外作为字段终止符
/// - 行尾冲刷缓冲作为最后一个字段
fn tokenize_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut buf = String::new();
    let mut in_quoted_field = false;

    for ch in line.chars() {
        if ch == FIELD_QUOTE {
            in_quoted_field = !in_quoted_field;
        } else if ch == FIELD_DELIMITER && !in_quoted_field {
            values.push(flush_field(&buf));
            buf.clear();
        } else {
            buf.push(ch);
        }
    }
    values.push(flush_field(&buf));

    values
}

/// 字段冲刷: 去首尾空白,再剥除一对包裹引号(仅当两端都有)
fn flush_field(buf: &str) -> String {
    let trimmed = buf.trim();

    if trimmed.len() >= 2 {
        if let Some(inner) = trimmed
            .strip_prefix(FIELD_QUOTE)
            .and_then(|s| s.strip_suffix(FIELD_QUOTE))
        {
            return inner.to_string();
        }
    }

    trimmed.to_string()
}

// ==========================================
// StructuredObjectParser - 结构化对象解析
// ==========================================
// 约定: 顶层必须是对象数组;对象值必须是扁平标量,
//       不做展平、不做嵌套路径查找
pub struct StructuredObjectParser;

impl FileParser for StructuredObjectParser {
    fn parse_to_raw_rows(&self, content: &str) -> ImportResult<Vec<RawRow>> {
        let doc: serde_json::Value = serde_json::from_str(content)?;

        let items = doc
            .as_array()
            .ok_or_else(|| ImportError::JsonShapeError("顶层必须是对象数组".to_string()))?;

        let mut rows = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                ImportError::JsonShapeError(format!("第 {} 个元素不是对象", idx + 1))
            })?;

            let mut row = RawRow::with_capacity(obj.len());
            for (key, value) in obj {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    serde_json::Value::Null => String::new(),
                    serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                        return Err(ImportError::JsonShapeError(format!(
                            "字段 {} 含嵌套结构（第 {} 个元素）",
                            key,
                            idx + 1
                        )));
                    }
                };
                row.insert(key.clone(), rendered);
            }

            rows.push(row);
        }

        Ok(rows)
    }
}

// ==========================================
// UniversalFileParser - 按格式选择解析器
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parser_for(format: SourceFormat) -> Box<dyn FileParser> {
        match format {
            SourceFormat::DelimitedText => Box::new(DelimitedTextParser),
            SourceFormat::StructuredObject => Box::new(StructuredObjectParser),
        }
    }

    /// 读取文件并按扩展名解析
    pub fn parse_file<P: AsRef<Path>>(path: P) -> ImportResult<Vec<RawRow>> {
        let (content, format) = read_source(path)?;
        Self::parser_for(format).parse_to_raw_rows(&content)
    }
}
