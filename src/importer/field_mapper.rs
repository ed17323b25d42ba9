// ==========================================
// 商品目录批量导入系统 - 字段映射器实现
// ==========================================
// 职责: 原始行记录 → CandidateRecord,可选字段默认值在此一次性填充
// 红线: 映射不失败;未知键忽略,缺失键取空串
// ==========================================

use crate::domain::product::CandidateRecord;
use crate::importer::catalog_importer_trait::FieldMapper as FieldMapperTrait;
use crate::importer::file_parser::RawRow;

/// 描述缺省值
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// 分类缺省值
pub const DEFAULT_CATEGORY: &str = "general";

pub struct CandidateMapper;

impl FieldMapperTrait for CandidateMapper {
    fn map_to_candidate(&self, row: &RawRow) -> CandidateRecord {
        CandidateRecord {
            title: self.get(row, "title"),
            description: self.get_or(row, "description", DEFAULT_DESCRIPTION),
            price: self.get(row, "price"),
            image_url: self.get(row, "image_url"),
            category: self.get_or(row, "category", DEFAULT_CATEGORY),
        }
    }
}

impl CandidateMapper {
    /// 必填字段原样提取,缺失取空串(是否致命由校验器裁决)
    fn get(&self, row: &RawRow, key: &str) -> String {
        row.get(key).cloned().unwrap_or_default()
    }

    /// 可选字段提取,空白视同缺失并填充默认值
    fn get_or(&self, row: &RawRow, key: &str, default: &str) -> String {
        match row.get(key) {
            Some(value) if !value.trim().is_empty() => value.clone(),
            _ => default.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_full_row() {
        let mapper = CandidateMapper;
        let candidate = mapper.map_to_candidate(&row(&[
            ("title", "Shoes"),
            ("description", "desc"),
            ("price", "10.00"),
            ("image_url", "http://img"),
            ("category", "footwear"),
        ]));

        assert_eq!(candidate.title, "Shoes");
        assert_eq!(candidate.description, "desc");
        assert_eq!(candidate.price, "10.00");
        assert_eq!(candidate.image_url, "http://img");
        assert_eq!(candidate.category, "footwear");
    }

    #[test]
    fn test_map_defaults_for_optional_fields() {
        let mapper = CandidateMapper;
        let candidate =
            mapper.map_to_candidate(&row(&[("title", "Shoes"), ("price", "10.00")]));

        assert_eq!(candidate.description, DEFAULT_DESCRIPTION);
        assert_eq!(candidate.category, DEFAULT_CATEGORY);
        // 必填字段缺失保持空串,留给校验器裁决
        assert_eq!(candidate.image_url, "");
    }

    #[test]
    fn test_map_blank_optional_treated_as_missing() {
        let mapper = CandidateMapper;
        let candidate = mapper.map_to_candidate(&row(&[
            ("title", "Shoes"),
            ("description", "   "),
            ("category", ""),
        ]));

        assert_eq!(candidate.description, DEFAULT_DESCRIPTION);
        assert_eq!(candidate.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_map_ignores_unknown_keys() {
        let mapper = CandidateMapper;
        let candidate = mapper.map_to_candidate(&row(&[("title", "Shoes"), ("sku", "X-1")]));

        assert_eq!(candidate.title, "Shoes");
    }
}
