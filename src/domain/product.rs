// ==========================================
// 商品目录批量导入系统 - 商品领域模型
// ==========================================
// 职责: 定义候选记录与已提交商品实体
// 红线: ProductRecord 一经创建不可变,管道内无原地修改
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// CandidateRecord - 校验前的规范化输入
// ==========================================
// 用途: 解析/映射产物,校验器输入
// 生命周期: 仅在导入流程内
// 约定: 可选字段的默认值在字段映射阶段一次性填充,
//       此后不再携带开放式键值映射
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub title: String,
    pub description: String, // 缺省时已填充 "No description"
    pub price: String,       // 原始字符串,尚未解析
    pub image_url: String,
    pub category: String,    // 缺省时已填充 "general"
}

// ==========================================
// ProductRecord - 已提交商品实体
// ==========================================
// 不变式: 仅当对应 CandidateRecord 通过全部校验规则时存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String, // 批次内唯一: product_{batch_id}_{行序号}
    pub title: String,
    pub description: String,
    pub price: f64, // 严格大于 0
    pub image_url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub batch_id: String,
    pub status: ProductStatus, // 创建时固定为 Active
}

// ==========================================
// ProductStatus - 商品状态枚举
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "active" => Some(ProductStatus::Active),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_status_roundtrip() {
        assert_eq!(ProductStatus::parse("active"), Some(ProductStatus::Active));
        assert_eq!(ProductStatus::Active.as_str(), "active");
        assert_eq!(ProductStatus::parse("archived"), None);
    }

    #[test]
    fn test_product_status_serde_lowercase() {
        let json = serde_json::to_string(&ProductStatus::Active).unwrap();
        assert_eq!(json, r#""active""#);
    }
}
