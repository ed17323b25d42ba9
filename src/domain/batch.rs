// ==========================================
// 商品目录批量导入系统 - 批次领域模型
// ==========================================
// 职责: 定义批次结果、拒绝记录、批次台账条目
// 不变式: success_count + failure_count == 已处理行数,
//         accepted 与 rejections 对输入行无重叠、无遗漏
// ==========================================

use crate::domain::product::ProductRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RejectionRecord - 单行拒绝记录
// ==========================================
// 约定: 每行至多一条(首个失败规则即短路)
// reason 只携带规则文案,行号前缀属于展示层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionRecord {
    pub row_index: usize, // 1 基,仅计数据行(表头除外)
    pub reason: String,
}

impl RejectionRecord {
    pub fn new(row_index: usize, reason: impl Into<String>) -> Self {
        Self {
            row_index,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RejectionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row_index, self.reason)
    }
}

// ==========================================
// BatchPhase - 批次处理阶段
// ==========================================
// 状态机: Idle → Parsing → Validating → Completed
//         Parsing → Aborted (解析失败,全有或全无)
// 说明: 行级校验失败不进入 Aborted,只记入 rejections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchPhase {
    Idle,
    Parsing,
    Validating,
    Completed,
    Aborted,
}

// ==========================================
// BatchResult - 单次运行的终态产物
// ==========================================
// 生命周期: 处理结束时创建一次,不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub batch_id: String,
    pub success_count: usize,
    pub failure_count: usize,
    pub accepted: Vec<ProductRecord>,     // 按输入行序
    pub rejections: Vec<RejectionRecord>, // 按输入行序
}

impl BatchResult {
    /// 已处理总行数(取消的批次只覆盖已处理部分)
    pub fn total_rows(&self) -> usize {
        self.success_count + self.failure_count
    }

    /// 是否全部通过
    pub fn is_clean(&self) -> bool {
        self.failure_count == 0
    }

    /// 前 N 条已接受商品(输入行序,用于结果预览)
    pub fn preview(&self, n: usize) -> &[ProductRecord] {
        &self.accepted[..self.accepted.len().min(n)]
    }
}

// ==========================================
// BatchSummary - 批次台账条目
// ==========================================
// 用途: 每次运行写入一条,追加进批次台账,此后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub uploaded_at: DateTime<Utc>,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}
