// ==========================================
// 商品目录批量导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod batch;
pub mod product;

// 重导出核心类型
pub use batch::{BatchPhase, BatchResult, BatchSummary, RejectionRecord};
pub use product::{CandidateRecord, ProductRecord, ProductStatus};
