// ==========================================
// 商品目录批量导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 管道: 解析 → 字段映射 → 校验 → 逐行落库 → 批次结果/报表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    BatchPhase, BatchResult, BatchSummary, CandidateRecord, ProductRecord, ProductStatus,
    RejectionRecord,
};

// 导入管道
pub use importer::{
    BatchSession, CancelFlag, CatalogImporter, CatalogImporterImpl, ImportError, ProgressObserver,
    SourceFormat,
};

// 仓储
pub use repository::{CatalogRepository, RepositoryError, SqliteCatalogRepository};

// 配置
pub use config::ImportConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品目录批量导入系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
