// ==========================================
// 商品目录批量导入系统 - 目录仓储 Trait
// ==========================================
// 职责: 定义商品与批次台账数据访问接口(不包含业务逻辑)
// 红线: Repository 不含校验规则,只做数据读写
// 语义: append 为至少一次,不做去重;重试幂等不作保证
// ==========================================

use crate::domain::batch::BatchSummary;
use crate::domain::product::ProductRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 商品与批次台账数据访问
// 实现者: SqliteCatalogRepository(使用 rusqlite)
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // ===== 追加写入 =====

    /// 追加单条商品记录(批次处理器逐行调用)
    async fn append_product(&self, product: &ProductRecord) -> RepositoryResult<()>;

    /// 追加批次台账条目(每次运行写入一条,此后不再修改)
    async fn append_summary(&self, summary: &BatchSummary) -> RepositoryResult<()>;

    // ===== 查询 =====

    /// 查询指定批次的商品记录(按落库顺序)
    async fn products_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<ProductRecord>>;

    /// 查询最近的批次台账条目(按上传时间倒序)
    async fn recent_summaries(&self, limit: usize) -> RepositoryResult<Vec<BatchSummary>>;

    /// 统计商品总数
    async fn count_products(&self) -> RepositoryResult<usize>;
}
