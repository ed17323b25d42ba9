// ==========================================
// 商品目录批量导入系统 - 目录仓储实现
// ==========================================
// 职责: 实现商品/批次台账数据访问(使用 rusqlite)
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

use crate::db;
use crate::domain::batch::BatchSummary;
use crate::domain::product::{ProductRecord, ProductStatus};
use crate::repository::catalog_repo::CatalogRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// SqliteCatalogRepository
// ==========================================
pub struct SqliteCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogRepository {
    /// 创建新的 Repository 实例并初始化 schema
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        db::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProductRecord> {
        let status_raw: String = row.get(8)?;
        let status = ProductStatus::parse(&status_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                format!("未知商品状态: {}", status_raw).into(),
            )
        })?;

        Ok(ProductRecord {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            price: row.get(3)?,
            image_url: row.get(4)?,
            category: row.get(5)?,
            created_at: row.get::<_, DateTime<Utc>>(6)?,
            batch_id: row.get(7)?,
            status,
        })
    }
}

#[async_trait]
impl CatalogRepository for SqliteCatalogRepository {
    async fn append_product(&self, product: &ProductRecord) -> RepositoryResult<()> {
        let conn = self.lock()?;

        // 至少一次语义: 重放同一记录按主键覆盖,不产生重复行
        conn.execute(
            r#"
            INSERT OR REPLACE INTO product (
                id, title, description, price, image_url,
                category, created_at, batch_id, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                product.id,
                product.title,
                product.description,
                product.price,
                product.image_url,
                product.category,
                product.created_at,
                product.batch_id,
                product.status.as_str(),
            ],
        )?;

        Ok(())
    }

    async fn append_summary(&self, summary: &BatchSummary) -> RepositoryResult<()> {
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT OR REPLACE INTO upload_batch (
                batch_id, uploaded_at, total, success, failed
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                summary.batch_id,
                summary.uploaded_at,
                summary.total as i64,
                summary.success as i64,
                summary.failed as i64,
            ],
        )?;

        Ok(())
    }

    async fn products_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<ProductRecord>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, title, description, price, image_url,
                   category, created_at, batch_id, status
            FROM product
            WHERE batch_id = ?1
            ORDER BY rowid
            "#,
        )?;

        let products = stmt
            .query_map(params![batch_id], Self::row_to_product)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(products)
    }

    async fn recent_summaries(&self, limit: usize) -> RepositoryResult<Vec<BatchSummary>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, uploaded_at, total, success, failed
            FROM upload_batch
            ORDER BY uploaded_at DESC
            LIMIT ?1
            "#,
        )?;

        let summaries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(BatchSummary {
                    batch_id: row.get(0)?,
                    uploaded_at: row.get::<_, DateTime<Utc>>(1)?,
                    total: row.get::<_, i64>(2)? as usize,
                    success: row.get::<_, i64>(3)? as usize,
                    failed: row.get::<_, i64>(4)? as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(summaries)
    }

    async fn count_products(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
