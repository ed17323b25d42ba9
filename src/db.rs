// ==========================================
// 商品目录批量导入系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout,减少并发写入时的偶发 busy 错误
// - schema 创建幂等,重复初始化不破坏已有数据
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 数据库路径环境变量(便于调试/测试/CI)
pub const DB_PATH_ENV: &str = "CATALOG_INGEST_DB_PATH";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化 schema(幂等)
///
/// 两张追加写入表:
/// - product: 已提交商品记录
/// - upload_batch: 批次台账
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS product (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            description TEXT NOT NULL,
            price       REAL NOT NULL,
            image_url   TEXT NOT NULL,
            category    TEXT NOT NULL,
            created_at  TEXT NOT NULL,
            batch_id    TEXT NOT NULL,
            status      TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_product_batch ON product(batch_id);

        CREATE TABLE IF NOT EXISTS upload_batch (
            batch_id    TEXT PRIMARY KEY,
            uploaded_at TEXT NOT NULL,
            total       INTEGER NOT NULL,
            success     INTEGER NOT NULL,
            failed      INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_upload_batch_time ON upload_batch(uploaded_at);
        "#,
    )?;
    Ok(())
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 CATALOG_INGEST_DB_PATH 优先
/// - 其次 用户数据目录/catalog-ingest/catalog_ingest.db
/// - 兜底 ./catalog_ingest.db
pub fn default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./catalog_ingest.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("catalog-ingest");
        // best-effort: 目录创建失败则退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("catalog_ingest.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_default_db_path_ends_with_db() {
        let path = default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }
}
