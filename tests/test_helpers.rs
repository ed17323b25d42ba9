// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时数据库、临时源文件、导入器构建
// ==========================================

#![allow(dead_code)]

use catalog_ingest::config::ImportConfig;
use catalog_ingest::importer::CatalogImporterImpl;
use catalog_ingest::repository::SqliteCatalogRepository;
use std::io::Write;
use tempfile::NamedTempFile;

/// 创建临时测试数据库(schema 由仓储构造时初始化)
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> (NamedTempFile, String) {
    let temp_file = NamedTempFile::new().expect("Failed to create temp db file");
    let db_path = temp_file.path().to_str().unwrap().to_string();
    (temp_file, db_path)
}

/// 创建带扩展名的临时源文件(扩展名决定格式推断)
pub fn write_source_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp source file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp source file");
    file.flush().expect("Failed to flush temp source file");
    file
}

/// 创建测试用的 CatalogImporter 实例(默认组件,无行间延迟)
pub fn create_test_importer(db_path: &str) -> CatalogImporterImpl<SqliteCatalogRepository> {
    let repo =
        SqliteCatalogRepository::new(db_path).expect("Failed to create SqliteCatalogRepository");
    CatalogImporterImpl::with_defaults(repo, ImportConfig::default())
}
