// ==========================================
// 商品目录批量导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分层: 此处只定义批次级(致命)错误;
//       行级校验失败作为数据记入 RejectionRecord,不走错误通道
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 结构化输入错误(整批中止) =====
    #[error("JSON 解析失败: {0}")]
    JsonParseError(String),

    #[error("JSON 结构错误: {0}")]
    JsonShapeError(String),

    // ===== 报表生成错误 =====
    #[error("CSV 生成失败: {0}")]
    CsvWriteError(String),

    // ===== 存储错误 =====
    #[error("存储失败: {0}")]
    StorageError(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::JsonParseError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
