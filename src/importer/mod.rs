// ==========================================
// 商品目录批量导入系统 - 导入层
// ==========================================
// 职责: 外部目录文件导入,生成商品记录与批次结果
// 支持: 分隔文本 (.csv) / 结构化对象 (.json)
// ==========================================

// 模块声明
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod report;
pub mod validator;

// 重导出核心类型
pub use catalog_importer_impl::{CatalogImporterImpl, REASON_STORAGE_WRITE_FAILED};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{CandidateMapper, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
pub use file_parser::{
    read_source, DelimitedTextParser, RawRow, SourceFormat, StructuredObjectParser,
    UniversalFileParser,
};
pub use validator::{
    ProductRuleValidator, REASON_INVALID_PRICE, REASON_MISSING_IMAGE_URL, REASON_MISSING_TITLE,
    REASON_NONPOSITIVE_PRICE,
};

// 重导出 Trait 接口与批次会话
pub use catalog_importer_trait::{
    BatchSession, CancelFlag, CatalogImporter, FieldMapper, FileParser, ProgressObserver,
    RecordValidator,
};
