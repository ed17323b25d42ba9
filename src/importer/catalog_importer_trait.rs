// ==========================================
// 商品目录批量导入系统 - 导入接口定义
// ==========================================
// 职责: 定义导入管道各阶段接口与批次会话(不包含实现)
// 流程: 解析 → 字段映射 → 校验 → 逐行落库 → 批次结果
// ==========================================

use crate::domain::batch::{BatchPhase, BatchResult, RejectionRecord};
use crate::domain::product::CandidateRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, SourceFormat};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ==========================================
// CatalogImporter Trait
// ==========================================
// 用途: 批次导入主接口
// 实现者: CatalogImporterImpl
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// 从文件导入(扩展名推断格式,默认会话)
    ///
    /// # 返回
    /// - Ok(BatchResult): 批次结果(接受/拒绝按行分区)
    /// - Err: 文件读取错误、格式不支持、解析失败、台账写入失败
    async fn import_from_path<P: AsRef<Path> + Send>(
        &self,
        path: P,
    ) -> Result<BatchResult, ImportError>;

    /// 从已读文本导入,携带批次会话(进度观察者/取消标志)
    ///
    /// # 参数
    /// - content: 完整文件文本
    /// - format: 输入格式标识
    /// - session: 批次会话,每个批次独立持有
    async fn import_source(
        &self,
        content: &str,
        format: SourceFormat,
        session: &BatchSession,
    ) -> Result<BatchResult, ImportError>;

    /// 批量导入多个文件(并发执行,每个文件一个独立批次)
    ///
    /// # 说明
    /// - 每个文件的导入互不影响,单个失败不影响其他文件
    /// - 批次内部仍严格按行序处理
    async fn import_many<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: Vec<P>,
    ) -> Result<Vec<Result<BatchResult, String>>, ImportError>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口(阶段 0)
// 实现者: DelimitedTextParser, StructuredObjectParser
pub trait FileParser: Send + Sync {
    /// 解析原始文本为有序行记录(列名 → 原始值)
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表,保持输入顺序
    /// - Err: 格式错误(整批中止,不产生 BatchResult)
    fn parse_to_raw_rows(&self, content: &str) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口(阶段 1)
// 实现者: CandidateMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 CandidateRecord
    ///
    /// 映射不失败: 缺失键取空串,可选字段在此填充默认值;
    /// 必填字段缺失在校验阶段才成为拒绝原因
    fn map_to_candidate(&self, row: &RawRow) -> CandidateRecord;
}

// ==========================================
// RecordValidator Trait
// ==========================================
// 用途: 单条记录校验接口(阶段 2)
// 实现者: ProductRuleValidator
pub trait RecordValidator: Send + Sync {
    /// 按固定顺序应用规则,首个失败即短路
    ///
    /// # 参数
    /// - record: 候选记录
    /// - position: 0 基行位置(数据行)
    ///
    /// # 返回
    /// - Ok(f64): 通过,携带解析后的价格
    /// - Err(RejectionRecord): 拒绝,行号为 1 基
    ///
    /// # 约束
    /// - 规则是记录与行位置的纯函数,不读时钟、不读存储
    fn validate(&self, record: &CandidateRecord, position: usize)
        -> Result<f64, RejectionRecord>;
}

// ==========================================
// ProgressObserver Trait
// ==========================================
// 用途: 批次进度观察接口,缺席不影响正确性
pub trait ProgressObserver: Send + Sync {
    /// 阶段变更通知
    fn on_phase(&self, _phase: BatchPhase) {}

    /// 进度更新(0..=100,单批次内单调不减)
    fn on_progress(&self, percent: f64);
}

// ==========================================
// CancelFlag - 批次取消标志
// ==========================================
// 约定: 仅在行间检查;已落库的行保持不变,
//       取消不是回滚,而是提前收尾并返回部分结果
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ==========================================
// BatchSession - 单批次会话
// ==========================================
// 约定: 每个批次独立持有,进度计数与取消标志不跨批次共享
#[derive(Default)]
pub struct BatchSession {
    pub observer: Option<Box<dyn ProgressObserver>>,
    pub cancel: CancelFlag,
}

impl BatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Box<dyn ProgressObserver>) -> Self {
        Self {
            observer: Some(observer),
            cancel: CancelFlag::new(),
        }
    }

    pub(crate) fn emit_phase(&self, phase: BatchPhase) {
        if let Some(observer) = &self.observer {
            observer.on_phase(phase);
        }
    }

    pub(crate) fn emit_progress(&self, percent: f64) {
        if let Some(observer) = &self.observer {
            observer.on_progress(percent);
        }
    }
}
