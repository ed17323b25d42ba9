// ==========================================
// 商品目录批量导入系统 - 批次处理器实现
// ==========================================
// 职责: 驱动 解析 → 映射 → 校验 → 逐行落库 全流程
// 约定: 行严格按输入顺序处理(行号与结果预览依赖顺序);
//       接受行立即落库(write-as-you-go),中断时已提交部分可用
// ==========================================

use crate::config::ImportConfig;
use crate::domain::batch::{BatchPhase, BatchResult, BatchSummary, RejectionRecord};
use crate::domain::product::{ProductRecord, ProductStatus};
use crate::importer::catalog_importer_trait::{
    BatchSession, CatalogImporter, FieldMapper, RecordValidator,
};
use crate::importer::error::ImportError;
use crate::importer::file_parser::{read_source, SourceFormat, UniversalFileParser};
use crate::repository::CatalogRepository;
use chrono::Utc;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 存储写入失败的行级拒绝原因
///
/// 同步落库失败不丢行,按拒绝重分类,保持
/// success + failure == 已处理行数 的分区不变式
pub const REASON_STORAGE_WRITE_FAILED: &str = "storage write failed";

// ==========================================
// CatalogImporterImpl - 批次处理器
// ==========================================
pub struct CatalogImporterImpl<R>
where
    R: CatalogRepository,
{
    // 数据访问层
    repo: R,

    // 导入组件
    field_mapper: Box<dyn FieldMapper>,
    validator: Box<dyn RecordValidator>,

    // 导入配置
    config: ImportConfig,
}

impl<R> CatalogImporterImpl<R>
where
    R: CatalogRepository,
{
    /// 创建新的 CatalogImporter 实例
    ///
    /// # 参数
    /// - repo: 商品/批次台账仓储
    /// - field_mapper: 字段映射器
    /// - validator: 记录校验器
    /// - config: 导入配置
    pub fn new(
        repo: R,
        field_mapper: Box<dyn FieldMapper>,
        validator: Box<dyn RecordValidator>,
        config: ImportConfig,
    ) -> Self {
        Self {
            repo,
            field_mapper,
            validator,
            config,
        }
    }

    /// 以默认组件创建(标准映射器 + 商品规则校验器)
    pub fn with_defaults(repo: R, config: ImportConfig) -> Self {
        Self::new(
            repo,
            Box::new(crate::importer::field_mapper::CandidateMapper),
            Box::new(crate::importer::validator::ProductRuleValidator),
            config,
        )
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[async_trait::async_trait]
impl<R> CatalogImporter for CatalogImporterImpl<R>
where
    R: CatalogRepository + Send + Sync,
{
    async fn import_from_path<P: AsRef<Path> + Send>(
        &self,
        path: P,
    ) -> Result<BatchResult, ImportError> {
        let path = path.as_ref();
        let start_time = std::time::Instant::now();

        let (content, format) = read_source(path)?;
        info!(file = %path.display(), format = ?format, "读取源文件完成");

        let result = self
            .import_source(&content, format, &BatchSession::new())
            .await?;

        info!(
            batch_id = %result.batch_id,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "文件导入完成"
        );
        Ok(result)
    }

    #[instrument(skip(self, content, session), fields(batch_id = tracing::field::Empty))]
    async fn import_source(
        &self,
        content: &str,
        format: SourceFormat,
        session: &BatchSession,
    ) -> Result<BatchResult, ImportError> {
        // === 阶段 1: 解析(失败则整批中止) ===
        session.emit_phase(BatchPhase::Parsing);
        let rows = match UniversalFileParser::parser_for(format).parse_to_raw_rows(content) {
            Ok(rows) => rows,
            Err(e) => {
                session.emit_phase(BatchPhase::Aborted);
                error!(error = %e, "源文件解析失败,批次中止");
                return Err(e);
            }
        };

        let total_rows = rows.len();
        info!(total_rows, "解析完成");

        // === 阶段 2: 逐行校验与落库 ===
        // 批次 ID 在进入校验阶段时生成(随机 UUID,避免时钟碰撞)
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        session.emit_phase(BatchPhase::Validating);

        let mut accepted: Vec<ProductRecord> = Vec::new();
        let mut rejections: Vec<RejectionRecord> = Vec::new();
        let mut processed = 0usize;

        for (position, row) in rows.into_iter().enumerate() {
            // 取消只在行间生效;已落库的行保持提交
            if session.cancel.is_cancelled() {
                warn!(batch_id = %batch_id, processed, "批次被取消,返回部分结果");
                break;
            }

            let candidate = self.field_mapper.map_to_candidate(&row);

            match self.validator.validate(&candidate, position) {
                Ok(price) => {
                    let product = ProductRecord {
                        id: format!("product_{}_{}", batch_id, position),
                        title: candidate.title,
                        description: candidate.description,
                        price,
                        image_url: candidate.image_url,
                        category: candidate.category,
                        created_at: Utc::now(),
                        batch_id: batch_id.clone(),
                        status: ProductStatus::Active,
                    };

                    // 逐行落库
                    match self.repo.append_product(&product).await {
                        Ok(()) => accepted.push(product),
                        Err(e) => {
                            warn!(row = position + 1, error = %e, "商品写入失败,该行按拒绝处理");
                            rejections.push(RejectionRecord::new(
                                position + 1,
                                REASON_STORAGE_WRITE_FAILED,
                            ));
                        }
                    }
                }
                Err(rejection) => {
                    debug!(row = rejection.row_index, reason = %rejection.reason, "行校验未通过");
                    rejections.push(rejection);
                }
            }

            processed += 1;
            session.emit_progress(processed as f64 / total_rows as f64 * 100.0);

            // 行间延迟仅服务于进度可感知性,无正确性作用
            if self.config.row_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.row_delay_ms)).await;
            }
        }

        // === 阶段 3: 汇总 ===
        let result = BatchResult {
            batch_id: batch_id.clone(),
            success_count: accepted.len(),
            failure_count: rejections.len(),
            accepted,
            rejections,
        };

        // 台账条目一次写入;取消的批次也记录部分统计
        let summary = BatchSummary {
            batch_id,
            uploaded_at: Utc::now(),
            total: processed,
            success: result.success_count,
            failed: result.failure_count,
        };
        self.repo.append_summary(&summary).await?;

        session.emit_phase(BatchPhase::Completed);
        info!(
            batch_id = %result.batch_id,
            total = processed,
            success = result.success_count,
            failed = result.failure_count,
            "批次处理完成"
        );

        Ok(result)
    }

    async fn import_many<P: AsRef<Path> + Send + Sync>(
        &self,
        paths: Vec<P>,
    ) -> Result<Vec<Result<BatchResult, String>>, ImportError> {
        use futures::future::join_all;

        info!(count = paths.len(), "开始批量导入文件");

        let import_tasks = paths.into_iter().map(|path| {
            let path_str = path.as_ref().to_string_lossy().to_string();
            async move {
                match self.import_from_path(path).await {
                    Ok(result) => {
                        info!(
                            file = %path_str,
                            success = result.success_count,
                            failed = result.failure_count,
                            "文件导入成功"
                        );
                        Ok(result)
                    }
                    Err(e) => {
                        error!(file = %path_str, error = %e, "文件导入失败");
                        Err(format!("文件 {} 导入失败: {}", path_str, e))
                    }
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        Ok(results)
    }
}
