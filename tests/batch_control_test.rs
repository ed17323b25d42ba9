// ==========================================
// 批次处理器控制面测试
// ==========================================
// 测试目标: 阶段序列、进度单调性、取消语义、存储失败重分类
// ==========================================

mod test_helpers;

use catalog_ingest::domain::batch::{BatchPhase, BatchSummary};
use catalog_ingest::domain::product::ProductRecord;
use catalog_ingest::importer::{
    BatchSession, CancelFlag, CatalogImporter, CatalogImporterImpl, ImportError, ProgressObserver,
    SourceFormat, REASON_STORAGE_WRITE_FAILED,
};
use catalog_ingest::logging;
use catalog_ingest::repository::{CatalogRepository, RepositoryError, RepositoryResult};
use catalog_ingest::ImportConfig;
use std::sync::{Arc, Mutex};
use test_helpers::{create_test_db, create_test_importer};

// ==========================================
// RecordingObserver - 记录阶段与进度,可按阈值触发取消
// ==========================================
struct RecordingObserver {
    progress: Arc<Mutex<Vec<f64>>>,
    phases: Arc<Mutex<Vec<BatchPhase>>>,
    cancel_at: Option<f64>,
    cancel: CancelFlag,
}

impl ProgressObserver for RecordingObserver {
    fn on_phase(&self, phase: BatchPhase) {
        self.phases.lock().unwrap().push(phase);
    }

    fn on_progress(&self, percent: f64) {
        self.progress.lock().unwrap().push(percent);
        if let Some(threshold) = self.cancel_at {
            if percent >= threshold {
                self.cancel.cancel();
            }
        }
    }
}

fn recording_session(
    cancel_at: Option<f64>,
) -> (BatchSession, Arc<Mutex<Vec<f64>>>, Arc<Mutex<Vec<BatchPhase>>>) {
    let progress = Arc::new(Mutex::new(Vec::new()));
    let phases = Arc::new(Mutex::new(Vec::new()));
    let cancel = CancelFlag::new();

    let observer = RecordingObserver {
        progress: progress.clone(),
        phases: phases.clone(),
        cancel_at,
        cancel: cancel.clone(),
    };

    let session = BatchSession {
        observer: Some(Box::new(observer)),
        cancel,
    };

    (session, progress, phases)
}

fn csv_with_rows(n: usize) -> String {
    let mut content = String::from("title,price,image_url\n");
    for i in 0..n {
        content.push_str(&format!("\"Item {}\",\"1.50\",\"http://img/{}\"\n", i, i));
    }
    content
}

#[tokio::test]
async fn test_phase_sequence_and_monotonic_progress() {
    logging::init_test();

    let (_temp_db, db_path) = create_test_db();
    let importer = create_test_importer(&db_path);
    let (session, progress, phases) = recording_session(None);

    let result = importer
        .import_source(&csv_with_rows(10), SourceFormat::DelimitedText, &session)
        .await
        .unwrap();

    assert_eq!(result.total_rows(), 10);
    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            BatchPhase::Parsing,
            BatchPhase::Validating,
            BatchPhase::Completed
        ]
    );

    let progress = progress.lock().unwrap();
    assert_eq!(progress.len(), 10);
    // 单批次内单调不减,收尾到 100
    for window in progress.windows(2) {
        assert!(window[1] >= window[0]);
    }
    assert_eq!(*progress.last().unwrap(), 100.0);
    assert!(progress.iter().all(|p| (0.0..=100.0).contains(p)));
}

#[tokio::test]
async fn test_parse_failure_aborts_without_validating_phase() {
    logging::init_test();

    let (_temp_db, db_path) = create_test_db();
    let importer = create_test_importer(&db_path);
    let (session, progress, phases) = recording_session(None);

    let result = importer
        .import_source("not json", SourceFormat::StructuredObject, &session)
        .await;

    assert!(matches!(result, Err(ImportError::JsonParseError(_))));
    assert_eq!(
        *phases.lock().unwrap(),
        vec![BatchPhase::Parsing, BatchPhase::Aborted]
    );
    assert!(progress.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_returns_partial_result() {
    logging::init_test();

    let (_temp_db, db_path) = create_test_db();
    let importer = create_test_importer(&db_path);

    // 第 3 行处理完(进度 30%)后触发取消
    let (session, progress, _phases) = recording_session(Some(30.0));

    let result = importer
        .import_source(&csv_with_rows(10), SourceFormat::DelimitedText, &session)
        .await
        .unwrap();

    // 部分结果只覆盖已处理的 3 行
    assert_eq!(result.total_rows(), 3);
    assert_eq!(result.success_count + result.failure_count, 3);

    // 进度不超过最后完成行的百分比
    let max_progress = progress
        .lock()
        .unwrap()
        .iter()
        .cloned()
        .fold(0.0_f64, f64::max);
    assert!(max_progress <= 30.01);

    // 已落库的行保持提交(取消不是回滚)
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let committed: i64 = conn
        .query_row("SELECT COUNT(*) FROM product", [], |row| row.get(0))
        .unwrap();
    assert_eq!(committed, 3);

    // 取消的批次也写台账,记录部分统计
    let total: i64 = conn
        .query_row(
            "SELECT total FROM upload_batch WHERE batch_id = ?1",
            [&result.batch_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn test_empty_input_completes_cleanly() {
    logging::init_test();

    let (_temp_db, db_path) = create_test_db();
    let importer = create_test_importer(&db_path);
    let (session, progress, phases) = recording_session(None);

    let result = importer
        .import_source("", SourceFormat::DelimitedText, &session)
        .await
        .unwrap();

    assert_eq!(result.total_rows(), 0);
    assert!(progress.lock().unwrap().is_empty());
    assert_eq!(
        *phases.lock().unwrap(),
        vec![
            BatchPhase::Parsing,
            BatchPhase::Validating,
            BatchPhase::Completed
        ]
    );
}

// ==========================================
// FlakyRepository - 注入存储失败的内存仓储
// ==========================================
#[derive(Default)]
struct FlakyRepository {
    products: Mutex<Vec<ProductRecord>>,
    summaries: Mutex<Vec<BatchSummary>>,
}

#[async_trait::async_trait]
impl CatalogRepository for FlakyRepository {
    async fn append_product(&self, product: &ProductRecord) -> RepositoryResult<()> {
        if product.title == "poison" {
            return Err(RepositoryError::DatabaseQueryError("disk full".to_string()));
        }
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn append_summary(&self, summary: &BatchSummary) -> RepositoryResult<()> {
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }

    async fn products_by_batch(&self, batch_id: &str) -> RepositoryResult<Vec<ProductRecord>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.batch_id == batch_id)
            .cloned()
            .collect())
    }

    async fn recent_summaries(&self, limit: usize) -> RepositoryResult<Vec<BatchSummary>> {
        let summaries = self.summaries.lock().unwrap();
        Ok(summaries.iter().rev().take(limit).cloned().collect())
    }

    async fn count_products(&self) -> RepositoryResult<usize> {
        Ok(self.products.lock().unwrap().len())
    }
}

#[tokio::test]
async fn test_storage_failure_reclassifies_row_as_rejected() {
    logging::init_test();

    let importer =
        CatalogImporterImpl::with_defaults(FlakyRepository::default(), ImportConfig::default());

    let content = "title,price,image_url\n\
                   \"Shoes\",\"10.00\",\"http://img\"\n\
                   \"poison\",\"5.00\",\"http://img2\"\n\
                   \"Mat\",\"24.99\",\"http://img3\"\n";

    let result = importer
        .import_source(content, SourceFormat::DelimitedText, &BatchSession::new())
        .await
        .unwrap();

    // 写失败的行不丢,按拒绝重分类,分区不变式保持
    assert_eq!(result.total_rows(), 3);
    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 1);
    assert_eq!(result.rejections[0].row_index, 2);
    assert_eq!(result.rejections[0].reason, REASON_STORAGE_WRITE_FAILED);

    // 仓储中只有成功提交的两行
    assert_eq!(importer.repository().count_products().await.unwrap(), 2);
}
