// ==========================================
// 商品目录批量导入系统 - 命令行入口
// ==========================================
// 职责: 文件读取、结果展示、报表落盘(核心管道的外部协作方)
// ==========================================

use anyhow::Context;
use catalog_ingest::importer::report;
use catalog_ingest::importer::{
    read_source, BatchSession, CancelFlag, CatalogImporter, CatalogImporterImpl, ProgressObserver,
};
use catalog_ingest::{
    db, logging, BatchPhase, CatalogRepository, ImportConfig, SqliteCatalogRepository,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Parser)]
#[command(name = "catalog-ingest", version, about = "商品目录批量导入系统")]
struct Cli {
    /// 数据库文件路径(默认用户数据目录)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 导入目录文件(.csv / .json)
    Import {
        /// 源文件路径
        file: PathBuf,

        /// 错误报告输出路径(仅在有失败行时写出)
        #[arg(long, default_value = report::ERROR_REPORT_FILE_NAME)]
        errors_out: PathBuf,

        /// 行间延迟毫秒(让进度可感知,默认不延迟)
        #[arg(long, default_value_t = 0)]
        row_delay_ms: u64,
    },

    /// 生成导入模板 CSV
    Template {
        /// 输出路径
        #[arg(long, default_value = report::TEMPLATE_FILE_NAME)]
        out: PathBuf,
    },

    /// 查看最近批次台账
    History {
        /// 返回条数
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

// 每 10% 打一条进度日志,避免刷屏
struct LogProgressObserver {
    last_logged: AtomicU64,
}

impl LogProgressObserver {
    fn new() -> Self {
        Self {
            last_logged: AtomicU64::new(0),
        }
    }
}

impl ProgressObserver for LogProgressObserver {
    fn on_phase(&self, phase: BatchPhase) {
        info!(phase = ?phase, "批次阶段变更");
    }

    fn on_progress(&self, percent: f64) {
        let bucket = (percent / 10.0) as u64;
        if bucket > self.last_logged.swap(bucket, Ordering::Relaxed) {
            info!(progress = format!("{:.0}%", percent), "处理进度");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let db_path = cli.db.unwrap_or_else(db::default_db_path);

    match cli.command {
        Command::Import {
            file,
            errors_out,
            row_delay_ms,
        } => {
            info!(db = %db_path, file = %file.display(), "开始导入");

            let repo = SqliteCatalogRepository::new(&db_path)?;
            let config = ImportConfig {
                row_delay_ms,
                ..ImportConfig::from_env()
            };
            let preview_rows = config.preview_rows;
            let importer = CatalogImporterImpl::with_defaults(repo, config);

            let (content, format) = read_source(&file)?;
            let session = BatchSession {
                observer: Some(Box::new(LogProgressObserver::new())),
                cancel: CancelFlag::new(),
            };
            let result = importer.import_source(&content, format, &session).await?;

            println!("批次: {}", result.batch_id);
            println!(
                "总行数: {}  成功: {}  失败: {}",
                result.total_rows(),
                result.success_count,
                result.failure_count
            );

            for product in result.preview(preview_rows) {
                println!("  - {} (${:.2}, {})", product.title, product.price, product.category);
            }
            if result.success_count > preview_rows {
                println!("  ... 以及另外 {} 件商品", result.success_count - preview_rows);
            }

            if !result.is_clean() {
                let errors = report::rejection_report(&result)?;
                std::fs::write(&errors_out, errors)
                    .with_context(|| format!("写入错误报告失败: {}", errors_out.display()))?;
                println!("错误报告: {}", errors_out.display());
            }
        }

        Command::Template { out } => {
            let template = report::template()?;
            std::fs::write(&out, template)
                .with_context(|| format!("写入模板失败: {}", out.display()))?;
            println!("模板已生成: {}", out.display());
        }

        Command::History { limit } => {
            let repo = SqliteCatalogRepository::new(&db_path)?;
            let summaries = repo.recent_summaries(limit).await?;

            if summaries.is_empty() {
                println!("暂无批次记录");
            }
            for summary in summaries {
                println!(
                    "{}  {}  总 {}  成功 {}  失败 {}",
                    summary.uploaded_at.format("%Y-%m-%d %H:%M:%S"),
                    summary.batch_id,
                    summary.total,
                    summary.success,
                    summary.failed
                );
            }
        }
    }

    Ok(())
}
