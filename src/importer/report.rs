// ==========================================
// 商品目录批量导入系统 - 报表生成器
// ==========================================
// 职责: BatchResult / 示例模板 → 分隔文本产物
// 红线: 纯文本生产,不做文件系统或网络交付(交付属外部协作方)
// 格式: 逗号分隔,生成侧字段加双引号,\n 行终止,UTF-8
// ==========================================

use crate::domain::batch::BatchResult;
use crate::importer::error::{ImportError, ImportResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// 模板下载文件名
pub const TEMPLATE_FILE_NAME: &str = "products_template.csv";

/// 错误报告下载文件名
pub const ERROR_REPORT_FILE_NAME: &str = "upload_errors.csv";

// 表头保持不带引号: 解析端按原样匹配列名
const TEMPLATE_HEADER: &str = "title,description,price,image_url,category";

// 示例数据行覆盖全部可选字段
const TEMPLATE_ROWS: [[&str; 5]; 5] = [
    [
        "Red Running Shoes",
        "Premium athletic running shoes with cushioning",
        "49.99",
        "https://images.unsplash.com/photo-1542291026-7eec264c27ff",
        "footwear",
    ],
    [
        "Premium Yoga Mat",
        "Non-slip eco-friendly yoga mat 6mm thick",
        "24.99",
        "https://images.unsplash.com/photo-1506126613408-eca07ce68773",
        "fitness",
    ],
    [
        "Wireless Earbuds Pro",
        "Noise-cancelling Bluetooth earbuds 30hr battery",
        "89.99",
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e",
        "electronics",
    ],
    [
        "Winter Parka Jacket",
        "Waterproof insulated jacket rated to -20C",
        "129.99",
        "https://images.unsplash.com/photo-1551028719-00167b16ebc5",
        "apparel",
    ],
    [
        "Running Waist Belt",
        "Lightweight water-resistant belt with pocket",
        "19.99",
        "https://images.unsplash.com/photo-1553062407-98eeb64c6a62",
        "accessories",
    ],
];

/// 渲染批次拒绝明细为两列表格(Row, Error),全字段加引号
pub fn rejection_report(result: &BatchResult) -> ImportResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["Row", "Error"])?;
    for rejection in &result.rejections {
        writer.write_record([rejection.row_index.to_string(), rejection.reason.clone()])?;
    }

    into_string(writer)
}

/// 渲染示例模板: 不带引号的表头 + 全引号示例数据行
pub fn template() -> ImportResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in TEMPLATE_ROWS {
        writer.write_record(row)?;
    }

    let body = into_string(writer)?;
    Ok(format!("{}\n{}", TEMPLATE_HEADER, body))
}

fn into_string(writer: csv::Writer<Vec<u8>>) -> ImportResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::CsvWriteError(e.to_string()))
}
