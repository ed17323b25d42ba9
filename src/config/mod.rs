// ==========================================
// 商品目录批量导入系统 - 配置层
// ==========================================
// 职责: 导入流程的运行参数
// 红线: 配置只影响节奏与展示,不影响校验裁决
// ==========================================

/// 行间延迟环境变量(毫秒)
pub const ROW_DELAY_ENV: &str = "CATALOG_INGEST_ROW_DELAY_MS";

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// 行间延迟(毫秒)
    ///
    /// 仅用于让交互式进度条可感知,0 表示不延迟;
    /// 非交互场景应保持 0
    pub row_delay_ms: u64,

    /// 结果预览行数(已接受商品的前 N 条)
    pub preview_rows: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            row_delay_ms: 0,
            preview_rows: 4,
        }
    }
}

impl ImportConfig {
    /// 从环境变量读取,解析失败回退默认值
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ROW_DELAY_ENV) {
            if let Ok(delay) = raw.trim().parse::<u64>() {
                config.row_delay_ms = delay;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_delay() {
        let config = ImportConfig::default();
        assert_eq!(config.row_delay_ms, 0);
        assert_eq!(config.preview_rows, 4);
    }
}
