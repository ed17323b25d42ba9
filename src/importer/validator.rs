// ==========================================
// 商品目录批量导入系统 - 记录校验器实现
// ==========================================
// 职责: 按固定顺序应用业务规则,首个失败即短路
// 红线: 规则是纯函数,不读时钟、不读存储;同样输入必得同样裁决
// ==========================================

use crate::domain::batch::RejectionRecord;
use crate::domain::product::CandidateRecord;
use crate::importer::catalog_importer_trait::RecordValidator;

/// 规则 1: 标题缺失
pub const REASON_MISSING_TITLE: &str = "Missing product title";

/// 规则 2: 价格无法解析
pub const REASON_INVALID_PRICE: &str = "Invalid price (must be a number)";

/// 规则 3: 图片地址缺失
pub const REASON_MISSING_IMAGE_URL: &str = "Missing image URL";

/// 规则 4: 价格非正
pub const REASON_NONPOSITIVE_PRICE: &str = "Price must be greater than 0";

// ==========================================
// ProductRuleValidator - 商品规则校验
// ==========================================
// 策略: 每行至多一条拒绝原因(首个失败规则胜出),
//       与批次统计口径保持一致
pub struct ProductRuleValidator;

impl RecordValidator for ProductRuleValidator {
    fn validate(
        &self,
        record: &CandidateRecord,
        position: usize,
    ) -> Result<f64, RejectionRecord> {
        let row_index = position + 1;

        // 规则 1: 标题非空白
        if record.title.trim().is_empty() {
            return Err(RejectionRecord::new(row_index, REASON_MISSING_TITLE));
        }

        // 规则 2: 价格可解析为有限小数
        let price = match record.price.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => parsed,
            _ => return Err(RejectionRecord::new(row_index, REASON_INVALID_PRICE)),
        };

        // 规则 3: 图片地址非空白
        if record.image_url.trim().is_empty() {
            return Err(RejectionRecord::new(row_index, REASON_MISSING_IMAGE_URL));
        }

        // 规则 4: 价格严格大于 0
        if price <= 0.0 {
            return Err(RejectionRecord::new(row_index, REASON_NONPOSITIVE_PRICE));
        }

        Ok(price)
    }
}
