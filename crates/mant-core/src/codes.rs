//! 文件流水號
//!
//! 工單：`OT-{園所}-{前綴}{nnn}`，付款報告：`IP-{園所}-{前綴}{nn}`，
//! 每個園所 + 前綴各自編號。

use serde::{Deserialize, Serialize};

/// 文件種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    /// 工單
    WorkOrder,
    /// 付款報告
    PaymentReport,
}

impl DocumentKind {
    /// 編號標籤
    pub fn tag(self) -> &'static str {
        match self {
            DocumentKind::WorkOrder => "OT",
            DocumentKind::PaymentReport => "IP",
        }
    }

    /// 流水號補零寬度
    pub fn width(self) -> usize {
        match self {
            DocumentKind::WorkOrder => 3,
            DocumentKind::PaymentReport => 2,
        }
    }

    /// 編號共用前段，如 `OT-J101-A`
    pub fn code_prefix(self, garden_code: &str, correlative_prefix: &str) -> String {
        format!("{}-{}-{}", self.tag(), garden_code, correlative_prefix)
    }
}

/// 依既有編號產生下一個編號
///
/// 只看符合同一前段的編號；後綴不是數字者視為 0。
pub fn next_document_code<'a, I>(
    kind: DocumentKind,
    garden_code: &str,
    correlative_prefix: &str,
    existing_codes: I,
) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = kind.code_prefix(garden_code, correlative_prefix);

    let last = existing_codes
        .into_iter()
        .filter_map(|code| code.strip_prefix(prefix.as_str()))
        .map(leading_number)
        .max()
        .unwrap_or(0);

    format!("{}{:0width$}", prefix, last + 1, width = kind.width())
}

fn leading_number(suffix: &str) -> u64 {
    let digits_end = suffix
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(suffix.len());
    suffix[..digits_end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_codes() {
        let none: Vec<&str> = Vec::new();
        assert_eq!(
            next_document_code(DocumentKind::WorkOrder, "J101", "A", none.clone()),
            "OT-J101-A001"
        );
        assert_eq!(
            next_document_code(DocumentKind::PaymentReport, "J101", "A", none),
            "IP-J101-A01"
        );
    }

    #[test]
    fn test_next_code_uses_highest_suffix_per_garden() {
        let existing = [
            "OT-J101-A001",
            "OT-J101-A007",
            "OT-J101-A003",
            "OT-J202-A042",
            "IP-J101-A09",
        ];
        assert_eq!(
            next_document_code(DocumentKind::WorkOrder, "J101", "A", existing),
            "OT-J101-A008"
        );
        assert_eq!(
            next_document_code(DocumentKind::PaymentReport, "J101", "A", existing),
            "IP-J101-A10"
        );
    }

    #[test]
    fn test_number_grows_past_width() {
        let existing = ["IP-J1--99"];
        assert_eq!(
            next_document_code(DocumentKind::PaymentReport, "J1", "-", existing),
            "IP-J1--100"
        );
    }

    #[test]
    fn test_non_numeric_suffix_counts_as_zero() {
        let existing = ["OT-J101-AX12"];
        assert_eq!(
            next_document_code(DocumentKind::WorkOrder, "J101", "A", existing),
            "OT-J101-A001"
        );
    }
}
