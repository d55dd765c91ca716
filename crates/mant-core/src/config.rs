//! 計算引擎與合約配置

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rounding::AMOUNT_DECIMALS;
use crate::{MantError, Result};

/// 計算引擎參數
///
/// 所有費率以小數表示（0.19 = 19%）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 每日固定罰款（貨幣單位）
    pub fixed_daily_penalty: Decimal,

    /// 利潤率（以淨額計）
    pub profit_rate: Decimal,

    /// 增值稅率（以淨額 + 利潤計）
    pub vat_rate: Decimal,

    /// 追加工期上限（基本工期的比例）
    pub max_extra_term_ratio: Decimal,

    /// 金額小數位數
    pub amount_decimals: u32,
}

impl EngineConfig {
    /// 建構器模式：設置每日固定罰款
    pub fn with_fixed_daily_penalty(mut self, amount: Decimal) -> Self {
        self.fixed_daily_penalty = amount;
        self
    }

    /// 建構器模式：設置利潤率
    pub fn with_profit_rate(mut self, rate: Decimal) -> Self {
        self.profit_rate = rate;
        self
    }

    /// 建構器模式：設置增值稅率
    pub fn with_vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = rate;
        self
    }

    /// 建構器模式：設置追加工期上限比例
    pub fn with_max_extra_term_ratio(mut self, ratio: Decimal) -> Self {
        self.max_extra_term_ratio = ratio;
        self
    }

    /// 從 JSON 載入（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("fixed_daily_penalty", self.fixed_daily_penalty),
            ("profit_rate", self.profit_rate),
            ("vat_rate", self.vat_rate),
            ("max_extra_term_ratio", self.max_extra_term_ratio),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(MantError::Config(format!("{} 不可為負數: {}", name, value)));
            }
        }

        if self.max_extra_term_ratio > Decimal::ONE {
            return Err(MantError::Config(format!(
                "max_extra_term_ratio 不可大於 1: {}",
                self.max_extra_term_ratio
            )));
        }

        if self.amount_decimals > 8 {
            return Err(MantError::Config(format!(
                "amount_decimals 過大: {}",
                self.amount_decimals
            )));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_daily_penalty: dec!(7500),
            profit_rate: dec!(0.25),
            vat_rate: dec!(0.19),
            max_extra_term_ratio: dec!(0.5),
            amount_decimals: AMOUNT_DECIMALS,
        }
    }
}

/// 合約配置（文件抬頭與流水號前綴）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// 文件標題
    pub title: String,

    /// 承包商
    pub contractor: String,

    /// 監工（ITO）姓名
    pub inspector_name: String,

    /// 工單/付款報告流水號前綴
    pub correlative_prefix: String,
}

impl ContractConfig {
    /// 從 JSON 載入，空白標題回退為預設值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.title.trim().is_empty() {
            config.title = Self::default().title;
        }
        Ok(config)
    }

    /// 建構器模式：設置流水號前綴
    pub fn with_correlative_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.correlative_prefix = prefix.into();
        self
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            title: "FLAD".to_string(),
            contractor: String::new(),
            inspector_name: String::new(),
            correlative_prefix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_config() {
        let config = EngineConfig::default();
        assert_eq!(config.fixed_daily_penalty, dec!(7500));
        assert_eq!(config.profit_rate, dec!(0.25));
        assert_eq!(config.vat_rate, dec!(0.19));
        assert_eq!(config.max_extra_term_ratio, dec!(0.5));
        assert_eq!(config.amount_decimals, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::default()
            .with_fixed_daily_penalty(dec!(10000))
            .with_profit_rate(dec!(0.10));

        assert_eq!(config.fixed_daily_penalty, dec!(10000));
        assert_eq!(config.profit_rate, dec!(0.10));
        assert_eq!(config.vat_rate, dec!(0.19));
    }

    #[test]
    fn test_engine_config_partial_json() {
        let config = EngineConfig::from_json_str(r#"{"vat_rate": "0.21"}"#).unwrap();
        assert_eq!(config.vat_rate, dec!(0.21));
        assert_eq!(config.fixed_daily_penalty, dec!(7500));
    }

    #[test]
    fn test_engine_config_rejects_out_of_range() {
        let err = EngineConfig::from_json_str(r#"{"profit_rate": "-0.1"}"#).unwrap_err();
        assert!(matches!(err, MantError::Config(_)));

        let err = EngineConfig::default()
            .with_max_extra_term_ratio(dec!(1.5))
            .validate()
            .unwrap_err();
        assert!(matches!(err, MantError::Config(_)));
    }

    #[test]
    fn test_engine_config_bad_json() {
        let err = EngineConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, MantError::Config(_)));
    }

    #[test]
    fn test_contract_config_title_fallback() {
        let config = ContractConfig::from_json_str(
            r#"{"title": "", "contractor": "Constructora Sur", "correlative_prefix": "A"}"#,
        )
        .unwrap();
        assert_eq!(config.title, "FLAD");
        assert_eq!(config.contractor, "Constructora Sur");
        assert_eq!(config.correlative_prefix, "A");
        assert_eq!(config.inspector_name, "");
    }
}
