/// 個股數值的顯示格式
pub mod display;
/// 三份 openapi 資料依股票代號合併
pub mod merge;
/// 取得並合併當日上市個股資料
pub mod repository;

/// 合併後的個股資料，建立後不再修改
///
/// 數值欄位保留 openapi 的原始字串（含千分位與正負號），只在顯示時才解析。
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct UnifiedStock {
    /// 股票代號
    pub code: String,
    pub name: String,
    pub open_price: String,
    pub close_price: String,
    pub high_price: String,
    pub low_price: String,
    /// 漲跌價差
    pub spread: String,
    /// 月平均價
    pub monthly_average_price: String,
    /// 成交筆數
    pub transaction_count: String,
    /// 成交股數
    pub trade_volume: String,
    /// 成交金額
    pub trade_value: String,
    /// 本益比
    pub price_earnings_ratio: String,
    /// 殖利率
    pub dividend_yield: String,
    /// 股價淨值比
    pub price_book_ratio: String,
}

impl UnifiedStock {
    /// 代號或名稱含有 `query`（區分大小寫），空字串視為全部符合
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.code.contains(query) || self.name.contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        let stock = UnifiedStock {
            code: "2330".to_string(),
            name: "台積電".to_string(),
            ..Default::default()
        };

        assert!(stock.matches(""));
        assert!(stock.matches("33"));
        assert!(stock.matches("積電"));
        assert!(!stock.matches("2603"));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let stock = UnifiedStock {
            code: "00632R".to_string(),
            name: "元大台灣50反1".to_string(),
            ..Default::default()
        };

        assert!(stock.matches("R"));
        assert!(!stock.matches("r"));
    }
}
