use anyhow::Result;
use serde::Deserialize;

use crate::{
    crawler::{self, OpenApi},
    util::map::Keyable,
};

pub const PATH: &str = "exchangeReport/STOCK_DAY_AVG_ALL";

/// 調用 twse STOCK_DAY_AVG_ALL API 後其回應的數據
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyAverageRecord {
    #[serde(rename(deserialize = "Code"))]
    pub code: String,
    #[serde(rename(deserialize = "Name"), default)]
    pub name: String,
    /// 月平均價
    #[serde(rename(deserialize = "MonthlyAveragePrice"), default)]
    pub monthly_average_price: Option<String>,
}

impl Keyable for MonthlyAverageRecord {
    fn key(&self) -> String {
        self.code.clone()
    }
}

/// 取得上市個股日收盤價及月平均價
pub async fn visit<A: OpenApi + ?Sized>(api: &A) -> Result<Vec<MonthlyAverageRecord>> {
    crawler::get_json::<Vec<MonthlyAverageRecord>, A>(api, PATH).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let json = r#"[
            {"Code":"0050","Name":"元大台灣50","ClosingPrice":"130.40","MonthlyAveragePrice":"128.93"},
            {"Code":"2330","Name":"台積電"}
        ]"#;

        let list: Vec<MonthlyAverageRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].key(), "0050");
        assert_eq!(list[0].monthly_average_price.as_deref(), Some("128.93"));
        assert_eq!(list[1].monthly_average_price, None);
    }
}
