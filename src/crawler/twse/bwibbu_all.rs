use anyhow::Result;
use serde::Deserialize;

use crate::{
    crawler::{self, OpenApi},
    util::map::Keyable,
};

pub const PATH: &str = "exchangeReport/BWIBBU_ALL";

/// 調用 twse BWIBBU_ALL API 後其回應的數據
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct ValuationRecord {
    #[serde(rename(deserialize = "Code"))]
    pub code: String,
    #[serde(rename(deserialize = "Name"), default)]
    pub name: String,
    /// 本益比
    #[serde(rename(deserialize = "PEratio"), default)]
    pub price_earnings_ratio: Option<String>,
    /// 殖利率(%)
    #[serde(rename(deserialize = "DividendYield"), default)]
    pub dividend_yield: Option<String>,
    /// 股價淨值比
    #[serde(rename(deserialize = "PBratio"), default)]
    pub price_book_ratio: Option<String>,
}

impl Keyable for ValuationRecord {
    fn key(&self) -> String {
        self.code.clone()
    }
}

/// 取得上市個股日本益比、殖利率及股價淨值比
pub async fn visit<A: OpenApi + ?Sized>(api: &A) -> Result<Vec<ValuationRecord>> {
    crawler::get_json::<Vec<ValuationRecord>, A>(api, PATH).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let json = r#"[
            {"Code":"2330","Name":"台積電","PEratio":"15.72","DividendYield":"2.03","PBratio":"4.38"},
            {"Code":"2888","Name":"新光金","PEratio":"","DividendYield":"0.00"},
            {"Code":"1101","Name":"台泥","PEratio":null,"DividendYield":"4.12","PBratio":"1.09"}
        ]"#;

        let list: Vec<ValuationRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list[0].price_earnings_ratio.as_deref(), Some("15.72"));
        assert_eq!(list[0].key(), "2330");
        assert_eq!(list[1].price_earnings_ratio.as_deref(), Some(""));
        assert_eq!(list[1].price_book_ratio, None);
        assert_eq!(list[2].price_earnings_ratio, None);
    }

    #[test]
    fn test_deserialize_rejects_missing_code() {
        let json = r#"[{"Name":"台積電","PEratio":"15.72"}]"#;
        assert!(serde_json::from_str::<Vec<ValuationRecord>>(json).is_err());
    }
}
