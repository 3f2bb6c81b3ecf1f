use anyhow::Result;
use serde::Deserialize;

use crate::crawler::{self, OpenApi};

pub const PATH: &str = "exchangeReport/STOCK_DAY_ALL";

/// 調用 twse STOCK_DAY_ALL API 後其回應的數據，數值維持原始字串不做解析
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
pub struct DailyRecord {
    #[serde(rename(deserialize = "Code"))]
    pub code: String,
    #[serde(rename(deserialize = "Name"), default)]
    pub name: String,
    #[serde(rename(deserialize = "OpeningPrice"), default)]
    pub opening_price: String,
    #[serde(rename(deserialize = "ClosingPrice"), default)]
    pub closing_price: String,
    #[serde(rename(deserialize = "HighestPrice"), default)]
    pub highest_price: String,
    #[serde(rename(deserialize = "LowestPrice"), default)]
    pub lowest_price: String,
    /// 漲跌價差，可能不存在或為空字串
    #[serde(rename(deserialize = "Change"), default)]
    pub change: Option<String>,
    /// 成交筆數
    #[serde(rename(deserialize = "Transaction"), default)]
    pub transaction: String,
    /// 成交股數
    #[serde(rename(deserialize = "TradeVolume"), default)]
    pub trade_volume: String,
    /// 成交金額
    #[serde(rename(deserialize = "TradeValue"), default)]
    pub trade_value: String,
}

/// 取得上市個股日成交資訊
pub async fn visit<A: OpenApi + ?Sized>(api: &A) -> Result<Vec<DailyRecord>> {
    crawler::get_json::<Vec<DailyRecord>, A>(api, PATH).await
}
