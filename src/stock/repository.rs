use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::{
    crawler::{
        twse::{bwibbu_all, stock_day_all, stock_day_avg_all},
        OpenApi,
    },
    logging,
    stock::{merge, UnifiedStock},
};

/// 看板的資料來源
#[async_trait]
pub trait StockSource: Send + Sync {
    /// 取得當日所有上市個股；任何失敗都以空集合表示
    async fn fetch_all(&self) -> Vec<UnifiedStock>;
}

/// 從 openapi 並行抓取三份資料後依股票代號合併
pub struct StockRepository<A> {
    api: A,
}

impl<A: OpenApi> StockRepository<A> {
    pub fn new(api: A) -> Self {
        StockRepository { api }
    }

    /// 並行調用 STOCK_DAY_ALL、BWIBBU_ALL、STOCK_DAY_AVG_ALL，三者皆成功才合併
    ///
    /// 任一請求失敗即回傳錯誤，其餘尚未完成的請求隨之取消。
    pub async fn try_fetch_all(&self) -> Result<Vec<UnifiedStock>> {
        let start = Instant::now();
        let daily = async {
            stock_day_all::visit(&self.api)
                .await
                .context("Failed to fetch daily trading records")
        };
        let valuation = async {
            bwibbu_all::visit(&self.api)
                .await
                .context("Failed to fetch valuation records")
        };
        let average = async {
            stock_day_avg_all::visit(&self.api)
                .await
                .context("Failed to fetch monthly average records")
        };

        let (daily, valuation, average) = tokio::try_join!(daily, valuation, average)?;
        let (daily_len, valuation_len, average_len) = (daily.len(), valuation.len(), average.len());
        let stocks = merge::merge(daily, valuation, average);

        logging::info_file_async(format!(
            "取完上市個股資料 daily:{} valuation:{} average:{} {} ms",
            daily_len,
            valuation_len,
            average_len,
            start.elapsed().as_millis()
        ));

        Ok(stocks)
    }
}

#[async_trait]
impl<A: OpenApi> StockSource for StockRepository<A> {
    async fn fetch_all(&self) -> Vec<UnifiedStock> {
        match self.try_fetch_all().await {
            Ok(stocks) => stocks,
            Err(why) => {
                logging::error_file_async(format!("Failed to fetch_all because {:?}", why));
                Vec::new()
            }
        }
    }
}
