use anyhow::Result;
use async_trait::async_trait;
use concat_string::concat_string;
use reqwest::Client;

use crate::{config, crawler::OpenApi, util::http};

/// 上市個股日成交資訊
pub mod stock_day_all;
/// 上市個股日本益比、殖利率及股價淨值比
pub mod bwibbu_all;
/// 上市個股日收盤價及月平均價
pub mod stock_day_avg_all;

/// 透過 reqwest 存取 TWSE openapi
pub struct TwseOpenApi {
    client: Client,
    base_url: String,
}

impl TwseOpenApi {
    pub fn new(client: Client, base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            concat_string!(base_url, "/")
        };

        TwseOpenApi { client, base_url }
    }

    /// 依設定建立 client 與服務位址
    pub fn from_config(setting: &config::Twse) -> Result<Self> {
        let client = http::build_client(setting)?;
        Ok(Self::new(client, &setting.base_url))
    }

    pub fn url(&self, path: &str) -> String {
        concat_string!(self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl OpenApi for TwseOpenApi {
    async fn get_text(&self, path: &str) -> Result<String> {
        http::get(&self.client, &self.url(path)).await
    }
}
