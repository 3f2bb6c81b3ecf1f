use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// 台灣證券交易所 openapi
pub mod twse;

/// 唯讀的 REST 資料來源，`path` 為相對於服務根位址的路徑
///
/// 正式環境由 [`twse::TwseOpenApi`] 實作，測試時可替換成記憶體內的假資料。
#[async_trait]
pub trait OpenApi: Send + Sync {
    async fn get_text(&self, path: &str) -> Result<String>;
}

/// 取得 `path` 的內容並解析成 JSON
pub async fn get_json<T, A>(api: &A, path: &str) -> Result<T>
where
    T: DeserializeOwned,
    A: OpenApi + ?Sized,
{
    let text = api.get_text(path).await?;
    serde_json::from_str::<T>(&text)
        .map_err(|why| anyhow!("Error parsing response JSON from {}: {:?}", path, why))
}
