use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

/// 預設的 TWSE openapi 位址
pub const DEFAULT_TWSE_BASE_URL: &str = "https://openapi.twse.com.tw/v1/";
/// 每頁顯示筆數
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub twse: Twse,
    #[serde(default)]
    pub board: Board,
}

const TWSE_BASE_URL: &str = "TWSE_BASE_URL";
const TWSE_TIMEOUT_SECS: &str = "TWSE_TIMEOUT_SECS";
const TWSE_CONNECT_TIMEOUT_SECS: &str = "TWSE_CONNECT_TIMEOUT_SECS";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Twse {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 單一請求的總逾時秒數
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for Twse {
    fn default() -> Self {
        Twse {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

const BOARD_PAGE_SIZE: &str = "BOARD_PAGE_SIZE";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Board {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Board {
    fn default() -> Self {
        Board {
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_TWSE_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

pub static SETTINGS: Lazy<App> = Lazy::new(App::new);

impl App {
    /// 讀取設定檔，讀取失敗時記錄錯誤並退回預設值
    pub fn new() -> Self {
        match Self::get() {
            Ok(app) => app,
            Err(why) => {
                logging::error_file_async(format!(
                    "I can't read the config context because {:?}",
                    why
                ));
                App::default().override_with_env()
            }
        }
    }

    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(base_url) = env::var(TWSE_BASE_URL) {
            if !base_url.is_empty() {
                self.twse.base_url = base_url;
            }
        }

        if let Ok(secs) = env::var(TWSE_TIMEOUT_SECS) {
            self.twse.timeout_secs = u64::from_str(&secs).unwrap_or(self.twse.timeout_secs);
        }

        if let Ok(secs) = env::var(TWSE_CONNECT_TIMEOUT_SECS) {
            self.twse.connect_timeout_secs =
                u64::from_str(&secs).unwrap_or(self.twse.connect_timeout_secs);
        }

        if let Ok(size) = env::var(BOARD_PAGE_SIZE) {
            self.board.page_size = match usize::from_str(&size) {
                Ok(n) if n > 0 => n,
                _ => self.board.page_size,
            };
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
