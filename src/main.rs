#[cfg(all(target_os = "linux", target_env = "musl"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod config;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod shell;
pub mod stock;
pub mod util;
pub mod view;

use anyhow::Result;

use crate::{crawler::twse::TwseOpenApi, stock::repository::StockRepository, view::board::StockBoard};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        logging::warn_file_async("rustls crypto provider was already installed".to_string());
    }

    let setting = &*config::SETTINGS;
    logging::info_file_async(format!(
        "twse_board 已啟動 base_url:{} timeout:{}s page_size:{}",
        setting.twse.base_url, setting.twse.timeout_secs, setting.board.page_size
    ));

    let api = TwseOpenApi::from_config(&setting.twse)?;
    let repository = StockRepository::new(api);
    let mut board = StockBoard::new(setting.board.page_size);

    let result = shell::run(&mut board, &repository).await;
    if let Err(why) = &result {
        logging::error_file_async(format!("shell stopped because {:?}", why));
    }

    logging::flush();
    result
}
