//! 終端機介面：載入看板後以指令操作搜尋、排序、分頁與深色模式。

use anyhow::Result;
use concat_string::concat_string;
use tokio::io::{self, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::{
    declare::Trend,
    stock::{display, repository::StockSource, UnifiedStock},
    view::board::StockBoard,
};

const RESET: &str = "\x1b[0m";

const HELP: &str = "\
指令：
  /<文字>      搜尋股票代號或名稱，單獨輸入 / 清除搜尋
  asc | desc   依股票代號升冪 / 降冪排序
  more | Enter 載入下一頁
  show <代號>  顯示個股本益比、殖利率、股價淨值比
  dark         切換深色模式
  help         顯示說明
  quit         離開";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Sort { ascending: bool },
    More,
    Show(String),
    ToggleDarkMode,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(query) = line.strip_prefix('/') {
            return Command::Search(query.trim().to_string());
        }

        let trimmed = line.trim();
        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (trimmed, ""),
        };

        match head {
            "" | "more" | "m" => Command::More,
            "asc" => Command::Sort { ascending: true },
            "desc" => Command::Sort { ascending: false },
            "show" | "s" if !rest.is_empty() => Command::Show(rest.to_string()),
            "dark" | "d" => Command::ToggleDarkMode,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn colored(text: &str, trend: Trend, dark_mode: bool) -> String {
    concat_string!(trend.ansi_color(dark_mode), text, RESET)
}

/// 一行顯示一檔個股
pub fn render_row(stock: &UnifiedStock, dark_mode: bool) -> String {
    let spread = colored(&stock.spread, display::spread_trend(&stock.spread), dark_mode);
    let close = colored(
        &stock.close_price,
        display::price_trend(&stock.close_price, &stock.monthly_average_price),
        dark_mode,
    );

    format!(
        "{:<8}{:<12} 開 {:>9} 高 {:>9} 低 {:>9} 收 {:>9} 漲跌 {:>9} 月均 {:>9} | {} 筆 {} {}",
        stock.code,
        stock.name,
        stock.open_price,
        stock.high_price,
        stock.low_price,
        close,
        spread,
        stock.monthly_average_price,
        stock.transaction_count,
        display::format_shares(&stock.trade_volume),
        display::format_amount(&stock.trade_value),
    )
}

/// 個股明細
pub fn render_detail(stock: &UnifiedStock) -> String {
    format!(
        "{} ({})\n  漲跌: {} ({})\n  月平均價: {}\n  本益比: {}\n  殖利率: {}\n  股價淨值比: {}",
        stock.name,
        stock.code,
        stock.spread,
        display::spread_trend(&stock.spread).name(),
        stock.monthly_average_price,
        stock.price_earnings_ratio,
        display::format_yield(&stock.dividend_yield),
        stock.price_book_ratio,
    )
}

/// 目前狀態列
pub fn render_status(board: &StockBoard) -> String {
    format!(
        "[{}] 搜尋:\"{}\" 排序:{} 顯示 {}/{} 筆{}",
        if board.is_dark_mode() { "深色" } else { "淺色" },
        board.search_query(),
        if board.sort_ascending() { "升冪" } else { "降冪" },
        board.visible_len(),
        board.working_len(),
        if board.has_more() { "，Enter 載入更多" } else { "" },
    )
}

fn render_rows(rows: &[UnifiedStock], dark_mode: bool) -> String {
    let mut out = String::new();
    for s in rows {
        out.push_str(&render_row(s, dark_mode));
        out.push('\n');
    }
    out
}

/// 套用一個指令並回傳要輸出的內容，`None` 表示離開
pub fn apply(board: &mut StockBoard, command: Command) -> Option<String> {
    let out = match command {
        Command::Search(query) => {
            board.set_search_query(&query);
            render_rows(&board.visible(), board.is_dark_mode())
        }
        Command::Sort { ascending } => {
            board.set_sort_order(ascending);
            render_rows(&board.visible(), board.is_dark_mode())
        }
        Command::More => {
            let shown = board.visible_len();
            if board.load_next_page() {
                render_rows(&board.visible()[shown..], board.is_dark_mode())
            } else {
                "已無更多資料\n".to_string()
            }
        }
        Command::Show(code) => match board.find(&code) {
            Some(stock) => concat_string!(render_detail(&stock), "\n"),
            None => format!("查無代號 {}\n", code),
        },
        Command::ToggleDarkMode => {
            board.toggle_dark_mode();
            render_rows(&board.visible(), board.is_dark_mode())
        }
        Command::Help => concat_string!(HELP, "\n"),
        Command::Quit => return None,
        Command::Unknown(text) => format!("無法辨識的指令: {}，輸入 help 查看說明\n", text),
    };

    Some(concat_string!(out, render_status(board), "\n"))
}

/// 載入看板，並依 `is_loading` 的變化輸出載入狀態
///
/// 回傳 `false` 表示載入期間按下 Ctrl+C 而放棄。
pub async fn load_with_status<S, W>(board: &mut StockBoard, source: &S, out: &mut W) -> Result<bool>
where
    S: StockSource + ?Sized,
    W: AsyncWrite + Unpin,
{
    let mut loading = board.subscribe_loading();
    let load = board.load(source);
    tokio::pin!(load);

    loop {
        tokio::select! {
            _ = &mut load => return Ok(true),
            changed = loading.changed() => {
                if changed.is_err() {
                    continue;
                }
                let is_loading = *loading.borrow_and_update();
                if is_loading {
                    out.write_all("載入中...\n".as_bytes()).await?;
                    out.flush().await?;
                }
            }
            _ = tokio::signal::ctrl_c() => return Ok(false),
        }
    }
}

/// 載入資料後進入指令迴圈，直到輸入 quit 或 stdin 結束
///
/// 載入期間按下 Ctrl+C 會放棄抓取並直接離開。
pub async fn run<S: StockSource + ?Sized>(board: &mut StockBoard, source: &S) -> Result<()> {
    let mut stdout = io::stdout();
    if !load_with_status(board, source, &mut stdout).await? {
        return Ok(());
    }

    let first = concat_string!(
        render_rows(&board.visible(), board.is_dark_mode()),
        render_status(board),
        "\n"
    );
    stdout.write_all(first.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match apply(board, Command::parse(&line)) {
            Some(out) => {
                stdout.write_all(out.as_bytes()).await?;
                stdout.flush().await?;
            }
            None => break,
        }
    }

    Ok(())
}
