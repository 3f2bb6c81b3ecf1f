//! 股票看板的畫面狀態。
//!
//! [`StockBoard`] 保存一次抓取後不再變動的 baseline，並依目前的搜尋字串與排序方向
//! 推導出 working list，再以分頁方式逐步揭露到 `visible`。
//!
//! 規則：
//! - 先過濾再排序，分頁永遠在兩者之後。
//! - 搜尋或排序任一條件改變都會把分頁重設回第一頁。
//! - 除了初次載入外，所有操作都是同步的記憶體運算，不會重新抓取資料。

use scopeguard::guard;
use tokio::sync::watch;

use crate::{
    config::DEFAULT_PAGE_SIZE,
    declare::SortOrder,
    logging,
    stock::{repository::StockSource, UnifiedStock},
    view::state::State,
};

pub struct StockBoard {
    /// 抓取後的原始資料，載入後只讀
    baseline: Vec<UnifiedStock>,
    /// baseline 經過濾、排序後的結果
    working: Vec<UnifiedStock>,
    sort_order: SortOrder,
    /// 已揭露的頁數
    page_cursor: usize,
    page_size: usize,
    visible: State<Vec<UnifiedStock>>,
    is_loading: State<bool>,
    search_query: State<String>,
    is_dark_mode: State<bool>,
}

impl Default for StockBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl StockBoard {
    /// 建立空的看板，`page_size` 為 0 時使用預設每頁筆數
    pub fn new(page_size: usize) -> Self {
        StockBoard {
            baseline: Vec::new(),
            working: Vec::new(),
            sort_order: SortOrder::default(),
            page_cursor: 0,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            visible: State::new(Vec::new()),
            is_loading: State::new(false),
            search_query: State::new(String::new()),
            is_dark_mode: State::new(false),
        }
    }

    /// 從 `source` 載入資料並顯示第一頁
    ///
    /// 抓取期間 `is_loading` 為 `true`。抓取完成前若此 future 被丟棄，
    /// baseline 維持原狀，`is_loading` 仍會回到 `false`。
    pub async fn load<S: StockSource + ?Sized>(&mut self, source: &S) {
        self.is_loading.set(true);
        let loading = self.is_loading.clone();
        let _reset = guard(loading, |loading| {
            loading.set(false);
        });

        let stocks = source.fetch_all().await;
        logging::info_file_async(format!("看板載入 {} 筆個股", stocks.len()));

        self.baseline = stocks;
        self.apply_criteria();
    }

    /// 設定搜尋字串，代號或名稱含有該字串者才顯示（區分大小寫）
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query.set(query.to_string());
        self.apply_criteria();
    }

    /// 設定依股票代號排序的方向
    pub fn set_sort_order(&mut self, ascending: bool) {
        self.sort_order = SortOrder::from_ascending(ascending);
        self.apply_criteria();
    }

    /// 再揭露一頁，working list 已全部顯示時不做任何事並回傳 `false`
    pub fn load_next_page(&mut self) -> bool {
        let start = self.page_cursor * self.page_size;
        if start >= self.working.len() {
            return false;
        }

        let end = usize::min(start + self.page_size, self.working.len());
        let page = &self.working[start..end];
        self.visible.update(|visible| {
            visible.extend_from_slice(page);
            true
        });
        self.page_cursor += 1;

        true
    }

    pub fn toggle_dark_mode(&mut self) {
        self.is_dark_mode.update(|dark| {
            *dark = !*dark;
            true
        });
    }

    /// 過濾 → 排序 → 重設分頁
    fn apply_criteria(&mut self) {
        let query = self.search_query.get();
        let mut working = self
            .baseline
            .iter()
            .filter(|s| s.matches(&query))
            .cloned()
            .collect::<Vec<_>>();

        // 代號以字串比較，"300" 排在 "2603" 之後
        match self.sort_order {
            SortOrder::Ascending => working.sort_by(|a, b| a.code.cmp(&b.code)),
            SortOrder::Descending => working.sort_by(|a, b| b.code.cmp(&a.code)),
        }

        // 第一頁一次寫入，條件不變時訂閱者不會收到重複通知
        let first = usize::min(self.page_size, working.len());
        self.visible.set(working[..first].to_vec());
        self.page_cursor = if first == 0 { 0 } else { 1 };
        self.working = working;
    }

    /// 以代號在 baseline 中查詢個股
    pub fn find(&self, code: &str) -> Option<UnifiedStock> {
        self.baseline.iter().find(|s| s.code == code).cloned()
    }

    pub fn visible(&self) -> Vec<UnifiedStock> {
        self.visible.get()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.with(|v| v.len())
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    pub fn search_query(&self) -> String {
        self.search_query.get()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.is_dark_mode.get()
    }

    pub fn sort_ascending(&self) -> bool {
        self.sort_order.is_ascending()
    }

    pub fn page_cursor(&self) -> usize {
        self.page_cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn baseline_len(&self) -> usize {
        self.baseline.len()
    }

    /// 過濾後的總筆數
    pub fn working_len(&self) -> usize {
        self.working.len()
    }

    pub fn has_more(&self) -> bool {
        self.page_cursor * self.page_size < self.working.len()
    }

    pub fn subscribe_visible(&self) -> watch::Receiver<Vec<UnifiedStock>> {
        self.visible.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.is_loading.subscribe()
    }

    pub fn subscribe_search_query(&self) -> watch::Receiver<String> {
        self.search_query.subscribe()
    }

    pub fn subscribe_dark_mode(&self) -> watch::Receiver<bool> {
        self.is_dark_mode.subscribe()
    }
}
