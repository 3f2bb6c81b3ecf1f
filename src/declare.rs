/// 缺少漲跌價差或月平均價時顯示的值
pub const PLACEHOLDER: &str = "-";

/// 本益比、殖利率、股價淨值比查無資料時顯示的值
pub const NO_DATA: &str = "無資料";

/// 價格走勢，決定顯示時的顏色
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Trend {
    /// 上漲 紅
    Up,
    /// 下跌 綠
    Down,
    /// 平盤或無法判斷
    Flat,
}

impl Trend {
    pub fn name(&self) -> &'static str {
        match self {
            Trend::Up => "漲",
            Trend::Down => "跌",
            Trend::Flat => "平",
        }
    }

    /// 終端機 ANSI 色碼
    pub fn ansi_color(&self, dark_mode: bool) -> &'static str {
        match (self, dark_mode) {
            (Trend::Up, _) => "\x1b[31m",
            (Trend::Down, _) => "\x1b[32m",
            (Trend::Flat, true) => "\x1b[97m",
            (Trend::Flat, false) => "\x1b[30m",
        }
    }
}

/// 排序方向，股票代號一律以字串比較
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Ascending)
    }
}
