use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::{
    declare::{Trend, NO_DATA},
    util::text,
};

/// 一億
const HUNDRED_MILLION: Decimal = dec!(100000000);
/// 一萬
const TEN_THOUSAND: Decimal = dec!(10000);
/// 一張 = 1000 股
const SHARES_PER_LOT: Decimal = dec!(1000);

fn parse(value: &str) -> Option<Decimal> {
    text::parse_decimal(value, Some(vec!['+'])).ok()
}

/// 依漲跌價差的正負判斷走勢
pub fn spread_trend(spread: &str) -> Trend {
    match parse(spread) {
        Some(v) if v > Decimal::ZERO => Trend::Up,
        Some(v) if v < Decimal::ZERO => Trend::Down,
        _ => Trend::Flat,
    }
}

/// 比較 `price` 與 `compare_to`，例如收盤價與月平均價
pub fn price_trend(price: &str, compare_to: &str) -> Trend {
    match (parse(price), parse(compare_to)) {
        (Some(p), Some(c)) if p > c => Trend::Up,
        (Some(p), Some(c)) if p < c => Trend::Down,
        _ => Trend::Flat,
    }
}

/// 成交股數換算成張數，例︰"28,613,011" => "28,613 張"
pub fn format_shares(value: &str) -> String {
    match parse(value).and_then(|n| (n / SHARES_PER_LOT).trunc().to_i64()) {
        Some(lots) => format!("{} 張", text::thousands(lots)),
        None => value.to_string(),
    }
}

/// 成交金額以億、萬為單位縮寫，未滿一萬維持原值
pub fn format_amount(value: &str) -> String {
    let num = match parse(value) {
        Some(n) => n,
        None => return value.to_string(),
    };

    let (scaled, unit) = if num >= HUNDRED_MILLION {
        (num / HUNDRED_MILLION, "億")
    } else if num >= TEN_THOUSAND {
        (num / TEN_THOUSAND, "萬")
    } else {
        return value.to_string();
    };

    let rounded = scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2} {}", rounded, unit)
}

/// 殖利率加上百分比符號
pub fn format_yield(value: &str) -> String {
    if value.trim().is_empty() || value == NO_DATA {
        NO_DATA.to_string()
    } else {
        format!("{}%", value)
    }
}
