use crate::{
    crawler::twse::{
        bwibbu_all::ValuationRecord, stock_day_all::DailyRecord,
        stock_day_avg_all::MonthlyAverageRecord,
    },
    declare::{NO_DATA, PLACEHOLDER},
    stock::UnifiedStock,
    util::map,
};

/// 以日成交資訊為主，依股票代號補上本益比與月平均價
///
/// 輸出筆數與順序和 `daily` 完全一致；`valuation`、`average` 內找不到對應代號的
/// 資料直接忽略，缺少的欄位以 [`NO_DATA`] 或 [`PLACEHOLDER`] 代替。
pub fn merge(
    daily: Vec<DailyRecord>,
    valuation: Vec<ValuationRecord>,
    average: Vec<MonthlyAverageRecord>,
) -> Vec<UnifiedStock> {
    let valuations = map::vec_to_hashmap(valuation);
    let averages = map::vec_to_hashmap(average);
    let mut stocks = Vec::with_capacity(daily.len());

    for dr in daily {
        let v = valuations.get(&dr.code);
        let avg = averages.get(&dr.code);
        let (pe, dy, pb) = match v {
            Some(v) => (
                v.price_earnings_ratio.clone(),
                v.dividend_yield.clone(),
                v.price_book_ratio.clone(),
            ),
            None => (None, None, None),
        };

        stocks.push(UnifiedStock {
            spread: dr
                .change
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            monthly_average_price: avg
                .and_then(|a| a.monthly_average_price.clone())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            price_earnings_ratio: pe.unwrap_or_else(|| NO_DATA.to_string()),
            dividend_yield: dy.unwrap_or_else(|| NO_DATA.to_string()),
            price_book_ratio: pb.unwrap_or_else(|| NO_DATA.to_string()),
            code: dr.code,
            name: dr.name,
            open_price: dr.opening_price,
            close_price: dr.closing_price,
            high_price: dr.highest_price,
            low_price: dr.lowest_price,
            transaction_count: dr.transaction,
            trade_volume: dr.trade_volume,
            trade_value: dr.trade_value,
        });
    }

    stocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(code: &str, name: &str, change: Option<&str>) -> DailyRecord {
        DailyRecord {
            code: code.to_string(),
            name: name.to_string(),
            opening_price: "100.00".to_string(),
            closing_price: "101.00".to_string(),
            highest_price: "102.00".to_string(),
            lowest_price: "99.00".to_string(),
            change: change.map(str::to_string),
            transaction: "1,234".to_string(),
            trade_volume: "5,678,000".to_string(),
            trade_value: "573,478,000".to_string(),
        }
    }

    fn valuation(code: &str, pe: &str, dy: &str, pb: &str) -> ValuationRecord {
        ValuationRecord {
            code: code.to_string(),
            name: String::new(),
            price_earnings_ratio: Some(pe.to_string()),
            dividend_yield: Some(dy.to_string()),
            price_book_ratio: Some(pb.to_string()),
        }
    }

    fn average(code: &str, price: &str) -> MonthlyAverageRecord {
        MonthlyAverageRecord {
            code: code.to_string(),
            name: String::new(),
            monthly_average_price: Some(price.to_string()),
        }
    }

    #[test]
    fn test_merge_enriches_each_side() {
        let stocks = merge(
            vec![
                daily("2330", "台積電", Some("+5.0000")),
                daily("0050", "元大台灣50", Some("-0.3500")),
            ],
            vec![valuation("2330", "15.72", "2.03", "4.38")],
            vec![average("0050", "128.93")],
        );

        assert_eq!(stocks.len(), 2);

        let tsmc = &stocks[0];
        assert_eq!(tsmc.code, "2330");
        assert_eq!(tsmc.price_earnings_ratio, "15.72");
        assert_eq!(tsmc.dividend_yield, "2.03");
        assert_eq!(tsmc.price_book_ratio, "4.38");
        assert_eq!(tsmc.monthly_average_price, PLACEHOLDER);
        assert_eq!(tsmc.spread, "+5.0000");

        let etf = &stocks[1];
        assert_eq!(etf.code, "0050");
        assert_eq!(etf.price_earnings_ratio, NO_DATA);
        assert_eq!(etf.dividend_yield, NO_DATA);
        assert_eq!(etf.price_book_ratio, NO_DATA);
        assert_eq!(etf.monthly_average_price, "128.93");
    }

    #[test]
    fn test_merge_keeps_daily_order_and_length() {
        let codes = ["2603", "0050", "2330", "1101", "00632R"];
        let daily_list = codes
            .iter()
            .map(|c| daily(c, c, None))
            .collect::<Vec<_>>();

        let stocks = merge(
            daily_list,
            vec![
                valuation("9999", "1", "1", "1"),
                valuation("1101", "10.1", "4.12", "1.09"),
            ],
            vec![average("8888", "1.00"), average("2603", "180.5")],
        );

        assert_eq!(stocks.len(), codes.len());
        assert_eq!(
            stocks.iter().map(|s| s.code.as_str()).collect::<Vec<_>>(),
            codes.to_vec()
        );
        assert!(stocks.iter().all(|s| s.code != "9999" && s.code != "8888"));
        assert_eq!(stocks[3].price_earnings_ratio, "10.1");
        assert_eq!(stocks[0].monthly_average_price, "180.5");
    }

    #[test]
    fn test_merge_spread_placeholder() {
        let stocks = merge(
            vec![
                daily("1", "a", None),
                daily("2", "b", Some("")),
                daily("3", "c", Some("0.0000")),
            ],
            vec![],
            vec![],
        );

        assert_eq!(stocks[0].spread, PLACEHOLDER);
        assert_eq!(stocks[1].spread, PLACEHOLDER);
        assert_eq!(stocks[2].spread, "0.0000");
    }

    #[test]
    fn test_merge_duplicate_auxiliary_last_write_wins() {
        let stocks = merge(
            vec![daily("2330", "台積電", None)],
            vec![
                valuation("2330", "10", "1", "1"),
                valuation("2330", "20", "2", "2"),
            ],
            vec![average("2330", "500"), average("2330", "600")],
        );

        assert_eq!(stocks[0].price_earnings_ratio, "20");
        assert_eq!(stocks[0].monthly_average_price, "600");
    }

    #[test]
    fn test_merge_duplicate_daily_codes_both_enriched() {
        let stocks = merge(
            vec![daily("2330", "台積電", None), daily("2330", "台積電", None)],
            vec![valuation("2330", "15.72", "2.03", "4.38")],
            vec![average("2330", "600")],
        );

        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[1].price_earnings_ratio, "15.72");
        assert_eq!(stocks[1].monthly_average_price, "600");
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge(vec![], vec![valuation("2330", "1", "1", "1")], vec![]).is_empty());
    }
}
