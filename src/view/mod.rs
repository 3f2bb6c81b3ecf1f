/// 看板的畫面狀態：搜尋、排序、分頁與深色模式
pub mod board;
/// 可訂閱的狀態欄位
pub mod state;
