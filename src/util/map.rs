use std::collections::HashMap;

/// 以股票代號作為查詢鍵的資料
pub trait Keyable {
    fn key(&self) -> String;
}

/// 將集合轉為以 `Keyable::key` 為鍵的 HashMap，鍵重複時後寫入者覆蓋前者
pub fn vec_to_hashmap<T: Keyable>(entities: Vec<T>) -> HashMap<String, T> {
    let mut map = HashMap::with_capacity(entities.len());
    for e in entities {
        map.insert(e.key(), e);
    }
    map
}
