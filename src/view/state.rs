use std::sync::Arc;

use tokio::sync::watch;

/// 值改變時立即通知所有訂閱者的狀態欄位
///
/// 以 `tokio::sync::watch` 實作，寫入端與讀取端共用同一份值；
/// 寫入與先前相同的值不會觸發通知。複製出的 `State` 指向同一個欄位。
#[derive(Debug)]
pub struct State<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        State {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone + PartialEq> State<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        State { tx: Arc::new(tx) }
    }

    /// 取得目前值的複本
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// 不複製，直接讀取目前值
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// 寫入新值，回傳是否真的有變更並已通知
    pub fn set(&self, value: T) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        })
    }

    /// 就地修改，`f` 回傳 `true` 時才通知
    pub fn update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_notifies_only_on_change() {
        let state = State::new(false);
        let mut rx = state.subscribe();

        assert!(!state.set(false));
        assert!(!rx.has_changed().unwrap());

        assert!(state.set(true));
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_and_clone_share_value() {
        let state = State::new(vec![1, 2]);
        let other = state.clone();
        let rx = other.subscribe();

        assert!(state.update(|v| {
            v.push(3);
            true
        }));

        assert_eq!(other.get(), vec![1, 2, 3]);
        assert_eq!(other.with(|v| v.len()), 3);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_set_without_subscribers() {
        let state = State::new(String::new());
        assert!(state.set("2330".to_string()));
        assert_eq!(state.get(), "2330");
    }

    #[tokio::test]
    async fn test_subscriber_wakes_on_change() {
        let state = State::new(0);
        let mut rx = state.subscribe();
        let writer = state.clone();

        let handle = tokio::spawn(async move {
            writer.set(7);
        });

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 7);
        handle.await.unwrap();
    }
}
