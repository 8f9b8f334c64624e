/// Source of the current instant, in Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}
