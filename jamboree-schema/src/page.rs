use serde::{Deserialize, Serialize};

/// A view that may still be waiting on its data.
///
/// Serializes as `{"status":"loading"}` or `{"status":"ready","data":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Page<T> {
    Loading,
    Ready(T),
}

impl<T> Page<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Page::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Page::Ready(value) => Some(value),
            Page::Loading => None,
        }
    }
}

impl<T> From<Option<T>> for Page<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Page::Loading, Page::Ready)
    }
}
