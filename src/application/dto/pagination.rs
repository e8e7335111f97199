use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated listing. `cursor` is null on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    pub posts: Vec<T>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

impl<T> CursorPage<T> {
    pub fn new(posts: Vec<T>, cursor: Option<String>) -> Self {
        let has_more = cursor.is_some();
        Self {
            posts,
            cursor,
            has_more,
        }
    }
}
