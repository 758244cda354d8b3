use serde::{Deserialize, Serialize};

/// Paging parameters for list endpoints (`?current=2&size=10`).
///
/// Pages are 1-based, matching what the console's tables send.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    /// 1-based page number.
    #[serde(default = "default_current")]
    pub current: usize,

    /// Page size.
    #[serde(default = "default_size")]
    pub size: usize,

    /// Optional case-insensitive name filter.
    #[serde(default)]
    pub q: Option<String>,
}

fn default_current() -> usize {
    1
}

fn default_size() -> usize {
    10
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            current: default_current(),
            size: default_size(),
            q: None,
        }
    }
}

impl ListParams {
    /// Number of records to skip. Page 0 is treated as page 1.
    pub fn offset(&self) -> usize {
        self.current.saturating_sub(1).saturating_mul(self.size)
    }

    /// Slice one page out of an already-filtered, ordered record list.
    pub fn paginate<T: Serialize>(&self, items: Vec<T>) -> ListResult<T> {
        let total = items.len();
        let records = items.into_iter().skip(self.offset()).take(self.size).collect();
        ListResult { records, total }
    }
}

/// Result wrapper for paged list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub records: Vec<T>,
    pub total: usize,
}

/// Success envelope: `{"code": 0, "msg": "ok", "data": ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub msg: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data,
        }
    }
}

/// Current local time as `YYYY-MM-DD HH:MM:SS`, the format shown in the
/// console's "Create Time" columns.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Merge a JSON patch into a base value.
///
/// For each key in `patch`:
/// - If the value is `null`, the key is removed from `base`.
/// - Objects merge recursively; anything else replaces.
///
/// This follows RFC 7386 (JSON Merge Patch) semantics.
pub fn merge_patch(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (Some(base_obj), Some(patch_obj)) = (base.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_obj {
            if value.is_null() {
                base_obj.remove(key);
            } else if value.is_object() {
                let entry = base_obj
                    .entry(key.clone())
                    .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
                merge_patch(entry, value);
            } else {
                base_obj.insert(key.clone(), value.clone());
            }
        }
    } else {
        *base = patch.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let params = ListParams { current: 2, size: 2, q: None };
        let page = params.paginate(vec![1, 2, 3, 4, 5]);
        assert_eq!(page.records, vec![3, 4]);
        assert_eq!(page.total, 5);

        let past_end = ListParams { current: 9, size: 2, q: None };
        assert!(past_end.paginate(vec![1, 2, 3]).records.is_empty());
    }

    #[test]
    fn test_paginate_huge_page() {
        let params = ListParams { current: usize::MAX, size: 2, q: None };
        assert_eq!(params.offset(), usize::MAX);
        let page = params.paginate(vec![1, 2, 3]);
        assert!(page.records.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let params = ListParams { current: 0, size: 3, q: None };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_now_timestamp_shape() {
        let ts = now_timestamp();
        assert_eq!(ts.len(), 19);
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], " ");
    }

    #[test]
    fn test_api_response_envelope() {
        let json = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"code": 0, "msg": "ok", "data": [1, 2]}));
    }

    #[test]
    fn test_merge_patch() {
        let mut base = serde_json::json!({"a": 1, "b": 2, "c": {"d": 3}});
        let patch = serde_json::json!({"b": null, "c": {"e": 4}, "f": 5});
        merge_patch(&mut base, &patch);
        assert_eq!(
            base,
            serde_json::json!({"a": 1, "c": {"d": 3, "e": 4}, "f": 5})
        );
    }
}
