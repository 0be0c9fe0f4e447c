//! List envelopes
//!
//! List endpoints answer with `{ "data": [...], "meta": {...} }`. A bare JSON
//! array is accepted too and treated as a single, final page.

use serde::de::{DeserializeOwned, Error, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Paging metadata attached to a list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_page_count: Option<u32>,
    #[serde(default, alias = "totalCount")]
    pub total_item_count: Option<u64>,
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> Page<T> {
    /// Whether another page should be requested after `page` (zero-based)
    ///
    /// A bare array, an empty page, or a page shorter than `per_page` ends
    /// the listing. When the server reports `totalPageCount` it wins over
    /// the length heuristic.
    pub fn has_more(&self, page: u32, per_page: u32) -> bool {
        let Some(meta) = &self.meta else {
            return false;
        };
        if self.data.is_empty() {
            return false;
        }
        match meta.total_page_count {
            Some(total) => page.saturating_add(1) < total,
            None => self.data.len() >= per_page as usize,
        }
    }

    /// Whether this page is the one that was asked for
    ///
    /// False only when the server reports a different `page` number, which
    /// means it ignored the paging parameters.
    pub fn is_page(&self, page: u32) -> bool {
        match self.meta.as_ref().and_then(|meta| meta.page) {
            Some(served) => served == page,
            None => true,
        }
    }
}

impl<'de, T> Deserialize<'de> for Page<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => {
                let data = decode_items(items).map_err(D::Error::custom)?;
                Ok(Page { data, meta: None })
            }
            Value::Object(mut envelope) => {
                let items = match envelope.remove("data") {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        let expected = &"an array of records";
                        return Err(D::Error::invalid_type(unexpected(&other), expected));
                    }
                    None => return Err(D::Error::missing_field("data")),
                };
                let data = decode_items(items).map_err(D::Error::custom)?;
                let meta = match envelope.remove("meta") {
                    None | Some(Value::Null) => PageMeta::default(),
                    Some(meta) => serde_json::from_value(meta).map_err(D::Error::custom)?,
                };
                Ok(Page { data, meta: Some(meta) })
            }
            other => Err(D::Error::invalid_type(
                unexpected(&other),
                &"a list envelope or a JSON array",
            )),
        }
    }
}

/// Decode records one by one, prefixing any error with the record index
fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, String> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| format!("record {}: {}", index, e))
        })
        .collect()
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::Charge;

    #[test]
    fn decodes_envelope_with_meta() {
        let page: Page<u32> = serde_json::from_value(json!({
            "data": [1, 2, 3],
            "meta": { "page": 0, "perPage": 3, "totalPageCount": 2, "totalCount": 5 }
        }))
        .unwrap();
        assert_eq!(page.data, vec![1, 2, 3]);
        let meta = page.meta.clone().unwrap();
        assert_eq!(meta.total_item_count, Some(5));
        assert!(page.has_more(0, 3));
        assert!(!page.has_more(1, 3));
    }

    #[test]
    fn envelope_without_meta_uses_length_heuristic() {
        let full: Page<u32> = serde_json::from_value(json!({ "data": [1, 2] })).unwrap();
        let short: Page<u32> = serde_json::from_value(json!({ "data": [1] })).unwrap();
        assert!(full.has_more(0, 2));
        assert!(!short.has_more(0, 2));
    }

    #[test]
    fn bare_array_is_final_page() {
        let page: Page<u32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.meta, None);
        assert!(!page.has_more(0, 2));
    }

    #[test]
    fn empty_page_ends_listing() {
        let page: Page<u32> =
            serde_json::from_value(json!({ "data": [], "meta": { "totalPageCount": 9 } })).unwrap();
        assert!(!page.has_more(0, 50));
    }

    #[test]
    fn object_without_data_is_rejected() {
        let err = serde_json::from_value::<Page<u32>>(json!({ "items": [1] })).unwrap_err();
        assert!(err.to_string().contains("missing field `data`"));
    }

    #[test]
    fn record_error_keeps_its_cause() {
        let payload = json!({ "data": [{ "id": 1 }, { "state": "x" }] });
        let err = serde_json::from_value::<Page<Charge>>(payload).unwrap_err().to_string();
        assert!(err.contains("record 1"), "{err}");
        assert!(err.contains("missing field `id`"), "{err}");

        let bare = serde_json::from_value::<Page<Charge>>(json!([{ "state": "x" }]))
            .unwrap_err()
            .to_string();
        assert!(bare.contains("missing field `id`"), "{bare}");
    }

    #[test]
    fn scalar_body_is_rejected() {
        let err = serde_json::from_value::<Page<u32>>(json!("nope")).unwrap_err();
        assert!(err.to_string().contains("list envelope"));
    }

    #[test]
    fn null_meta_counts_as_empty_meta() {
        let page: Page<u32> = serde_json::from_value(json!({ "data": [1], "meta": null })).unwrap();
        assert_eq!(page.meta, Some(PageMeta::default()));
    }

    #[test]
    fn served_page_number_is_checked() {
        let page: Page<u32> =
            serde_json::from_value(json!({ "data": [1, 2], "meta": { "page": 0 } })).unwrap();
        assert!(page.is_page(0));
        assert!(!page.is_page(1));

        let unnumbered: Page<u32> = serde_json::from_value(json!({ "data": [1] })).unwrap();
        assert!(unnumbered.is_page(7));
    }
}
