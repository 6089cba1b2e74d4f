//! URL query parameters of a product page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use product_context_core::ItemId;

/// Query parameters of the page URL.
///
/// `skuId` is lifted into its own field since it drives SKU selection; every
/// other parameter is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Query {
    #[serde(
        rename = "skuId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_sku"
    )]
    pub sku_id: Option<ItemId>,
    #[serde(flatten)]
    pub params: BTreeMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sku_id(mut self, sku_id: impl Into<ItemId>) -> Self {
        self.sku_id = Some(sku_id.into());
        self
    }

    /// Parse a raw query string (`skuId=2&utm_source=mail`), with or without
    /// the leading `?`. A repeated key keeps its last value.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        Self::from_pairs(
            url::form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.into(), value.into());
            if key == "skuId" {
                query.sku_id = value.parse().ok();
            } else {
                query.params.insert(key, value);
            }
        }
        query
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "skuId" => self.sku_id.as_ref().map(ItemId::as_str),
            _ => self.params.get(key).map(String::as_str),
        }
    }
}

// An empty `skuId=` is treated the same as no parameter at all.
fn non_empty_sku<'de, D>(deserializer: D) -> Result<Option<ItemId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lifts_sku_id() {
        let query = Query::parse("?skuId=2000534&utm_source=newsletter");

        assert_eq!(query.sku_id, Some(ItemId::new("2000534")));
        assert_eq!(query.get("utm_source"), Some("newsletter"));
        assert_eq!(query.get("skuId"), Some("2000534"));
    }

    #[test]
    fn empty_sku_id_is_absent() {
        assert_eq!(Query::parse("skuId=").sku_id, None);

        let query: Query = serde_json::from_str(r#"{"skuId": "", "map": "c"}"#).unwrap();
        assert_eq!(query.sku_id, None);
        assert_eq!(query.get("map"), Some("c"));
    }

    #[test]
    fn percent_encoded_values_are_decoded() {
        let query = Query::parse("skuId=A%20B");
        assert_eq!(query.sku_id, Some(ItemId::new("A B")));
    }

    #[test]
    fn empty_string_parses_to_empty_query() {
        assert_eq!(Query::parse(""), Query::default());
    }
}
