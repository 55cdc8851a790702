//! Word catalog: vocabulary units loaded once from `words.json`.
//!
//! The payload is a JSON array of `{ "unit": 1, "words": [{ "english", "chinese" }] }`.
//! Once parsed the catalog is never mutated.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WordEntry {
    pub english: String,
    pub chinese: String,
}

impl WordEntry {
    pub fn new(english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self { english: english.into(), chinese: chinese.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VocabularyUnit {
    pub unit: u32,
    pub words: Vec<WordEntry>,
}

/// Unit picker entry: id plus how many words it holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitSummary {
    pub unit: u32,
    pub word_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    units: Vec<VocabularyUnit>,
}

impl Catalog {
    /// Build a catalog from already-parsed units, applying the same id checks
    /// as [`Catalog::from_json`].
    pub fn new(units: Vec<VocabularyUnit>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for u in &units {
            if u.unit == 0 {
                return Err(CatalogError::DataMalformed("unit ids start at 1".into()));
            }
            if !seen.insert(u.unit) {
                return Err(CatalogError::DataMalformed(format!("duplicate unit id {}", u.unit)));
            }
        }
        Ok(Self { units })
    }

    pub fn from_json(payload: &str) -> Result<Self, CatalogError> {
        let units: Vec<VocabularyUnit> = serde_json::from_str(payload)?;
        Self::new(units)
    }

    pub fn units(&self) -> &[VocabularyUnit] {
        &self.units
    }

    pub fn unit(&self, id: u32) -> Option<&VocabularyUnit> {
        self.units.iter().find(|u| u.unit == id)
    }

    /// Every word of every unit, in catalog order (the endless-mode pool).
    pub fn all_words(&self) -> Vec<WordEntry> {
        self.units.iter().flat_map(|u| u.words.iter().cloned()).collect()
    }

    pub fn unit_summaries(&self) -> Vec<UnitSummary> {
        self.units
            .iter()
            .map(|u| UnitSummary { unit: u.unit, word_count: u.words.len() })
            .collect()
    }
}

/// Fetch and parse the catalog from `url` with `window.fetch`.
pub async fn fetch_catalog(url: &str) -> Result<Catalog, CatalogError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let unavailable = |e: wasm_bindgen::JsValue| CatalogError::DataUnavailable(format!("{e:?}"));

    let win = web_sys::window().ok_or_else(|| CatalogError::DataUnavailable("no window".into()))?;
    let resp = JsFuture::from(win.fetch_with_str(url)).await.map_err(unavailable)?;
    let resp: web_sys::Response = resp.dyn_into().map_err(unavailable)?;
    if !resp.ok() {
        return Err(CatalogError::DataUnavailable(format!("{url}: HTTP {}", resp.status())));
    }
    let body = JsFuture::from(resp.text().map_err(unavailable)?).await.map_err(unavailable)?;
    let text = body
        .as_string()
        .ok_or_else(|| CatalogError::DataMalformed("response body is not text".into()))?;
    Catalog::from_json(&text)
}
