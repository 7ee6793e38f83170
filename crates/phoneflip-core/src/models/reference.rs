//! Static reference data served by the backend.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lookup tables fetched once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub cities: Vec<String>,
    pub brands: BrandCatalog,
    pub storage_options: Vec<String>,
    pub condition_options: Vec<String>,
}

impl ReferenceData {
    pub fn models_for(&self, brand: &str) -> &[String] {
        self.brands.models_for(brand)
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
            && self.brands.is_empty()
            && self.storage_options.is_empty()
            && self.condition_options.is_empty()
    }
}

/// Brand name to its model names, in the order the server lists them.
///
/// Encoded as a JSON object. A repeated brand key replaces the earlier
/// models but keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl BrandCatalog {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, brand: impl Into<String>, models: Vec<String>) {
        let brand = brand.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(name, _)| *name == brand) {
            *existing = models;
        } else {
            self.entries.push((brand, models));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(brand, models)| (brand.as_str(), models.as_slice()))
    }

    pub fn models_for(&self, brand: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(brand))
            .map_or(&[][..], |(_, models)| models.as_slice())
    }

    /// Every model of every brand, brands in catalog order.
    pub fn model_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(_, models)| models.iter().cloned())
            .collect()
    }
}

impl<B: Into<String>> FromIterator<(B, Vec<String>)> for BrandCatalog {
    fn from_iter<I: IntoIterator<Item = (B, Vec<String>)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (brand, models) in iter {
            catalog.insert(brand, models);
        }
        catalog
    }
}

impl Serialize for BrandCatalog {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (brand, models) in &self.entries {
            map.serialize_entry(brand, models)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BrandCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(BrandCatalogVisitor)
    }
}

struct BrandCatalogVisitor;

impl<'de> Visitor<'de> for BrandCatalogVisitor {
    type Value = BrandCatalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping brand names to model lists")
    }

    fn visit_map<M>(self, mut access: M) -> std::result::Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut catalog = BrandCatalog {
            entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((brand, models)) = access.next_entry::<String, Vec<String>>()? {
            catalog.insert(brand, models);
        }
        Ok(catalog)
    }
}
