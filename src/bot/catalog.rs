//! Fixed catalog of offered services.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Compiled-in services, in menu order.
const STANDARD_SERVICES: &[(&str, &str)] = &[
    (
        "Подбор персонала",
        "Подбор руководителей и специалистов, оценка кандидатов, сопровождение найма.",
    ),
    (
        "Аутсорсинг бизнес-функций",
        "Аутсорсинг HR, административных и IT-функций.",
    ),
    (
        "Консалтинг",
        "Бизнес-консалтинг: стратегия, управление, финансовый консалтинг.",
    ),
    (
        "Контакты / Сайт",
        "🌐 Сайт: https://www.ascr.ru\n📞 Телефон: +7 (495) 123-45-67\n✉️ info@ascr.ru",
    ),
];

/// Errors that can occur when building a catalog.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// Entry at `index` has an empty name.
    EmptyName { index: usize },
    /// Same name appears twice.
    DuplicateName(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { index } => write!(f, "catalog entry {} has an empty name", index),
            Self::DuplicateName(name) => write!(f, "duplicate catalog entry '{}'", name),
        }
    }
}

impl std::error::Error for CatalogError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceEntry {
    pub name: String,
    pub description: String,
}

/// Ordered, immutable name -> description table.
///
/// Order is the order entries were given in and drives menu button order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    pub fn new<I, N, D>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (index, (name, description)) in entries.into_iter().enumerate() {
            let name = name.into();
            if name.is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateName(name));
            }
            out.push(ServiceEntry {
                name,
                description: description.into(),
            });
        }
        Ok(Self { entries: out })
    }

    /// The ASCR service catalog.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(STANDARD_SERVICES.iter().copied())
    }

    /// Exact, case-sensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.description.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
