//! Static symptom knowledge base.
//!
//! Categories, their search aliases, and the follow-up questionnaire each
//! one drives. Loaded once at process start, validated, then never mutated.
//! Follow-up ids are globally unique across the whole catalog because all
//! answers live in one flat map.

mod definitions;

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicate follow-up id `{id}` (categories `{first}` and `{second}`)")]
    DuplicateFollowUpId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Follow-up `{id}` in category `{category}` has an empty options list")]
    EmptyOptions { id: String, category: String },
}

/// Visibility guard: show a follow-up only when the answer under `key`
/// is one of `values`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ShowWhen {
    pub key: &'static str,
    pub values: &'static [&'static str],
}

/// Question kind plus its kind-specific constraints.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    Slider { min: f64, max: f64, step: f64 },
    SingleChoice { options: &'static [&'static str] },
    SingleCheck,
    MultiChoice { options: &'static [&'static str] },
    FreeText,
}

/// One follow-up question within a category.
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub question: QuestionKind,
    pub is_pain_scale: bool,
    pub show_when: Option<ShowWhen>,
}

/// A named symptom category with its aliases and follow-ups.
#[derive(Debug, Clone, Serialize)]
pub struct SymptomCategory {
    pub name: &'static str,
    /// Stored lowercase; matched as substrings of the lowercased query.
    pub aliases: &'static [&'static str],
    pub involves_pain: bool,
    pub follow_ups: Vec<FollowUpSpec>,
}

/// The validated, immutable catalog.
#[derive(Debug, Clone)]
pub struct SymptomCatalog {
    categories: Vec<SymptomCategory>,
}

impl SymptomCatalog {
    /// Validate and seal a category list.
    ///
    /// Duplicate follow-up ids and empty option lists are fatal. A
    /// `show_when` guard referencing an id that exists nowhere in the
    /// catalog only warns: the guarded question simply never shows.
    pub fn new(categories: Vec<SymptomCategory>) -> Result<Self, CatalogError> {
        let mut owner_by_id: HashMap<&'static str, &'static str> = HashMap::new();
        for cat in &categories {
            for fu in &cat.follow_ups {
                if let Some(first) = owner_by_id.insert(fu.id, cat.name) {
                    return Err(CatalogError::DuplicateFollowUpId {
                        id: fu.id.into(),
                        first: first.into(),
                        second: cat.name.into(),
                    });
                }
                match fu.question {
                    QuestionKind::SingleChoice { options }
                    | QuestionKind::MultiChoice { options }
                        if options.is_empty() =>
                    {
                        return Err(CatalogError::EmptyOptions {
                            id: fu.id.into(),
                            category: cat.name.into(),
                        });
                    }
                    _ => {}
                }
            }
        }

        for cat in &categories {
            for fu in &cat.follow_ups {
                if let Some(guard) = &fu.show_when {
                    if !owner_by_id.contains_key(guard.key) {
                        tracing::warn!(
                            follow_up = fu.id,
                            guard_key = guard.key,
                            "show_when references an unknown answer key; question will never show"
                        );
                    }
                }
            }
        }

        Ok(Self { categories })
    }

    /// The built-in clinical catalog.
    pub fn builtin() -> Self {
        Self::new(definitions::categories()).expect("built-in symptom catalog is valid")
    }

    pub fn categories(&self) -> &[SymptomCategory] {
        &self.categories
    }

    /// Category names matching the query, in catalog order.
    ///
    /// Empty query returns every category. Otherwise a category matches when
    /// its name or any alias contains the lowercased query as a substring.
    pub fn suggest(&self, query: &str) -> Vec<&'static str> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return self.categories.iter().map(|c| c.name).collect();
        }
        self.categories
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&q) || c.aliases.iter().any(|a| a.contains(&q))
            })
            .map(|c| c.name)
            .collect()
    }

    /// Exact-name lookup. Free-text symptoms have no category.
    pub fn find(&self, name: &str) -> Option<&SymptomCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Locate a follow-up spec anywhere in the catalog by id.
    pub fn find_spec(&self, id: &str) -> Option<&FollowUpSpec> {
        self.categories
            .iter()
            .flat_map(|c| c.follow_ups.iter())
            .find(|fu| fu.id == id)
    }
}
