//! Search request compilation: one predicate builder per filter key, a sort
//! resolver, and the compiler that folds both into a [`compiler::CompiledSearch`].
//!
//! Builders never join. Every multi-valued or aggregate constraint is a
//! membership test against a subquery on `recipes.id`, so the same condition
//! can drive both the count query and the page query.

use sea_orm::Condition;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::search::{FilterKey, Operator, SearchFilter};

mod coerce;
pub mod compiler;
mod membership;
mod ownership;
mod rating;
mod scalar;
pub mod sort;
mod text;

pub use compiler::{compile, CompiledSearch};
pub use sort::SortPlan;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchBuildError {
    #[error("operator '{operator}' is not supported for filter '{key}'")]
    UnsupportedOperator { key: FilterKey, operator: Operator },

    #[error("invalid value for filter '{key}': expected {expected}, got {got}")]
    InvalidValue {
        key: FilterKey,
        expected: &'static str,
        got: String,
    },
}

pub type SearchResult<T> = Result<T, SearchBuildError>;

/// Request-scoped inputs a builder may need besides the filter itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchContext {
    pub user_id: Option<Uuid>,
}

/// Turns one filter into a condition over the base recipe set.
pub trait PredicateBuilder: Send + Sync {
    /// Operators this key accepts.
    fn operators(&self) -> &'static [Operator];

    fn supports(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    /// `Ok(None)` means the filter places no constraint.
    fn build(&self, filter: &SearchFilter, ctx: &SearchContext) -> SearchResult<Option<Condition>>;
}

pub fn builder_for(key: FilterKey) -> &'static dyn PredicateBuilder {
    match key {
        FilterKey::OwnedByUser => &ownership::OWNED_BY_USER,
        FilterKey::FavoritedByUser => &ownership::FAVORITED_BY_USER,
        FilterKey::Author => &text::AUTHOR,
        FilterKey::Name => &text::NAME,
        FilterKey::Description => &text::DESCRIPTION,
        FilterKey::Servings => &scalar::SERVINGS,
        FilterKey::PrepTime => &scalar::PREP_TIME,
        FilterKey::CookTime => &scalar::COOK_TIME,
        FilterKey::Tags => &membership::TAGS,
        FilterKey::Ingredients => &membership::INGREDIENTS,
        FilterKey::AverageRating => &rating::AVERAGE_RATING,
    }
}
