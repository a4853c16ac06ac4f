//! Search request vocabulary: closed sets of filter keys, operators and sort
//! keys, plus the request envelope clients send.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub use search_core::SortDir;

/// Filterable recipe attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    /// Recipes authored by the requesting user.
    #[serde(rename = "userRecipes")]
    OwnedByUser,
    /// Recipes the requesting user marked as favorite.
    #[serde(rename = "favoriteRecipes")]
    FavoritedByUser,
    #[serde(rename = "author")]
    Author,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "description")]
    Description,
    #[serde(rename = "servings")]
    Servings,
    #[serde(rename = "preparationTime")]
    PrepTime,
    #[serde(rename = "cookingTime")]
    CookTime,
    #[serde(rename = "tags")]
    Tags,
    #[serde(rename = "ingredients")]
    Ingredients,
    #[serde(rename = "averageRating")]
    AverageRating,
}

impl FilterKey {
    pub const ALL: [FilterKey; 11] = [
        FilterKey::OwnedByUser,
        FilterKey::FavoritedByUser,
        FilterKey::Author,
        FilterKey::Name,
        FilterKey::Description,
        FilterKey::Servings,
        FilterKey::PrepTime,
        FilterKey::CookTime,
        FilterKey::Tags,
        FilterKey::Ingredients,
        FilterKey::AverageRating,
    ];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::OwnedByUser => "userRecipes",
            FilterKey::FavoritedByUser => "favoriteRecipes",
            FilterKey::Author => "author",
            FilterKey::Name => "name",
            FilterKey::Description => "description",
            FilterKey::Servings => "servings",
            FilterKey::PrepTime => "preparationTime",
            FilterKey::CookTime => "cookingTime",
            FilterKey::Tags => "tags",
            FilterKey::Ingredients => "ingredients",
            FilterKey::AverageRating => "averageRating",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equal,
    NotEqual,
    Like,
    Gte,
    Lte,
    /// At least one of `values`.
    Any,
    /// Every one of `values`.
    All,
    /// None of `values`.
    None,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Like,
        Operator::Gte,
        Operator::Lte,
        Operator::Any,
        Operator::All,
        Operator::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "equal",
            Operator::NotEqual => "notEqual",
            Operator::Like => "like",
            Operator::Gte => "gte",
            Operator::Lte => "lte",
            Operator::Any => "any",
            Operator::All => "all",
            Operator::None => "none",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field filter. Scalar operators read `value`; set operators read `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub key: FilterKey,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub value: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<serde_json::Value>>,
}

impl SearchFilter {
    pub fn scalar(key: FilterKey, operator: Operator, value: impl Into<serde_json::Value>) -> Self {
        Self {
            key,
            operator,
            value: value.into(),
            values: None,
        }
    }

    pub fn set<I, V>(key: FilterKey, operator: Operator, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        Self {
            key,
            operator,
            value: serde_json::Value::Null,
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Author,
    Name,
    #[serde(rename = "preparationTime")]
    PrepTime,
    #[serde(rename = "cookingTime")]
    CookTime,
    AverageRating,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSort {
    pub key: SortKey,
    #[serde(default)]
    pub direction: SortDir,
}

impl SearchSort {
    pub fn new(key: SortKey, direction: SortDir) -> Self {
        Self { key, direction }
    }
}

/// Client search request. An empty request lists every recipe, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Requesting user; required for the ownership filters to take effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub filters: Vec<SearchFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SearchSort>,
}

impl SearchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn filter(mut self, filter: SearchFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, key: SortKey, direction: SortDir) -> Self {
        self.sort = Some(SearchSort::new(key, direction));
        self
    }
}
