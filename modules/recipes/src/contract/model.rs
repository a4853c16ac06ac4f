use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// A recipe as returned by search, with its related collections hydrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub servings: Option<i32>,
    /// Minutes.
    pub preparation_time: Option<i64>,
    /// Minutes.
    pub cooking_time: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub author_id: Uuid,
    pub author_username: Option<String>,
    pub tags: Vec<RecipeTag>,
    pub ingredients: Vec<RecipeIngredient>,
    /// Mean review rating rounded to two decimals; `None` without reviews.
    pub average_rating: Option<f64>,
    pub favorited_by: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub quantity: i32,
    pub unit: UnitOfMeasure,
}

/// Closed set of recipe tags, stored and serialized by display code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecipeTag {
    StarterCourse,
    MainCourse,
    Dessert,
    Breakfast,
    Lunch,
    Dinner,
    Soup,
    Salad,
    Drink,
    Cake,
    Pie,
    Bread,
    Sweet,
    Salty,
}

impl RecipeTag {
    pub const ALL: [RecipeTag; 14] = [
        RecipeTag::StarterCourse,
        RecipeTag::MainCourse,
        RecipeTag::Dessert,
        RecipeTag::Breakfast,
        RecipeTag::Lunch,
        RecipeTag::Dinner,
        RecipeTag::Soup,
        RecipeTag::Salad,
        RecipeTag::Drink,
        RecipeTag::Cake,
        RecipeTag::Pie,
        RecipeTag::Bread,
        RecipeTag::Sweet,
        RecipeTag::Salty,
    ];

    /// Display code, also the stored form (`"Starter course"`).
    pub fn code(self) -> &'static str {
        match self {
            RecipeTag::StarterCourse => "Starter course",
            RecipeTag::MainCourse => "Main course",
            RecipeTag::Dessert => "Dessert",
            RecipeTag::Breakfast => "Breakfast",
            RecipeTag::Lunch => "Lunch",
            RecipeTag::Dinner => "Dinner",
            RecipeTag::Soup => "Soup",
            RecipeTag::Salad => "Salad",
            RecipeTag::Drink => "Drink",
            RecipeTag::Cake => "Cake",
            RecipeTag::Pie => "Pie",
            RecipeTag::Bread => "Bread",
            RecipeTag::Sweet => "Sweet",
            RecipeTag::Salty => "Salty",
        }
    }

    /// Constant-style name (`"STARTER_COURSE"`).
    pub fn name(self) -> &'static str {
        match self {
            RecipeTag::StarterCourse => "STARTER_COURSE",
            RecipeTag::MainCourse => "MAIN_COURSE",
            RecipeTag::Dessert => "DESSERT",
            RecipeTag::Breakfast => "BREAKFAST",
            RecipeTag::Lunch => "LUNCH",
            RecipeTag::Dinner => "DINNER",
            RecipeTag::Soup => "SOUP",
            RecipeTag::Salad => "SALAD",
            RecipeTag::Drink => "DRINK",
            RecipeTag::Cake => "CAKE",
            RecipeTag::Pie => "PIE",
            RecipeTag::Bread => "BREAD",
            RecipeTag::Sweet => "SWEET",
            RecipeTag::Salty => "SALTY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for RecipeTag {
    type Err = UnknownVariant;

    /// Accepts the display code or the constant name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RecipeTag::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s) || t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant {
                kind: "recipe tag",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for RecipeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for RecipeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for RecipeTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitOfMeasure {
    #[serde(rename = "gram")]
    Gram,
    #[serde(rename = "kg")]
    KiloGram,
    #[serde(rename = "mL")]
    MilliLiter,
    #[serde(rename = "cL")]
    CentiLiter,
    #[serde(rename = "dL")]
    DeciLiter,
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "m3")]
    CubicMeter,
    #[serde(rename = "teaSpoon")]
    TeaSpoon,
    #[serde(rename = "tableSpoon")]
    TableSpoon,
}

impl UnitOfMeasure {
    pub const ALL: [UnitOfMeasure; 9] = [
        UnitOfMeasure::Gram,
        UnitOfMeasure::KiloGram,
        UnitOfMeasure::MilliLiter,
        UnitOfMeasure::CentiLiter,
        UnitOfMeasure::DeciLiter,
        UnitOfMeasure::Liter,
        UnitOfMeasure::CubicMeter,
        UnitOfMeasure::TeaSpoon,
        UnitOfMeasure::TableSpoon,
    ];

    /// Stored and serialized symbol.
    pub fn as_str(self) -> &'static str {
        match self {
            UnitOfMeasure::Gram => "gram",
            UnitOfMeasure::KiloGram => "kg",
            UnitOfMeasure::MilliLiter => "mL",
            UnitOfMeasure::CentiLiter => "cL",
            UnitOfMeasure::DeciLiter => "dL",
            UnitOfMeasure::Liter => "L",
            UnitOfMeasure::CubicMeter => "m3",
            UnitOfMeasure::TeaSpoon => "teaSpoon",
            UnitOfMeasure::TableSpoon => "tableSpoon",
        }
    }
}

impl FromStr for UnitOfMeasure {
    type Err = UnknownVariant;

    // Symbols are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitOfMeasure::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "unit of measure",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
