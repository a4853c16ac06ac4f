//! ANY / ALL / NONE over an association table keyed by recipe.

use sea_orm::{
    sea_query::{Expr, Func, Query, SelectStatement},
    Condition, EntityTrait, Value,
};
use uuid::Uuid;

use super::{coerce, PredicateBuilder, SearchContext, SearchResult};
use crate::contract::{
    model::RecipeTag,
    search::{FilterKey, Operator, SearchFilter},
};
use crate::infra::storage::entity::{recipe, recipe_ingredient, recipe_tag};

/// Association table descriptor: `owner` references the recipe, `discriminator`
/// is the member being tested.
pub(super) struct Membership<E: EntityTrait> {
    owner: E::Column,
    discriminator: E::Column,
    parse: fn(FilterKey, &serde_json::Value) -> SearchResult<Value>,
}

pub(super) static TAGS: Membership<recipe_tag::Entity> = Membership {
    owner: recipe_tag::Column::RecipeId,
    discriminator: recipe_tag::Column::Tag,
    parse: parse_tag,
};

pub(super) static INGREDIENTS: Membership<recipe_ingredient::Entity> = Membership {
    owner: recipe_ingredient::Column::RecipeId,
    discriminator: recipe_ingredient::Column::IngredientId,
    parse: parse_ingredient,
};

fn parse_tag(key: FilterKey, raw: &serde_json::Value) -> SearchResult<Value> {
    let text = coerce::as_string_item(key, "a recipe tag", raw)?;
    let tag: RecipeTag = text
        .parse()
        .map_err(|_| coerce::unparseable(key, "a recipe tag", raw))?;
    Ok(tag.code().into())
}

fn parse_ingredient(key: FilterKey, raw: &serde_json::Value) -> SearchResult<Value> {
    let text = coerce::as_string_item(key, "an ingredient id", raw)?;
    let id = Uuid::parse_str(text.trim())
        .map_err(|_| coerce::unparseable(key, "an ingredient id", raw))?;
    Ok(id.into())
}

impl<E: EntityTrait> Membership<E> {
    /// Parsed values with duplicates removed, first occurrence kept.
    fn distinct_values(&self, key: FilterKey, raw: &[serde_json::Value]) -> SearchResult<Vec<Value>> {
        let mut out: Vec<Value> = Vec::with_capacity(raw.len());
        for item in raw {
            let value = (self.parse)(key, item)?;
            if !out.contains(&value) {
                out.push(value);
            }
        }
        Ok(out)
    }

    /// `SELECT owner FROM assoc WHERE discriminator IN (values)`
    fn owners_with_any(&self, values: Vec<Value>) -> SelectStatement {
        Query::select()
            .column((E::default(), self.owner))
            .from(E::default())
            .and_where(Expr::col((E::default(), self.discriminator)).is_in(values))
            .to_owned()
    }

    /// Owners holding every value: grouped, with a distinct-member count check.
    fn owners_with_all(&self, values: Vec<Value>) -> SelectStatement {
        let required = values.len() as i64;
        let mut stmt = self.owners_with_any(values);
        stmt.group_by_col((E::default(), self.owner)).and_having(
            Expr::expr(Func::count_distinct(Expr::col((
                E::default(),
                self.discriminator,
            ))))
            .eq(required),
        );
        stmt
    }
}

impl<E: EntityTrait> PredicateBuilder for Membership<E> {
    fn operators(&self) -> &'static [Operator] {
        &[Operator::Any, Operator::All, Operator::None]
    }

    fn build(&self, filter: &SearchFilter, _ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let Some(raw) = coerce::set_values(filter) else {
            return Ok(None);
        };
        let values = self.distinct_values(filter.key, raw)?;
        let recipe_id = Expr::col((recipe::Entity, recipe::Column::Id));

        let expr = match filter.operator {
            Operator::All => recipe_id.in_subquery(self.owners_with_all(values)),
            Operator::None => recipe_id.not_in_subquery(self.owners_with_any(values)),
            _ => recipe_id.in_subquery(self.owners_with_any(values)),
        };
        Ok(Some(Condition::all().add(expr)))
    }
}
