use sea_orm::{
    sea_query::{Expr, Func, Query},
    Condition,
};

use super::{coerce, PredicateBuilder, SearchContext, SearchResult};
use crate::contract::search::{Operator, SearchFilter};
use crate::infra::storage::entity::{recipe, review};

/// Lower bound on the mean review rating. Recipes without reviews never match.
pub(super) struct AverageAtLeast;

pub(super) static AVERAGE_RATING: AverageAtLeast = AverageAtLeast;

impl PredicateBuilder for AverageAtLeast {
    fn operators(&self) -> &'static [Operator] {
        &[Operator::Gte]
    }

    fn build(&self, filter: &SearchFilter, _ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let Some(threshold) = coerce::as_f64(filter.key, &filter.value)? else {
            return Ok(None);
        };

        let rated = Query::select()
            .column((review::Entity, review::Column::RecipeId))
            .from(review::Entity)
            .group_by_col((review::Entity, review::Column::RecipeId))
            .and_having(
                Expr::expr(Func::avg(Expr::col((review::Entity, review::Column::Rating))))
                    .gte(threshold),
            )
            .to_owned();

        Ok(Some(Condition::all().add(
            Expr::col((recipe::Entity, recipe::Column::Id)).in_subquery(rated),
        )))
    }
}
