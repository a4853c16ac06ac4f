use sea_orm::{sea_query::Expr, Condition, Value as SeaValue};

use super::coerce::{self, Numeric};
use super::{PredicateBuilder, SearchContext, SearchResult};
use crate::contract::search::{Operator, SearchFilter};
use crate::infra::storage::entity::recipe;

/// Inclusive numeric comparison on a nullable integer column.
pub(super) struct ScalarCompare {
    column: recipe::Column,
}

pub(super) static SERVINGS: ScalarCompare = ScalarCompare {
    column: recipe::Column::Servings,
};

pub(super) static PREP_TIME: ScalarCompare = ScalarCompare {
    column: recipe::Column::PreparationTime,
};

pub(super) static COOK_TIME: ScalarCompare = ScalarCompare {
    column: recipe::Column::CookingTime,
};

impl PredicateBuilder for ScalarCompare {
    fn operators(&self) -> &'static [Operator] {
        &[Operator::Equal, Operator::Gte, Operator::Lte]
    }

    fn build(&self, filter: &SearchFilter, _ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let Some(value) = coerce::as_numeric(filter.key, &filter.value)? else {
            return Ok(None);
        };
        let value: SeaValue = match value {
            Numeric::Int(i) => i.into(),
            Numeric::Real(f) => f.into(),
        };
        let column = Expr::col((recipe::Entity, self.column));
        let expr = match filter.operator {
            Operator::Gte => column.gte(value),
            Operator::Lte => column.lte(value),
            _ => column.eq(value),
        };
        Ok(Some(Condition::all().add(expr)))
    }
}
