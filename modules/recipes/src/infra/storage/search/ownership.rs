//! Requesting-user flags. The operator is accepted but not interpreted: a
//! `true` value restricts the result, anything else leaves it untouched.

use sea_orm::{
    sea_query::{Expr, Query},
    Condition,
};

use super::{coerce, PredicateBuilder, SearchContext, SearchResult};
use crate::contract::search::{Operator, SearchFilter};
use crate::infra::storage::entity::{favorite, recipe};
use uuid::Uuid;

#[derive(Clone, Copy)]
enum Ownership {
    Authored,
    Favorited,
}

pub(super) struct UserFlag(Ownership);

pub(super) static OWNED_BY_USER: UserFlag = UserFlag(Ownership::Authored);
pub(super) static FAVORITED_BY_USER: UserFlag = UserFlag(Ownership::Favorited);

impl UserFlag {
    fn predicate(&self, user_id: Uuid) -> Condition {
        match self.0 {
            Ownership::Authored => Condition::all()
                .add(Expr::col((recipe::Entity, recipe::Column::AuthorId)).eq(user_id)),
            Ownership::Favorited => {
                let favorites = Query::select()
                    .column((favorite::Entity, favorite::Column::RecipeId))
                    .from(favorite::Entity)
                    .and_where(Expr::col((favorite::Entity, favorite::Column::UserId)).eq(user_id))
                    .to_owned();
                Condition::all()
                    .add(Expr::col((recipe::Entity, recipe::Column::Id)).in_subquery(favorites))
            }
        }
    }
}

impl PredicateBuilder for UserFlag {
    fn operators(&self) -> &'static [Operator] {
        &Operator::ALL
    }

    fn build(&self, filter: &SearchFilter, ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let flag = coerce::as_bool(filter.key, &filter.value)?;
        match (flag, ctx.user_id) {
            (Some(true), Some(user_id)) => Ok(Some(self.predicate(user_id))),
            _ => Ok(None),
        }
    }
}
