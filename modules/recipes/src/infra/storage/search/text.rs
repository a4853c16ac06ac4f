//! Text filters: case-insensitive substring match on recipe columns, and
//! author username matching through a subquery on `users`.

use cookbook_db::like::contains_ignore_case;
use sea_orm::{
    sea_query::{Expr, Query},
    Condition,
};

use super::{coerce, PredicateBuilder, SearchContext, SearchResult};
use crate::contract::search::{Operator, SearchFilter};
use crate::infra::storage::entity::{recipe, user};

pub(super) struct ColumnLike {
    column: recipe::Column,
}

pub(super) static NAME: ColumnLike = ColumnLike {
    column: recipe::Column::Name,
};

pub(super) static DESCRIPTION: ColumnLike = ColumnLike {
    column: recipe::Column::Description,
};

impl PredicateBuilder for ColumnLike {
    fn operators(&self) -> &'static [Operator] {
        &[Operator::Like]
    }

    fn build(&self, filter: &SearchFilter, _ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let Some(needle) = coerce::as_text(filter.key, &filter.value)? else {
            return Ok(None);
        };
        let expr = contains_ignore_case(Expr::col((recipe::Entity, self.column)), needle);
        Ok(Some(Condition::all().add(expr)))
    }
}

pub(super) struct AuthorMatch;

pub(super) static AUTHOR: AuthorMatch = AuthorMatch;

impl PredicateBuilder for AuthorMatch {
    fn operators(&self) -> &'static [Operator] {
        &[Operator::Equal, Operator::NotEqual, Operator::Like]
    }

    fn build(&self, filter: &SearchFilter, _ctx: &SearchContext) -> SearchResult<Option<Condition>> {
        let Some(username) = coerce::as_text(filter.key, &filter.value)? else {
            return Ok(None);
        };
        let column = Expr::col((user::Entity, user::Column::Username));
        let matches_user = match filter.operator {
            Operator::Like => contains_ignore_case(column, username),
            Operator::NotEqual => column.ne(username),
            _ => column.eq(username),
        };

        let authors = Query::select()
            .column((user::Entity, user::Column::Id))
            .from(user::Entity)
            .and_where(matches_user)
            .to_owned();

        Ok(Some(Condition::all().add(
            Expr::col((recipe::Entity, recipe::Column::AuthorId)).in_subquery(authors),
        )))
    }
}
