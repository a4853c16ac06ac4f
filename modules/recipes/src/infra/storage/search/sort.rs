//! Ordering for the page query. The count query never sees any of this.

use cookbook_db::paging::{OrderSpec, PagePlan};
use sea_orm::{
    sea_query::{Expr, Func, Query, SimpleExpr, SubQueryStatement},
    RelationDef, RelationTrait,
};
use search_core::SortDir;

use crate::contract::search::{SearchSort, SortKey};
use crate::infra::storage::entity::{recipe, review, user};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPlan {
    pub key: SortKey,
    pub direction: SortDir,
}

impl Default for SortPlan {
    /// Newest first.
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDir::Desc,
        }
    }
}

impl SortPlan {
    pub fn resolve(sort: Option<&SearchSort>) -> Self {
        sort.map(|s| Self {
            key: s.key,
            direction: s.direction,
        })
        .unwrap_or_default()
    }

    /// Join and ordering terms for the executor; the id tiebreaker is added there.
    pub fn into_page_plan(self) -> PagePlan {
        let (join, expr): (Option<RelationDef>, SimpleExpr) = match self.key {
            SortKey::Author => (
                Some(recipe::Relation::Author.def()),
                Expr::col((user::Entity, user::Column::Username)).into(),
            ),
            SortKey::AverageRating => (None, average_rating_expr()),
            SortKey::Name => (None, column(recipe::Column::Name)),
            SortKey::PrepTime => (None, column(recipe::Column::PreparationTime)),
            SortKey::CookTime => (None, column(recipe::Column::CookingTime)),
            SortKey::CreatedAt => (None, column(recipe::Column::CreatedAt)),
        };
        PagePlan {
            join,
            order: vec![OrderSpec::new(expr, self.direction)],
        }
    }
}

fn column(col: recipe::Column) -> SimpleExpr {
    Expr::col((recipe::Entity, col)).into()
}

/// `(SELECT AVG(rating) FROM reviews WHERE reviews.recipe_id = recipes.id)`
fn average_rating_expr() -> SimpleExpr {
    let avg = Query::select()
        .expr(Func::avg(Expr::col((review::Entity, review::Column::Rating))))
        .from(review::Entity)
        .and_where(
            Expr::col((review::Entity, review::Column::RecipeId))
                .equals((recipe::Entity, recipe::Column::Id)),
        )
        .to_owned();
    SimpleExpr::SubQuery(None, Box::new(SubQueryStatement::SelectStatement(avg)))
}
