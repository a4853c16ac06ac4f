//! SeaORM-backed recipes repository.
//!
//! A search runs as: compile the request, count and fetch one window of
//! recipe rows through the pagination executor, then hydrate the window's
//! related collections with one query per collection. All of it shares one
//! transaction so the total and the window see the same data.

use std::collections::HashMap;

use async_trait::async_trait;
use cookbook_db::paging::paginate_offset;
use sea_orm::{
    sea_query::{Expr, Func},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use search_core::{Page, PageRequest};
use tracing::debug;
use uuid::Uuid;

use crate::contract::model::{Recipe, RecipeIngredient, RecipeTag, UnitOfMeasure, UnknownVariant};
use crate::contract::search::SearchRequest;
use crate::domain::{error::DomainError, repo::RecipesRepository};
use crate::infra::storage::entity::{
    favorite, ingredient, recipe, recipe_ingredient, recipe_tag, review, user,
};
use crate::infra::storage::search::{compile, SearchBuildError};

impl From<SearchBuildError> for DomainError {
    fn from(e: SearchBuildError) -> Self {
        DomainError::malformed_search(e.to_string())
    }
}

pub struct SeaOrmRecipesRepository<C> {
    conn: C,
}

impl<C> SeaOrmRecipesRepository<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    rows: Vec<recipe::Model>,
) -> Result<Vec<Recipe>, DomainError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut author_ids: Vec<Uuid> = rows.iter().map(|r| r.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let mut tags = load_tags(conn, &ids).await?;
    let mut ingredients = load_ingredients(conn, &ids).await?;
    let averages = load_average_ratings(conn, &ids).await?;
    let mut favorites = load_favorites(conn, &ids).await?;
    let authors = load_usernames(conn, &author_ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| Recipe {
            author_username: authors.get(&row.author_id).cloned(),
            tags: tags.remove(&row.id).unwrap_or_default(),
            ingredients: ingredients.remove(&row.id).unwrap_or_default(),
            average_rating: averages.get(&row.id).copied(),
            favorited_by: favorites.remove(&row.id).unwrap_or_default(),
            id: row.id,
            name: row.name,
            description: row.description,
            servings: row.servings,
            preparation_time: row.preparation_time,
            cooking_time: row.cooking_time,
            created_at: row.created_at,
            edited_at: row.edited_at,
            author_id: row.author_id,
        })
        .collect())
}

async fn load_tags<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<RecipeTag>>, DomainError> {
    let rows = recipe_tag::Entity::find()
        .filter(recipe_tag::Column::RecipeId.is_in(ids.iter().copied()))
        .all(conn)
        .await?;

    let mut out: HashMap<Uuid, Vec<RecipeTag>> = HashMap::new();
    for row in rows {
        let tag: RecipeTag = row
            .tag
            .parse()
            .map_err(|e: UnknownVariant| DomainError::corrupt_record("recipe_tags", e.to_string()))?;
        out.entry(row.recipe_id).or_default().push(tag);
    }
    for tags in out.values_mut() {
        tags.sort_unstable();
    }
    Ok(out)
}

async fn load_ingredients<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<RecipeIngredient>>, DomainError> {
    let rows = recipe_ingredient::Entity::find()
        .filter(recipe_ingredient::Column::RecipeId.is_in(ids.iter().copied()))
        .order_by_asc(recipe_ingredient::Column::Position)
        .order_by_asc(recipe_ingredient::Column::IngredientId)
        .find_also_related(ingredient::Entity)
        .all(conn)
        .await?;

    let mut out: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for (line, ingredient) in rows {
        let ingredient = ingredient.ok_or_else(|| {
            DomainError::corrupt_record(
                "recipe_ingredients",
                format!("missing ingredient {}", line.ingredient_id),
            )
        })?;
        let unit: UnitOfMeasure = line
            .unit
            .parse()
            .map_err(|e: UnknownVariant| DomainError::corrupt_record("recipe_ingredients", e.to_string()))?;
        out.entry(line.recipe_id).or_default().push(RecipeIngredient {
            ingredient_id: ingredient.id,
            ingredient_name: ingredient.name,
            quantity: line.quantity,
            unit,
        });
    }
    Ok(out)
}

/// Mean rating per reviewed recipe, rounded to two decimals.
async fn load_average_ratings<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, f64>, DomainError> {
    let average = Expr::cust_with_expr(
        "CAST($1 AS DOUBLE PRECISION)",
        Func::avg(Expr::col((review::Entity, review::Column::Rating))),
    );
    let rows: Vec<(Uuid, Option<f64>)> = review::Entity::find()
        .select_only()
        .column(review::Column::RecipeId)
        .column_as(average, "average")
        .filter(review::Column::RecipeId.is_in(ids.iter().copied()))
        .group_by(review::Column::RecipeId)
        .into_tuple()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(id, avg)| avg.map(|v| (id, round2(v))))
        .collect())
}

async fn load_favorites<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Uuid>>, DomainError> {
    let rows = favorite::Entity::find()
        .filter(favorite::Column::RecipeId.is_in(ids.iter().copied()))
        .order_by_asc(favorite::Column::UserId)
        .all(conn)
        .await?;

    let mut out: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for row in rows {
        out.entry(row.recipe_id).or_default().push(row.user_id);
    }
    Ok(out)
}

async fn load_usernames<C: ConnectionTrait>(
    conn: &C,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, DomainError> {
    let rows = user::Entity::find()
        .filter(user::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|u| (u.id, u.username)).collect())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[async_trait]
impl<C> RecipesRepository for SeaOrmRecipesRepository<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync + 'static,
{
    async fn search_page(
        &self,
        request: &SearchRequest,
        page: PageRequest,
    ) -> Result<Page<Recipe>, DomainError> {
        let compiled = compile(request)?;
        let txn = self.conn.begin().await?;

        let rows = paginate_offset(
            recipe::Entity::find(),
            &txn,
            &compiled.predicate,
            compiled.sort.into_page_plan(),
            recipe::Column::Id,
            page,
        )
        .await?;

        debug!(
            rows = rows.items.len(),
            total = rows.page_info.total_elements,
            "Fetched recipe page"
        );

        let items = hydrate(&txn, rows.items).await?;
        txn.commit().await?;
        Ok(Page {
            items,
            page_info: rows.page_info,
        })
    }
}
