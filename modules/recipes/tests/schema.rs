#![cfg(feature = "sqlite")]

mod common;

use common::*;
use recipes::{
    infra::storage::entity::{recipe_ingredient, recipe_tag, review},
    Recipes,
};
use sea_orm::{EntityTrait, Set};

#[tokio::test]
async fn migrations_are_idempotent() {
    let book = empty_cookbook().await;
    Recipes::migrate(&book.db).await.unwrap();
    book.db.ping().await.unwrap();
}

#[tokio::test]
async fn association_tables_reject_duplicates() {
    let book = cookbook().await;
    let conn = book.conn();

    let dup_tag = recipe_tag::Entity::insert(recipe_tag::ActiveModel {
        recipe_id: Set(CAKE),
        tag: Set("Dessert".to_string()),
    })
    .exec_without_returning(&conn)
    .await;
    assert!(dup_tag.is_err());

    let dup_line = recipe_ingredient::Entity::insert(recipe_ingredient::ActiveModel {
        recipe_id: Set(CAKE),
        ingredient_id: Set(FLOUR),
        quantity: Set(1),
        unit: Set("kg".to_string()),
        position: Set(9),
    })
    .exec_without_returning(&conn)
    .await;
    assert!(dup_line.is_err());

    let second_review = review::Entity::insert(review::ActiveModel {
        recipe_id: Set(CAKE),
        author_id: Set(ANA),
        rating: Set(1),
        comment: Set(None),
        review_date: Set(chrono::Utc::now()),
    })
    .exec_without_returning(&conn)
    .await;
    assert!(second_review.is_err());
}

#[tokio::test]
async fn ratings_outside_zero_to_five_are_rejected() {
    let book = cookbook().await;
    let out_of_range = review::Entity::insert(review::ActiveModel {
        recipe_id: Set(BREAD),
        author_id: Set(BOB),
        rating: Set(6),
        comment: Set(Some("too good".to_string())),
        review_date: Set(chrono::Utc::now()),
    })
    .exec_without_returning(&book.conn())
    .await;
    assert!(out_of_range.is_err());
}

#[tokio::test]
async fn unknown_stored_tag_is_an_internal_error() {
    let book = cookbook().await;
    recipe_tag::Entity::insert(recipe_tag::ActiveModel {
        recipe_id: Set(SOUP),
        tag: Set("Brunch".to_string()),
    })
    .exec_without_returning(&book.conn())
    .await
    .unwrap();

    let result = book
        .api
        .search(recipes::search::SearchRequest::new(), 0, None)
        .await;
    assert_eq!(result.unwrap_err(), recipes::error::RecipesError::Internal);
}
