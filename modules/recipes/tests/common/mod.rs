//! Shared fixture: an in-memory SQLite cookbook with four recipes.
//!
//! | recipe         | author | tags           | servings | prep | cook | ratings | ingredients         |
//! |----------------|--------|----------------|----------|------|------|---------|---------------------|
//! | Chocolate cake | ana    | Dessert, Cake  | 8        | 30   | 45   | 5, 3    | flour, sugar, egg   |
//! | Fruit salad    | bob    | Dessert        | 4        | 15   | 0    | 2       | sugar               |
//! | Rye bread      | ana    | Bread          | 2        | 20   | 60   | -       | flour               |
//! | Tomato soup    | bob    | Soup           | 4        | 10   | 30   | 4, 5    | -                   |
//!
//! Creation order (oldest first): Rye bread, Fruit salad, Chocolate cake, Tomato soup.
//! ana favorites Fruit salad and Tomato soup; bob favorites Chocolate cake.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use cookbook_db::{ConnectOpts, DbHandle};
use recipes::{
    client::RecipesApi,
    config::RecipesConfig,
    infra::storage::entity::{
        favorite, ingredient, recipe, recipe_ingredient, recipe_tag, review, user,
    },
    model::Recipe,
    Recipes,
};
use sea_orm::{DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

pub const ANA: Uuid = Uuid::from_u128(0xA1);
pub const BOB: Uuid = Uuid::from_u128(0xB0);

pub const FLOUR: Uuid = Uuid::from_u128(0x1001);
pub const SUGAR: Uuid = Uuid::from_u128(0x1002);
pub const EGG: Uuid = Uuid::from_u128(0x1003);

pub const CAKE: Uuid = Uuid::from_u128(0x2001);
pub const SALAD: Uuid = Uuid::from_u128(0x2002);
pub const BREAD: Uuid = Uuid::from_u128(0x2003);
pub const SOUP: Uuid = Uuid::from_u128(0x2004);

pub struct Cookbook {
    pub db: DbHandle,
    pub api: Arc<dyn RecipesApi>,
}

impl Cookbook {
    pub fn conn(&self) -> DatabaseConnection {
        self.db.sea()
    }
}

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().unwrap() + Duration::minutes(minutes)
}

/// Migrated, empty database.
pub async fn empty_cookbook() -> Cookbook {
    let db = DbHandle::connect(
        "sqlite::memory:",
        ConnectOpts {
            max_conns: Some(1),
            ..Default::default()
        },
    )
    .await
    .expect("connect in-memory sqlite");
    Recipes::migrate(&db).await.expect("run migrations");
    let api = Recipes::from_handle(&db, RecipesConfig::default()).client();
    Cookbook { db, api }
}

pub async fn cookbook() -> Cookbook {
    let book = empty_cookbook().await;
    seed(&book.conn()).await;
    book
}

pub async fn add_user(conn: &DatabaseConnection, id: Uuid, username: &str) {
    user::Entity::insert(user::ActiveModel {
        id: Set(id),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
    })
    .exec_without_returning(conn)
    .await
    .unwrap();
}

pub async fn add_ingredient(conn: &DatabaseConnection, id: Uuid, name: &str) {
    ingredient::Entity::insert(ingredient::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        default_unit_of_measure: Set("gram".to_string()),
    })
    .exec_without_returning(conn)
    .await
    .unwrap();
}

pub struct NewRecipe<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub author: Uuid,
    pub servings: i32,
    pub prep: i64,
    pub cook: i64,
    pub created_minute: i64,
    pub tags: &'a [&'a str],
    pub ingredients: &'a [(Uuid, i32, &'a str)],
    pub ratings: &'a [(Uuid, i32)],
}

pub async fn add_recipe(conn: &DatabaseConnection, r: NewRecipe<'_>) {
    recipe::Entity::insert(recipe::ActiveModel {
        id: Set(r.id),
        name: Set(r.name.to_string()),
        description: Set(r.description.map(str::to_string)),
        servings: Set(Some(r.servings)),
        preparation_time: Set(Some(r.prep)),
        cooking_time: Set(Some(r.cook)),
        created_at: Set(at(r.created_minute)),
        edited_at: Set(None),
        author_id: Set(r.author),
    })
    .exec_without_returning(conn)
    .await
    .unwrap();

    for tag in r.tags {
        recipe_tag::Entity::insert(recipe_tag::ActiveModel {
            recipe_id: Set(r.id),
            tag: Set(tag.to_string()),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    for (position, (ingredient_id, quantity, unit)) in r.ingredients.iter().enumerate() {
        recipe_ingredient::Entity::insert(recipe_ingredient::ActiveModel {
            recipe_id: Set(r.id),
            ingredient_id: Set(*ingredient_id),
            quantity: Set(*quantity),
            unit: Set(unit.to_string()),
            position: Set(position as i32),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }

    for (author_id, rating) in r.ratings {
        review::Entity::insert(review::ActiveModel {
            recipe_id: Set(r.id),
            author_id: Set(*author_id),
            rating: Set(*rating),
            comment: Set(None),
            review_date: Set(at(r.created_minute + 60)),
        })
        .exec_without_returning(conn)
        .await
        .unwrap();
    }
}

pub async fn add_favorite(conn: &DatabaseConnection, user_id: Uuid, recipe_id: Uuid) {
    favorite::Entity::insert(favorite::ActiveModel {
        user_id: Set(user_id),
        recipe_id: Set(recipe_id),
    })
    .exec_without_returning(conn)
    .await
    .unwrap();
}

pub async fn seed(conn: &DatabaseConnection) {
    add_user(conn, ANA, "ana").await;
    add_user(conn, BOB, "bob").await;

    add_ingredient(conn, FLOUR, "Flour").await;
    add_ingredient(conn, SUGAR, "Sugar").await;
    add_ingredient(conn, EGG, "Egg").await;

    add_recipe(
        conn,
        NewRecipe {
            id: CAKE,
            name: "Chocolate cake",
            description: Some("Dark and moist, 70% cocoa"),
            author: ANA,
            servings: 8,
            prep: 30,
            cook: 45,
            created_minute: 3,
            tags: &["Dessert", "Cake"],
            ingredients: &[(FLOUR, 200, "gram"), (SUGAR, 150, "gram"), (EGG, 3, "teaSpoon")],
            ratings: &[(ANA, 5), (BOB, 3)],
        },
    )
    .await;
    add_recipe(
        conn,
        NewRecipe {
            id: SALAD,
            name: "Fruit salad",
            description: Some("Seasonal fruit"),
            author: BOB,
            servings: 4,
            prep: 15,
            cook: 0,
            created_minute: 2,
            tags: &["Dessert"],
            ingredients: &[(SUGAR, 1, "tableSpoon")],
            ratings: &[(ANA, 2)],
        },
    )
    .await;
    add_recipe(
        conn,
        NewRecipe {
            id: BREAD,
            name: "Rye bread",
            description: None,
            author: ANA,
            servings: 2,
            prep: 20,
            cook: 60,
            created_minute: 1,
            tags: &["Bread"],
            ingredients: &[(FLOUR, 1, "kg")],
            ratings: &[],
        },
    )
    .await;
    add_recipe(
        conn,
        NewRecipe {
            id: SOUP,
            name: "Tomato soup",
            description: Some("Quick weeknight soup"),
            author: BOB,
            servings: 4,
            prep: 10,
            cook: 30,
            created_minute: 4,
            tags: &["Soup"],
            ingredients: &[],
            ratings: &[(ANA, 4), (BOB, 5)],
        },
    )
    .await;

    add_favorite(conn, ANA, SALAD).await;
    add_favorite(conn, ANA, SOUP).await;
    add_favorite(conn, BOB, CAKE).await;
}

pub fn names(items: &[Recipe]) -> Vec<&str> {
    items.iter().map(|r| r.name.as_str()).collect()
}

/// Names in alphabetical order, for set comparisons.
pub fn name_set(items: &[Recipe]) -> Vec<&str> {
    let mut n = names(items);
    n.sort_unstable();
    n
}
