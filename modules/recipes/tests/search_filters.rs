#![cfg(feature = "sqlite")]

mod common;

use common::*;
use recipes::{
    error::RecipesError,
    model::{RecipeTag, UnitOfMeasure},
    search::{FilterKey, Operator, SearchFilter, SearchRequest},
};
use serde_json::{json, Value};

async fn search_names(book: &Cookbook, request: SearchRequest) -> Vec<String> {
    let page = book.api.search(request, 0, Some(100)).await.unwrap();
    name_set(&page.items).into_iter().map(str::to_string).collect()
}

#[tokio::test]
async fn empty_request_lists_everything_newest_first() {
    let book = cookbook().await;
    let page = book.api.search(SearchRequest::new(), 0, Some(10)).await.unwrap();

    assert_eq!(
        names(&page.items),
        ["Tomato soup", "Chocolate cake", "Fruit salad", "Rye bread"]
    );
    assert_eq!(page.page_info.total_elements, 4);
    assert_eq!(page.page_info.total_pages, 1);
}

#[tokio::test]
async fn tags_any_all_none() {
    let book = cookbook().await;
    let tags = |op, values: &[&str]| {
        SearchRequest::new().filter(SearchFilter::set(FilterKey::Tags, op, values.to_vec()))
    };

    assert_eq!(
        search_names(&book, tags(Operator::Any, &["DESSERT", "CAKE"])).await,
        ["Chocolate cake", "Fruit salad"]
    );
    assert_eq!(
        search_names(&book, tags(Operator::All, &["DESSERT", "CAKE"])).await,
        ["Chocolate cake"]
    );
    assert_eq!(
        search_names(&book, tags(Operator::None, &["BREAD"])).await,
        ["Chocolate cake", "Fruit salad", "Tomato soup"]
    );
    // Repeated values collapse before the ALL count.
    assert_eq!(
        search_names(&book, tags(Operator::All, &["Dessert", "dessert", "CAKE"])).await,
        ["Chocolate cake"]
    );
}

#[tokio::test]
async fn ingredients_any_all_none() {
    let book = cookbook().await;
    let ingredients = |op, ids: &[uuid::Uuid]| {
        SearchRequest::new().filter(SearchFilter::set(
            FilterKey::Ingredients,
            op,
            ids.iter().map(|id| id.to_string()),
        ))
    };

    assert_eq!(
        search_names(&book, ingredients(Operator::All, &[FLOUR, SUGAR])).await,
        ["Chocolate cake"]
    );
    assert_eq!(
        search_names(&book, ingredients(Operator::Any, &[EGG, SUGAR])).await,
        ["Chocolate cake", "Fruit salad"]
    );
    assert_eq!(
        search_names(&book, ingredients(Operator::None, &[FLOUR])).await,
        ["Fruit salad", "Tomato soup"]
    );
}

#[tokio::test]
async fn average_rating_excludes_unreviewed_recipes() {
    let book = cookbook().await;
    let request = SearchRequest::new().filter(SearchFilter::scalar(
        FilterKey::AverageRating,
        Operator::Gte,
        4.0,
    ));
    // Cake averages exactly 4.0 from [5, 3]; the bread has no reviews.
    assert_eq!(
        search_names(&book, request).await,
        ["Chocolate cake", "Tomato soup"]
    );

    let everything = SearchRequest::new().filter(SearchFilter::scalar(
        FilterKey::AverageRating,
        Operator::Gte,
        0,
    ));
    assert_eq!(
        search_names(&book, everything).await,
        ["Chocolate cake", "Fruit salad", "Tomato soup"]
    );
}

#[tokio::test]
async fn numeric_bounds_are_inclusive() {
    let book = cookbook().await;
    let servings = |op, v: i64| {
        SearchRequest::new().filter(SearchFilter::scalar(FilterKey::Servings, op, v))
    };

    assert_eq!(
        search_names(&book, servings(Operator::Gte, 4)).await,
        ["Chocolate cake", "Fruit salad", "Tomato soup"]
    );
    assert_eq!(
        search_names(&book, servings(Operator::Lte, 4)).await,
        ["Fruit salad", "Rye bread", "Tomato soup"]
    );
    assert_eq!(
        search_names(&book, servings(Operator::Equal, 4)).await,
        ["Fruit salad", "Tomato soup"]
    );

    let prep = SearchRequest::new().filter(SearchFilter::scalar(
        FilterKey::PrepTime,
        Operator::Lte,
        15,
    ));
    assert_eq!(search_names(&book, prep).await, ["Fruit salad", "Tomato soup"]);

    let cook = SearchRequest::new().filter(SearchFilter::scalar(
        FilterKey::CookTime,
        Operator::Gte,
        45,
    ));
    assert_eq!(search_names(&book, cook).await, ["Chocolate cake", "Rye bread"]);
}

#[tokio::test]
async fn fractional_thresholds_are_not_rounded() {
    let book = cookbook().await;
    let servings = |op, v: f64| {
        SearchRequest::new().filter(SearchFilter::scalar(FilterKey::Servings, op, v))
    };

    assert_eq!(
        search_names(&book, servings(Operator::Gte, 2.5)).await,
        ["Chocolate cake", "Fruit salad", "Tomato soup"]
    );
    assert_eq!(
        search_names(&book, servings(Operator::Lte, 3.5)).await,
        ["Rye bread"]
    );
    assert!(search_names(&book, servings(Operator::Equal, 4.5))
        .await
        .is_empty());
}

#[tokio::test]
async fn combined_filters_intersect() {
    let book = cookbook().await;
    let request = SearchRequest::new()
        .filter(SearchFilter::set(FilterKey::Tags, Operator::Any, ["Dessert"]))
        .filter(SearchFilter::scalar(FilterKey::Servings, Operator::Lte, 4));
    assert_eq!(search_names(&book, request).await, ["Fruit salad"]);

    let disjoint = SearchRequest::new()
        .filter(SearchFilter::set(FilterKey::Tags, Operator::All, ["Bread"]))
        .filter(SearchFilter::scalar(FilterKey::AverageRating, Operator::Gte, 1));
    let page = book.api.search(disjoint, 0, None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.page_info.total_elements, 0);
    assert_eq!(page.page_info.total_pages, 0);
}

#[tokio::test]
async fn text_filters_match_substrings_ignoring_case() {
    let book = cookbook().await;
    let by = |key, op, v: &str| SearchRequest::new().filter(SearchFilter::scalar(key, op, v));

    assert_eq!(
        search_names(&book, by(FilterKey::Name, Operator::Like, "CAKE")).await,
        ["Chocolate cake"]
    );
    assert_eq!(
        search_names(&book, by(FilterKey::Description, Operator::Like, "soup")).await,
        ["Tomato soup"]
    );
    // '%' is literal, not a wildcard.
    assert_eq!(
        search_names(&book, by(FilterKey::Description, Operator::Like, "70%")).await,
        ["Chocolate cake"]
    );
    assert!(
        search_names(&book, by(FilterKey::Description, Operator::Like, "0%c"))
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn author_filters() {
    let book = cookbook().await;
    let by = |op, v: &str| SearchRequest::new().filter(SearchFilter::scalar(FilterKey::Author, op, v));

    assert_eq!(
        search_names(&book, by(Operator::Like, "AN")).await,
        ["Chocolate cake", "Rye bread"]
    );
    assert_eq!(
        search_names(&book, by(Operator::Equal, "bob")).await,
        ["Fruit salad", "Tomato soup"]
    );
    assert!(search_names(&book, by(Operator::Equal, "Bob")).await.is_empty());
    assert_eq!(
        search_names(&book, by(Operator::NotEqual, "ana")).await,
        ["Fruit salad", "Tomato soup"]
    );
}

#[tokio::test]
async fn ownership_flags_need_a_user_and_true() {
    let book = cookbook().await;
    let flag = |key, v: Value| SearchRequest::new().filter(SearchFilter::scalar(key, Operator::Equal, v));

    assert_eq!(
        search_names(&book, flag(FilterKey::OwnedByUser, json!(true)).for_user(ANA)).await,
        ["Chocolate cake", "Rye bread"]
    );
    assert_eq!(
        search_names(&book, flag(FilterKey::FavoritedByUser, json!(true)).for_user(ANA)).await,
        ["Fruit salad", "Tomato soup"]
    );
    assert_eq!(
        search_names(&book, flag(FilterKey::FavoritedByUser, json!(true)).for_user(BOB)).await,
        ["Chocolate cake"]
    );

    // No user, or a false flag: no constraint.
    assert_eq!(
        search_names(&book, flag(FilterKey::OwnedByUser, json!(true))).await.len(),
        4
    );
    assert_eq!(
        search_names(&book, flag(FilterKey::OwnedByUser, json!(false)).for_user(ANA))
            .await
            .len(),
        4
    );

    // The operator is not interpreted.
    let odd = SearchRequest::new()
        .for_user(ANA)
        .filter(SearchFilter::scalar(FilterKey::OwnedByUser, Operator::Lte, true));
    assert_eq!(search_names(&book, odd).await, ["Chocolate cake", "Rye bread"]);
}

#[tokio::test]
async fn unsupported_operator_is_a_bad_request() {
    let book = cookbook().await;
    for (key, op, value) in [
        (FilterKey::Name, Operator::Equal, json!("Rye bread")),
        (FilterKey::AverageRating, Operator::Lte, json!(3)),
        (FilterKey::Servings, Operator::Like, json!(4)),
        (FilterKey::Author, Operator::Any, json!("ana")),
    ] {
        let request = SearchRequest::new().filter(SearchFilter::scalar(key, op, value));
        match book.api.search(request, 0, None).await {
            Err(RecipesError::BadRequest { message }) => {
                assert!(message.contains(op.as_str()), "{message}");
                assert!(message.contains(key.as_str()), "{message}");
            }
            other => panic!("{key}/{op}: expected BadRequest, got {other:?}"),
        }
    }

    let tags = SearchRequest::new().filter(SearchFilter::set(FilterKey::Tags, Operator::Equal, ["Pie"]));
    assert!(matches!(
        book.api.search(tags, 0, None).await,
        Err(RecipesError::BadRequest { .. })
    ));
}

#[tokio::test]
async fn malformed_values_are_bad_requests() {
    let book = cookbook().await;
    for filter in [
        SearchFilter::scalar(FilterKey::Servings, Operator::Gte, "lots"),
        SearchFilter::scalar(FilterKey::AverageRating, Operator::Gte, json!([4])),
        SearchFilter::scalar(FilterKey::Name, Operator::Like, 7),
        SearchFilter::scalar(FilterKey::OwnedByUser, Operator::Equal, "yes"),
        SearchFilter::set(FilterKey::Tags, Operator::Any, ["Brunch"]),
        SearchFilter::set(FilterKey::Ingredients, Operator::All, ["not-a-uuid"]),
    ] {
        let request = SearchRequest::new().for_user(ANA).filter(filter.clone());
        assert!(
            matches!(
                book.api.search(request, 0, None).await,
                Err(RecipesError::BadRequest { .. })
            ),
            "{filter:?}"
        );
    }
}

#[tokio::test]
async fn empty_values_are_inert() {
    let book = cookbook().await;
    let request = SearchRequest::new()
        .filter(SearchFilter::set(FilterKey::Tags, Operator::All, Vec::<String>::new()))
        .filter(SearchFilter::scalar(FilterKey::Ingredients, Operator::None, Value::Null))
        .filter(SearchFilter::scalar(FilterKey::Servings, Operator::Gte, Value::Null))
        .filter(SearchFilter::scalar(FilterKey::Name, Operator::Like, ""));
    let page = book.api.search(request, 0, None).await.unwrap();
    assert_eq!(page.page_info.total_elements, 4);
}

#[tokio::test]
async fn records_are_hydrated() {
    let book = cookbook().await;
    let request = SearchRequest::new().filter(SearchFilter::scalar(
        FilterKey::Name,
        Operator::Like,
        "chocolate",
    ));
    let page = book.api.search(request, 0, None).await.unwrap();
    let cake = &page.items[0];

    assert_eq!(cake.id, CAKE);
    assert_eq!(cake.author_id, ANA);
    assert_eq!(cake.author_username.as_deref(), Some("ana"));
    assert_eq!(cake.tags, [RecipeTag::Dessert, RecipeTag::Cake]);
    assert_eq!(cake.average_rating, Some(4.0));
    assert_eq!(cake.favorited_by, [BOB]);

    let lines: Vec<_> = cake
        .ingredients
        .iter()
        .map(|i| (i.ingredient_name.as_str(), i.quantity, i.unit))
        .collect();
    assert_eq!(
        lines,
        [
            ("Flour", 200, UnitOfMeasure::Gram),
            ("Sugar", 150, UnitOfMeasure::Gram),
            ("Egg", 3, UnitOfMeasure::TeaSpoon),
        ]
    );

    let bread = SearchRequest::new().filter(SearchFilter::scalar(FilterKey::Name, Operator::Like, "rye"));
    let page = book.api.search(bread, 0, None).await.unwrap();
    assert_eq!(page.items[0].average_rating, None);
    assert!(page.items[0].favorited_by.is_empty());
}

#[tokio::test]
async fn request_json_drives_the_search() {
    let book = cookbook().await;
    let request: SearchRequest = serde_json::from_value(json!({
        "userId": ANA,
        "filters": [
            { "key": "favoriteRecipes", "operator": "equal", "value": true },
            { "key": "averageRating", "operator": "gte", "value": 4 }
        ],
        "sort": { "key": "name", "direction": "desc" }
    }))
    .unwrap();
    let page = book.api.search(request, 0, None).await.unwrap();
    assert_eq!(names(&page.items), ["Tomato soup"]);
}
