pub mod entity;
pub mod migrations;
pub mod sea_orm_repo;
pub mod search;

pub use sea_orm_repo::SeaOrmRecipesRepository;
