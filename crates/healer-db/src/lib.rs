pub mod hierarchy;
pub mod inventory;
pub mod json;
pub mod ops;
pub mod store;

pub use mongodb::bson::Document;
pub use store::MongoStore;
