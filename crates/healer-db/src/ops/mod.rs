//! Operations on a [`MongoStore`](crate::MongoStore), one file per layer.

pub mod collections;
pub mod databases;
pub mod documents;
pub mod index;
pub mod targets;
