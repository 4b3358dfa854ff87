//! cuba-adapter-postgres - PostgreSQL 适配器

mod connection;

pub use connection::*;
