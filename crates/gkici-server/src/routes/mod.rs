pub mod analytics;
pub mod artikel;
pub mod dashboard;
pub mod health;
pub mod informasi;
pub mod media;
pub mod shalom;
pub mod warta;
