pub mod entity;

pub use entity::Report;
