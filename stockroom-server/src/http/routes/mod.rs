//! Route handlers organized by resource

pub mod info;
pub mod health;
pub mod items;
pub mod stores;
pub mod stock;
