// stepline_project/demos/checkout_app/src/models/mod.rs
pub mod order;
pub mod payment;
pub mod product;
pub mod user;
