pub mod admin;
pub mod commissions;
pub mod items;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod talent_products;
pub mod users;
pub mod wishlists;
