pub mod commissions;
pub mod items;
pub mod orders;
pub mod payment_gateway;
pub mod payments;
pub mod reviews;
pub mod talent_products;
pub mod users;
pub mod wishlists;
