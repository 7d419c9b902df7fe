pub mod commission_math;
pub mod commissions;
pub mod enums;
pub mod items;
pub mod order_transitions;
pub mod orders;
pub mod payments;
pub mod reviews;
pub mod talent_products;
pub mod users;
