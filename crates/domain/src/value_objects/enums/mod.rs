pub mod commission_statuses;
pub mod escrow_statuses;
pub mod item_statuses;
pub mod order_statuses;
pub mod order_types;
pub mod payment_methods;
pub mod payment_statuses;
pub mod sort_order;
pub mod talent_statuses;
pub mod user_roles;
