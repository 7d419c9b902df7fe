pub mod gateway;
pub mod postgres;
