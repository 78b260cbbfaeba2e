pub mod use_catalog;
pub mod use_notice;
pub mod use_ticket;
