pub mod catalog;
pub mod header;
pub mod notice_banner;
pub mod ticket_panel;
