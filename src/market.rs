//! The marketplace browsing service: category navigation, professional
//! listings and the profile/review view.

mod command;
mod message;
mod service;
mod view;

pub use message::MarketMsg;
pub use service::Marketplace;
