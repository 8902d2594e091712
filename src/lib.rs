pub mod auction;
pub mod bidding;
pub mod catalog;
pub mod database;
pub mod handlers;
pub mod moderation;
pub mod payment;
pub mod profile;
pub mod query;
pub mod scheduler;
pub mod watchlist;
