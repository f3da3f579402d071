pub mod config;
pub mod logging;

pub mod api;
pub mod argument;
pub mod budget;
pub mod document;
pub mod driver;
pub mod error;
pub mod html;
pub mod index;
pub mod layout;
pub mod people;
pub mod pipeline;
pub mod sanitize;
pub mod transcript;
pub mod transport;
