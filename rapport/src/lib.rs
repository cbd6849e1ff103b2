mod client;
mod rapport_url;

pub mod dev;
pub mod domain;
pub mod grid;
pub mod ports;
pub mod sort;

pub(crate) use rapport_url::*;

pub use client::*;
