//! Blacklodge marketing site: page models, the i18n engine, and the demo
//! server that renders translated pages.

pub mod config;
pub mod dom;
pub mod i18n;
pub mod pages;
pub mod server;
pub mod storage;
pub mod swiss;
