// Pedantic: suppress noise for internal crate code.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod app;
pub mod backend;
pub mod color;
pub mod components;
pub mod config;
pub mod engine;
pub mod filter;
pub mod gate;
pub mod limits;
pub mod navigation;
pub mod pager;
pub mod settings;
pub mod theme;
pub mod types;
pub mod util;
pub mod views;
