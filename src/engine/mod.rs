// engine module: backend engine running off the UI thread

pub mod http;
mod interface;
pub mod stub;

pub use http::HttpEngine;
pub use interface::{Engine, EngineHandle, Event, Outcome, Request};
pub use stub::StubEngine;
