//! Minimal terminal runtime: a tick/render event loop driving an [`App`].

pub use self::{app::App, event_loop::{RenderMode, rate_interval}, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
