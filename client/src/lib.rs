mod app;
mod dom;
mod loader;
mod render;
mod state;
mod surface;
mod toolbar;

pub use app::run;
