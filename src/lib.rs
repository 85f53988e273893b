#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod render;
pub mod tags;
pub mod text_metrics;
pub mod theme;
pub mod tokenizer;

pub use config::{Config, load_config};
pub use layout::{ApproxMeasure, Cloud, CloudLayouter, FontMeasure, LayoutError, compute_cloud};
pub use render::render_svg;
pub use tags::{Tag, build_tags};
pub use theme::Theme;
pub use tokenizer::count_words;

#[cfg(feature = "cli")]
pub use cli::run;
