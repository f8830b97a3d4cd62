pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

pub fn poster() -> LogCtx<ops::poster::Poster> { LogCtx::new(config::logs_are_json()) }
pub fn scrape() -> LogCtx<ops::scrape::Scrape> { LogCtx::new(config::logs_are_json()) }
pub fn serve() -> LogCtx<ops::serve::Serve> { LogCtx::new(config::logs_are_json()) }
