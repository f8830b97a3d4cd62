pub mod poster;
pub mod scrape;
pub mod serve;
