pub mod audit;
pub mod config;
pub mod conservation;
pub mod entry;
pub mod food_chain;
pub mod journal;
pub mod links;
pub mod normalize;
pub mod paths;
pub mod record;
pub mod stats;
pub mod storage;
pub mod util;
pub mod warn;
