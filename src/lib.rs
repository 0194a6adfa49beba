pub mod bench;
pub mod border;
pub mod boxmean;
pub mod config;
pub mod enums;
pub mod error;
pub mod filter;
pub mod grid;
pub mod histogram;
pub mod median8;
pub mod medianhist;
pub mod mediansort;
pub mod ordinal;
pub mod prelude;
pub mod sample;
