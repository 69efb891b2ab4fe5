pub mod analysis;
pub mod data;
pub mod error;
pub mod explode;
pub mod format;
pub mod rating;
pub mod stats;

pub mod q01;
pub mod q02;
pub mod q03;
pub mod q04;
pub mod q05;
pub mod q06;
pub mod q07;
pub mod q08;
pub mod q09;
pub mod q10;
pub mod q11;
pub mod q12;
pub mod q13;
pub mod q14;
pub mod q15;

#[cfg(test)]
mod testing;

pub use analysis::{Analysis, QueryContext, Report};
pub use data::{Kind, LoadOptions, NetflixData, Title};
pub use error::{NflxError, Result};
pub use format::{OutputFormat, ReportFormatter};
