#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod files;
mod github;
mod test_case;

pub use files::*;
pub use github::*;
pub use test_case::*;
