#![allow(clippy::excessive_precision)]

pub mod error;
pub mod legendre;
pub mod prelude;
pub mod quad;
pub mod report;
pub mod result;
pub mod symbolic;
#[cfg(test)]
pub(crate) mod test_utils;
