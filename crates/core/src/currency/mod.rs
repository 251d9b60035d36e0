//! Monetary collection utilities: aggregation, distribution, percentage
//! calculations, and free-text amount parsing.

pub mod distribution;
pub mod parse;

#[cfg(test)]
mod distribution_props;

pub use distribution::{
    DistributionError, average, discount, distribute, max, min, percentage, sum, tax,
};
pub use parse::parse_amount;
