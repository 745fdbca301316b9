//! Exchange rates: stored records, resolution ordering, fallback seeds,
//! and the online provider client.

pub mod conversion;
pub mod fallback;
pub mod fetcher;
pub mod rate;

#[cfg(test)]
mod props;

pub use conversion::convert_amount;
pub use fallback::fallback_rate;
pub use fetcher::{FetchError, HttpRateFetcher, RateFetcher};
pub use rate::{
    ConversionResult, ExchangeRate, RateLookup, RateProvenance, RateSource, rates_diverge,
    resolve_rate,
};
