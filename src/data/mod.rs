pub mod deriv;
pub mod provider;

pub use {
    deriv::DerivProvider,
    provider::{MarketDataProvider, ProviderError},
};
