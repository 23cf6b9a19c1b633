pub mod types;

pub use types::{Greeks, MarketSnapshot, OptionQuote, OptionType, OptionsChain};
