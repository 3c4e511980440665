pub mod client;
pub mod interface;

pub use client::GlossServiceClient;
pub use interface::{ConversionRequest, GlossError, GlossInterface};
