//! Data types shared by the print engine, the CLI and the WASM binding.

mod page;
mod range;
mod sheet;

pub use page::*;
pub use range::*;
pub use sheet::*;
