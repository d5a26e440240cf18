mod command;
mod constraints;
pub mod edit;
mod export;
mod filter;
mod generate;
mod regenerate;
mod rotation;
mod selector;
mod store;
mod types;

pub use command::*;
pub use constraints::*;
pub use export::*;
pub use filter::*;
pub use generate::*;
pub use regenerate::*;
pub use rotation::*;
pub use selector::*;
pub use store::*;
pub use types::*;
