pub mod bcp47;
pub mod deferred;

// Reexporting the mappers for easier access
pub use bcp47::{Bcp47Mapper, quote_alias};
pub use deferred::{Deferred, SideTable};
