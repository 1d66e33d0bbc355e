pub mod credentials;
pub mod deployment;
pub mod values;

pub use credentials::*;
pub use deployment::*;
pub use values::*;
