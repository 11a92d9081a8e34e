pub mod countries;
pub mod symbology;

pub use countries::*;
pub use symbology::*;
