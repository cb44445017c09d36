//! Command implementations.

pub mod scan;
pub mod serve;

pub use self::scan::execute_scan;
pub use self::serve::execute_serve;
