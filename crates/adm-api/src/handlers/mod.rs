pub mod applications;
pub mod console;
pub mod session;
pub mod universities;
