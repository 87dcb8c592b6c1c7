mod category;
mod todo;

pub use category::*;
pub use todo::*;
