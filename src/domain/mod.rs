pub mod capability;
pub mod user;
pub mod product;
pub mod order;
pub mod cart;

pub use capability::*;
pub use user::*;
pub use product::*;
pub use order::*;
pub use cart::*;
