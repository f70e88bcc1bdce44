//! Login against the marketplace backend and the client-side session it produces.

mod form;
mod login;
mod routes;
mod session;
mod transport;

pub use form::*;
pub use login::*;
pub use routes::*;
pub use session::*;
pub use transport::*;
