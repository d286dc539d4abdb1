//! Authentication: bearer token service and per-request auth gate

pub mod gate;
pub mod token;

pub use gate::{AuthContext, auth_gate, authenticate};
pub use token::{Claims, TokenService};
