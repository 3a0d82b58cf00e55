mod error;
mod traits;
mod types;

pub use error::{GatewayError, Result};
pub use traits::Gateway;
pub use types::{
    fields_of, Action, GatewayRequest, GatewayResponse, ResponseStatus, Snapshot, UnknownAction,
};
