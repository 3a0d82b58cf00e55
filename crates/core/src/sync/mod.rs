//! Pure rules of the sync engine: the status protocol, the display window,
//! failure messages and temporary identifiers. The engine itself lives in
//! the client crate.

mod ids;
mod status;

pub use ids::{is_temporary_id, temporary_id, TEMP_ID_LEN, TEMP_ID_PREFIX};
pub use status::{
    fetch_failure_status, visible_status, write_failure_message, SyncOutcome, SyncStatus,
    CONNECT_FAILURE_MESSAGE, DEFAULT_STATUS_WINDOW,
};
