//! REST API endpoint implementations.
//!
//! Endpoint functions are free functions over a `reqwest::Client`, the
//! normalized base URL and the raw token; `HubClient` supplies all three.

mod events;
mod logging;
mod request;
mod servers;
pub mod url_encoding;

pub use events::{pending_spawners_stream, progress_stream, stop_notifications_stream};
pub use logging::{
    create_log_handler, delete_log_handler, get_log_handler, list_log_handlers, update_log_handler,
};
pub use request::send_request;
pub use servers::{
    cancel_server, delete_server, get_user, progress_status, spawn_url, start_server, stop_server,
    update_server_options,
};
pub use url_encoding::{encode_path_segment, encode_query_component, url_path_join};
