mod session;
pub use session::*;

mod trucks;
pub use trucks::*;

mod manifests;
pub use manifests::*;

mod geocode;
pub use geocode::*;

pub use crate::live::{join_manifest_channel, leave_manifest_channel, poll_location_update};
