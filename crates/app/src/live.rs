use dioxus::core::spawn_forever;
use dioxus::prelude::*;
use shared_types::{FeatureFlags, LocationPing};

/// Maximum consecutive poll errors before the loop stops.
/// The user can reopen the view to restart the subscription.
#[allow(dead_code)]
const MAX_CONSECUTIVE_ERRORS: u32 = 10;

/// Subscribe to live location updates for one manifest.
///
/// Joins the manifest's channel on mount, long-polls in a client-only
/// coroutine, and releases the subscription when the view unmounts. The
/// returned signal carries the freshest ping, which views merge into the
/// displayed "last reported location" without a reload.
///
/// During SSR the coroutine would block the render thread because server
/// functions execute as direct calls, so the loop only runs on the
/// hydrated client.
#[allow(unused_variables, unused_mut)]
pub fn use_live_location(manifest_id: Option<String>) -> Signal<Option<LocationPing>> {
    let mut latest = use_signal(|| None::<LocationPing>);
    let flags: FeatureFlags = use_context();
    let enabled = flags.live_updates;

    let id_for_loop = manifest_id.clone();
    use_coroutine(move |_: UnboundedReceiver<()>| {
        let manifest_id = id_for_loop.clone();
        async move {
            #[cfg(feature = "server")]
            return;

            #[cfg(not(feature = "server"))]
            {
                let Some(manifest_id) = manifest_id else {
                    return;
                };
                if !enabled {
                    return;
                }
                if server::api::join_manifest_channel(manifest_id.clone())
                    .await
                    .is_err()
                {
                    return;
                }

                let mut after_seq = 0u64;
                let mut consecutive_errors: u32 = 0;

                loop {
                    match server::api::poll_location_update(manifest_id.clone(), after_seq).await
                    {
                        Ok(Some(ping)) => {
                            consecutive_errors = 0;
                            after_seq = ping.seq;
                            latest.set(Some(ping));
                        }
                        Ok(None) => {
                            // Long-poll timeout — immediately poll again
                            consecutive_errors = 0;
                        }
                        Err(_) => {
                            consecutive_errors += 1;
                            if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                                break;
                            }
                        }
                    }
                }
            }
        }
    });

    use_drop(move || {
        #[cfg(not(feature = "server"))]
        {
            if let (true, Some(manifest_id)) = (enabled, manifest_id.clone()) {
                spawn_forever(async move {
                    let _ = server::api::leave_manifest_channel(manifest_id).await;
                });
            }
        }
    });

    latest
}
