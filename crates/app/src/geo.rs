//! Single-fix device geolocation.
//!
//! Wraps the browser Geolocation API in a future. One fix per explicit
//! user action — never a continuous watch.

/// A device GPS fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
}

/// Obtain a single position fix from the device.
///
/// Resolves with a user-presentable error message when the platform has no
/// geolocation support or the user denies permission.
#[cfg(feature = "web")]
pub async fn current_position() -> Result<GeoFix, String> {
    use futures::channel::oneshot;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let window = web_sys::window().ok_or("No window available")?;
    let geolocation = window
        .navigator()
        .geolocation()
        .map_err(|_| "Geolocation is not supported by your browser".to_string())?;

    let (tx, rx) = oneshot::channel::<Result<GeoFix, String>>();
    let tx = std::rc::Rc::new(std::cell::RefCell::new(Some(tx)));

    let success = {
        let tx = tx.clone();
        Closure::once(move |position: web_sys::Position| {
            let coords = position.coords();
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Ok(GeoFix {
                    latitude: coords.latitude(),
                    longitude: coords.longitude(),
                }));
            }
        })
    };

    let error = {
        let tx = tx.clone();
        Closure::once(move |_err: web_sys::PositionError| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err("Unable to retrieve your location".to_string()));
            }
        })
    };

    geolocation
        .get_current_position_with_error_callback(
            success.as_ref().unchecked_ref(),
            Some(error.as_ref().unchecked_ref()),
        )
        .map_err(|_| "Unable to request your location".to_string())?;

    // The closures must outlive the browser callback.
    success.forget();
    error.forget();

    rx.await
        .map_err(|_| "Location request was cancelled".to_string())?
}

/// Non-web builds have no device to ask.
#[cfg(not(feature = "web"))]
pub async fn current_position() -> Result<GeoFix, String> {
    Err("Geolocation is only available in the browser".to_string())
}
