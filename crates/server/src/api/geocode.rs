use dioxus::prelude::*;
use shared_types::AddressSuggestion;

/// Public geocoding service used for address lookup. Unauthenticated and
/// rate-limited; every call here is best-effort.
#[cfg(feature = "server")]
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim requires an identifying User-Agent.
#[cfg(feature = "server")]
const LOOKUP_USER_AGENT: &str = concat!("fleetdeck/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "server")]
#[derive(serde::Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

/// Address autocomplete. Failures and disabled geocoding yield an empty
/// list — the autocomplete UI degrades silently.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn search_addresses(query: String) -> Result<Vec<AddressSuggestion>, ServerFnError> {
    if !crate::config::feature_flags().geocoding || query.trim().len() < 3 {
        return Ok(Vec::new());
    }

    let url = format!(
        "{NOMINATIM_URL}/search?format=json&limit=5&q={}",
        urlencoding::encode(query.trim())
    );

    let places = match fetch_places(&url).await {
        Ok(places) => places,
        Err(e) => {
            tracing::debug!(error = %e, "Address search failed");
            return Ok(Vec::new());
        }
    };

    Ok(places
        .into_iter()
        .filter_map(|p| {
            Some(AddressSuggestion {
                display_name: p.display_name,
                latitude: p.lat.parse().ok()?,
                longitude: p.lon.parse().ok()?,
            })
        })
        .collect())
}

/// Resolve coordinates into a display address. Failures yield `None`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn reverse_geocode(latitude: f64, longitude: f64) -> Result<Option<String>, ServerFnError> {
    if !crate::config::feature_flags().geocoding {
        return Ok(None);
    }

    let url = format!("{NOMINATIM_URL}/reverse?format=json&lat={latitude}&lon={longitude}");

    #[derive(serde::Deserialize)]
    struct ReverseResult {
        display_name: Option<String>,
    }

    let result = async {
        reqwest::Client::new()
            .get(&url)
            .header(reqwest::header::USER_AGENT, LOOKUP_USER_AGENT)
            .send()
            .await?
            .error_for_status()?
            .json::<ReverseResult>()
            .await
    }
    .await;

    match result {
        Ok(r) => Ok(r.display_name),
        Err(e) => {
            tracing::debug!(error = %e, "Reverse geocode failed");
            Ok(None)
        }
    }
}

#[cfg(feature = "server")]
async fn fetch_places(url: &str) -> Result<Vec<NominatimPlace>, reqwest::Error> {
    reqwest::Client::new()
        .get(url)
        .header(reqwest::header::USER_AGENT, LOOKUP_USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NominatimPlace>>()
        .await
}
