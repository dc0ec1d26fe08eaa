use dioxus::prelude::*;
use shared_types::{GeoPoint, RoutePoint};

/// Embedded route map: origin, destination, and the freshest reported
/// position, framed in one bounding box. Tile rendering is the embed
/// provider's problem; with no coordinates to show, an inline placeholder
/// renders instead of a broken frame.
#[component]
pub fn RouteMap(
    #[props(default)] origin: Option<RoutePoint>,
    #[props(default)] destination: Option<RoutePoint>,
    #[props(default)] marker: Option<GeoPoint>,
) -> Element {
    let mut points: Vec<(f64, f64)> = Vec::new();
    if let Some(o) = &origin {
        points.push((o.latitude, o.longitude));
    }
    if let Some(d) = &destination {
        points.push((d.latitude, d.longitude));
    }
    if let Some(m) = &marker {
        points.push((m.latitude, m.longitude));
    }

    let Some(bbox) = bounding_box(&points) else {
        return rsx! {
            div { class: "route-map route-map-placeholder",
                p { "No location data to display yet." }
            }
        };
    };

    // Pin the freshest position when known, the destination otherwise.
    let pin = marker
        .as_ref()
        .map(|m| (m.latitude, m.longitude))
        .or_else(|| destination.as_ref().map(|d| (d.latitude, d.longitude)));

    let mut src = format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={:.5}%2C{:.5}%2C{:.5}%2C{:.5}&layer=mapnik",
        bbox.min_lon, bbox.min_lat, bbox.max_lon, bbox.max_lat
    );
    if let Some((lat, lon)) = pin {
        src.push_str(&format!("&marker={lat:.5}%2C{lon:.5}"));
    }

    rsx! {
        div { class: "route-map",
            iframe {
                src: "{src}",
                "loading": "lazy",
                referrerpolicy: "no-referrer",
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct BoundingBox {
    min_lat: f64,
    min_lon: f64,
    max_lat: f64,
    max_lon: f64,
}

/// Padding keeps single points and short routes from degenerating into a
/// zero-area box.
const BBOX_PADDING: f64 = 0.02;

fn bounding_box(points: &[(f64, f64)]) -> Option<BoundingBox> {
    let first = points.first()?;
    let mut bbox = BoundingBox {
        min_lat: first.0,
        min_lon: first.1,
        max_lat: first.0,
        max_lon: first.1,
    };
    for (lat, lon) in points.iter().skip(1) {
        bbox.min_lat = bbox.min_lat.min(*lat);
        bbox.min_lon = bbox.min_lon.min(*lon);
        bbox.max_lat = bbox.max_lat.max(*lat);
        bbox.max_lon = bbox.max_lon.max(*lon);
    }
    bbox.min_lat -= BBOX_PADDING;
    bbox.min_lon -= BBOX_PADDING;
    bbox.max_lat += BBOX_PADDING;
    bbox.max_lon += BBOX_PADDING;
    Some(bbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_points_has_no_box() {
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn single_point_gets_padded_box() {
        let bbox = bounding_box(&[(40.7, -74.0)]).unwrap();
        assert!(bbox.min_lat < 40.7 && bbox.max_lat > 40.7);
        assert!(bbox.min_lon < -74.0 && bbox.max_lon > -74.0);
    }

    #[test]
    fn box_covers_all_points() {
        let bbox = bounding_box(&[(40.7, -74.0), (41.2, -73.5), (40.9, -74.2)]).unwrap();
        assert!(bbox.min_lat <= 40.7 - BBOX_PADDING + f64::EPSILON);
        assert!(bbox.max_lat >= 41.2);
        assert!(bbox.min_lon <= -74.2);
        assert!(bbox.max_lon >= -73.5);
    }
}
