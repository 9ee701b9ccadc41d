// src/utils.rs

// Web-Mercator stops being useful past this latitude
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Projects a latitude onto the Mercator y axis, in degrees so that it shares
/// a scale with longitude.
pub fn mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln().to_degrees()
}

/// Degrees of longitude shown across the map at a slippy-map zoom level.
pub fn visible_span(zoom: u8) -> f64 {
    720.0 / 2f64.powi(i32::from(zoom))
}

/// Tile providers ship their attribution as HTML; we only draw plain text.
pub fn plain_attribution(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&copy;", "©").replace("&amp;", "&")
}
