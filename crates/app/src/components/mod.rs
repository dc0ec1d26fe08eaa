pub mod address_autocomplete;
pub mod route_map;

pub use address_autocomplete::AddressAutocomplete;
pub use route_map::RouteMap;
