//! URL query codec for [`PageState`].
//!
//! Encoding emits the minimal parameter set for a variant. Decoding never
//! fails: anything it cannot make sense of becomes [`PageState::Home`].
//!
//! Decoding priority:
//!
//! 1. `stop`
//! 2. `route` + `service` (timetable, with optional `direction`)
//! 3. `route`
//! 4. `service`
//! 5. `agency`
//! 6. home
//!
//! An `agency` parameter next to `route` is accepted and ignored because the
//! owning agency is derivable from the route.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::page_state::PageState;

pub const PARAM_STOP: &str = "stop";
pub const PARAM_AGENCY: &str = "agency";
pub const PARAM_ROUTE: &str = "route";
pub const PARAM_SERVICE: &str = "service";
pub const PARAM_DIRECTION: &str = "direction";

const KNOWN_PARAMS: &[&str] = &[
    PARAM_STOP,
    PARAM_AGENCY,
    PARAM_ROUTE,
    PARAM_SERVICE,
    PARAM_DIRECTION,
];

/// Encode a page state as a query string without the leading `?`.
///
/// Home encodes to the empty string.
pub fn encode(state: &PageState) -> String {
    let pairs: Vec<(&str, &str)> = match state {
        PageState::Home => Vec::new(),
        PageState::Agency { agency_id } => vec![(PARAM_AGENCY, agency_id.as_str())],
        PageState::Route { route_id } => vec![(PARAM_ROUTE, route_id.as_str())],
        PageState::Timetable {
            route_id,
            service_id,
            direction_id,
        } => {
            let mut pairs = vec![
                (PARAM_ROUTE, route_id.as_str()),
                (PARAM_SERVICE, service_id.as_str()),
            ];
            if let Some(direction) = direction_id {
                pairs.push((PARAM_DIRECTION, direction.as_str()));
            }
            pairs
        }
        PageState::Stop { stop_id } => vec![(PARAM_STOP, stop_id.as_str())],
        PageState::Service { service_id } => vec![(PARAM_SERVICE, service_id.as_str())],
    };
    pairs
        .into_iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encode a page state as a location relative to `base_path`.
///
/// `encode_url("/editor", &PageState::route("R1"))` yields `/editor?route=R1`.
pub fn encode_url(base_path: &str, state: &PageState) -> String {
    let query = encode(state);
    let base = if base_path.is_empty() { "/" } else { base_path };
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

/// Decode a query string, a `?query`, or a full relative location.
pub fn decode(input: &str) -> PageState {
    match QueryParams::parse(input) {
        Some(params) => params.to_page_state(),
        None => PageState::Home,
    }
}

/// Known navigation parameters extracted from a query string.
///
/// Empty values are treated as absent. Unknown parameters are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<&'static str, String>,
}

impl QueryParams {
    /// Parse the query part of `input`.
    ///
    /// Returns `None` when the input is unparseable (bad percent-encoding)
    /// or contradictory (a known parameter repeated with different values).
    pub fn parse(input: &str) -> Option<Self> {
        let query = query_part(input);
        let mut values: BTreeMap<&'static str, String> = BTreeMap::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key)?;
            let Some(known) = KNOWN_PARAMS.iter().copied().find(|name| *name == key) else {
                continue;
            };
            let value = decode_component(raw_value)?;
            if value.is_empty() {
                continue;
            }
            match values.get(known) {
                Some(existing) if *existing != value => return None,
                Some(_) => {}
                None => {
                    values.insert(known, value.into_owned());
                }
            }
        }
        Some(Self { values })
    }

    /// Value of a known parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Check whether no known parameter is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Apply the decoding priority rules.
    pub fn to_page_state(&self) -> PageState {
        if let Some(stop) = self.get(PARAM_STOP) {
            return PageState::stop(stop);
        }
        match (self.get(PARAM_ROUTE), self.get(PARAM_SERVICE)) {
            (Some(route), Some(service)) => {
                return PageState::timetable(
                    route,
                    service,
                    self.get(PARAM_DIRECTION).map(str::to_string),
                );
            }
            (Some(route), None) => return PageState::route(route),
            (None, Some(service)) => return PageState::service(service),
            (None, None) => {}
        }
        match self.get(PARAM_AGENCY) {
            Some(agency) => PageState::agency(agency),
            None => PageState::Home,
        }
    }
}

/// Strip any path prefix and fragment, leaving the raw query.
fn query_part(input: &str) -> &str {
    let without_fragment = input.split_once('#').map_or(input, |(head, _)| head);
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        // A bare location such as "/editor" carries no query.
        None if without_fragment.starts_with('/') => "",
        None => without_fragment,
    }
}

fn decode_component(raw: &str) -> Option<Cow<'_, str>> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        urlencoding::decode(&spaced)
            .ok()
            .map(|value| Cow::Owned(value.into_owned()))
    } else {
        urlencoding::decode(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_minimal_parameters() {
        assert_eq!(encode(&PageState::Home), "");
        assert_eq!(encode(&PageState::agency("A1")), "agency=A1");
        assert_eq!(encode(&PageState::stop("S 1")), "stop=S%201");
        assert_eq!(
            encode(&PageState::timetable("R1", "WK", Some("0".into()))),
            "route=R1&service=WK&direction=0"
        );
    }

    #[test]
    fn query_part_handles_locations() {
        assert_eq!(query_part("/editor?route=R1#map"), "route=R1");
        assert_eq!(query_part("?stop=S"), "stop=S");
        assert_eq!(query_part("stop=S"), "stop=S");
        assert_eq!(query_part("/editor"), "");
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(decode("stop=Main+St"), PageState::stop("Main St"));
    }
}
