//! Navigation steps for `feednav walk`.
//!
//! A step is `home`, `back`, `agency:A`, `route:R`, `stop:S`, `service:S` or
//! `timetable:R:S[:D]`. Single-identifier steps take everything after the
//! first colon, so their identifiers may contain colons; timetable
//! identifiers may not.

use std::fmt;
use std::str::FromStr;

use feednav_model::{ModelError, PageState};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Navigate(PageState),
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("unknown step '{0}' (expected home, back, agency, route, timetable, stop or service)")]
    UnknownKind(String),

    #[error("step '{step}' expects {expected}")]
    Arity {
        step: String,
        expected: &'static str,
    },

    #[error("step '{step}' is not a valid page")]
    Invalid {
        step: String,
        #[source]
        source: ModelError,
    },
}

impl FromStr for Step {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (kind, rest) = raw.split_once(':').unwrap_or((raw, ""));
        let arity = |expected: &'static str| StepError::Arity {
            step: raw.to_string(),
            expected,
        };

        let state = match kind.to_ascii_lowercase().as_str() {
            "back" if rest.is_empty() => return Ok(Self::Back),
            "home" if rest.is_empty() => PageState::Home,
            "back" | "home" => return Err(arity("no arguments")),
            "agency" => PageState::agency(rest),
            "route" => PageState::route(rest),
            "stop" => PageState::stop(rest),
            "service" => PageState::service(rest),
            "timetable" => {
                let mut parts = rest.splitn(3, ':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(route), Some(service), direction) => {
                        PageState::timetable(route, service, direction.map(str::to_string))
                    }
                    _ => return Err(arity("ROUTE:SERVICE[:DIRECTION]")),
                }
            }
            _ => return Err(StepError::UnknownKind(raw.to_string())),
        };

        state.validate().map_err(|source| StepError::Invalid {
            step: raw.to_string(),
            source,
        })?;
        Ok(Self::Navigate(state))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Back => f.write_str("back"),
            Self::Navigate(PageState::Home) => f.write_str("home"),
            Self::Navigate(PageState::Agency { agency_id }) => write!(f, "agency:{agency_id}"),
            Self::Navigate(PageState::Route { route_id }) => write!(f, "route:{route_id}"),
            Self::Navigate(PageState::Timetable {
                route_id,
                service_id,
                direction_id,
            }) => {
                write!(f, "timetable:{route_id}:{service_id}")?;
                if let Some(direction) = direction_id {
                    write!(f, ":{direction}")?;
                }
                Ok(())
            }
            Self::Navigate(PageState::Stop { stop_id }) => write!(f, "stop:{stop_id}"),
            Self::Navigate(PageState::Service { service_id }) => write!(f, "service:{service_id}"),
        }
    }
}

/// Parse every step, stopping at the first invalid one.
pub fn parse_steps<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Step>, StepError> {
    raw.iter().map(|step| step.as_ref().parse()).collect()
}
