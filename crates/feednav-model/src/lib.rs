//! Navigation model for the transit feed editor.
//!
//! - [`PageState`]: the page the user is on
//! - [`NavigationEvent`]: a committed transition between pages
//! - [`BreadcrumbItem`]: one labelled step from home to the current page
//! - [`codec`]: round-trippable URL query encoding

pub mod codec;
pub mod error;
pub mod event;
pub mod page_state;

pub use codec::{QueryParams, decode, encode, encode_url};
pub use error::{ModelError, Result};
pub use event::{BreadcrumbItem, HOME_LABEL, NavigationEvent};
pub use page_state::{PageKind, PageState};
