//! wai-aria - WAI-ARIA attribute mediation
//!
//! Keeps typed accessibility state and the `aria-*` attributes of an
//! element converged. Values written through the API are coerced to each
//! property's canonical form and pushed into the DOM; external attribute
//! mutations are pulled back in through an explicit sync step, with the
//! element's own writes suppressed so they never echo.
//!
//! `AriaElement` is the front door; `PropertyFactory` owns the vocabulary;
//! `Mediator` binds one typed value to one attribute.

pub mod attribute;
pub mod element;
pub mod error;
pub mod factory;
pub mod mediator;
pub mod observer;
pub mod reference;
pub mod value;

pub use attribute::{AriaAttribute, Attribute, AttributeAccess};
pub use element::AriaElement;
pub use error::AriaError;
pub use factory::{Override, PropertyFactory};
pub use mediator::Mediator;
pub use observer::{EventBus, ListenerId};
pub use reference::ElementRef;
pub use value::{Input, PropertyKind, PropertyValue, State, TokenList, Value};
