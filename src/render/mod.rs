//! Turning computed values into final page text.
//!
//! [`render`] fills `{name}` tokens in a template. [`normalize`] and
//! [`zero_pad`] prepare individual values before they go into the
//! [`Placeholders`] map.

mod template;
mod vocabulary;

pub use template::{Placeholders, render};
pub use vocabulary::{normalize, zero_pad};
