//! Data model for the SDS register.
//!
//! A [`Substance`] is one Safety Data Sheet record: the substance name, its
//! producer, the date of the sheet, a reference link, free-form notes, and
//! the GHS hazard pictogram codes printed on the sheet. Records are built
//! through [`SubstanceDraft`] and rendered with the helpers in
//! [`pictogram`].

pub mod pictogram;
pub mod substance;

pub use pictogram::{glyph_for, join_codes, split_codes};
pub use substance::{Substance, SubstanceDraft};
