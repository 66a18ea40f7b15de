//! Domain model types

pub mod draft;

pub use draft::EstimateDraft;
