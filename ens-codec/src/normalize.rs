//! Label normalization boundary.
//!
//! Full ENS normalization (ENSIP-15) is a large, table-driven profile that
//! lives outside this crate. Everything that hashes a literal label goes
//! through a [`Normalize`] implementation so callers can plug one in.

use std::fmt;

use crate::error::NormalizeError;

/// Normalizes a single label before it is hashed.
///
/// Implementations receive one label at a time, never a dotted name, and
/// never an Encoded Label.
pub trait Normalize: Send + Sync + fmt::Debug {
    /// Return the normalized form of `label`.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizeError`] if the label is disallowed by the profile.
    fn normalize(&self, label: &str) -> Result<String, NormalizeError>;
}

/// A minimal normalizer: lower-cases and rejects characters that can never
/// appear in a normalized label.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicNormalizer;

impl Normalize for BasicNormalizer {
    fn normalize(&self, label: &str) -> Result<String, NormalizeError> {
        if let Some(c) = label
            .chars()
            .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '.' | '[' | ']'))
        {
            return Err(NormalizeError::new(
                label,
                format!("disallowed character {c:?}"),
            ));
        }
        Ok(label.to_lowercase())
    }
}

impl<N: Normalize + ?Sized> Normalize for &N {
    fn normalize(&self, label: &str) -> Result<String, NormalizeError> {
        (**self).normalize(label)
    }
}

impl<N: Normalize + ?Sized> Normalize for std::sync::Arc<N> {
    fn normalize(&self, label: &str) -> Result<String, NormalizeError> {
        (**self).normalize(label)
    }
}
