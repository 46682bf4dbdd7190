//! Conversions between external error types and `EnvTreeError`.

use figment::Error as FigmentError;

use super::EnvTreeError;

impl From<FigmentError> for EnvTreeError {
    fn from(e: FigmentError) -> Self {
        Self::Options(e.into())
    }
}

impl EnvTreeError {
    /// Construct an extraction error for `path` from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use envtree::EnvTreeError;
    /// let e = EnvTreeError::extract("db.port", figment::Error::from("boom"));
    /// assert!(matches!(e, EnvTreeError::Extract { .. }));
    /// ```
    #[must_use]
    pub fn extract(path: impl Into<String>, source: FigmentError) -> Self {
        Self::Extract {
            path: path.into(),
            source: Box::new(source),
        }
    }
}
