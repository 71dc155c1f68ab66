//! # Type registry
//!
//! Maps sentence type ids to the factory building the matching
//! [`MessageBody`]. Patterns are either an exact id (`PGRME`) or a
//! talker-independent wildcard (`--GGA`). Exact matches always win.
//!
//! The registry is an ordinary value: build it once at startup, usually from
//! [`builtin_variants`](crate::nmea_content::sentences::builtin_variants), and
//! hand it to the [`NmeaParserBuilder`](crate::NmeaParserBuilder).

use std::collections::HashMap;

use crate::{
    Error, MessageBody, Result, Sentence, nmea_content::sentences::builtin_variants,
    sentence::wildcard_id,
};

/// Builds a message body from a tokenized sentence.
pub type Factory = fn(&Sentence) -> Result<MessageBody>;

/// What [`TypeRegistry::register`] does when a pattern is already bound to a
/// different factory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    /// Keep the existing binding and fail with [`Error::DuplicateType`].
    #[default]
    Fail,
    /// Overwrite the existing binding.
    Replace,
}

/// A `(pattern, factory)` pair for bulk registration.
#[derive(Debug, Clone, Copy)]
pub struct VariantDescriptor {
    /// Exact type id (`PGRME`) or talker wildcard (`--GGA`)
    pub pattern: &'static str,
    /// Builds the body for sentences matching `pattern`
    pub factory: Factory,
}

impl VariantDescriptor {
    pub const fn new(pattern: &'static str, factory: Factory) -> Self {
        Self { pattern, factory }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    variants: HashMap<String, Factory>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in sentence variant.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for descriptor in builtin_variants() {
            registry
                .variants
                .insert(descriptor.pattern.to_string(), descriptor.factory);
        }
        registry
    }

    /// Binds `pattern` to `factory`.
    ///
    /// Re-registering the same factory under the same pattern is a no-op.
    ///
    /// ```rust
    /// use nmea0183_stream::{Error, MessageBody, OnConflict, TypeRegistry};
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.register("--XYZ", |_| Ok(MessageBody::Unknown), OnConflict::Fail).unwrap();
    /// assert!(registry.resolve("GPXYZ").is_some());
    /// ```
    pub fn register(
        &mut self,
        pattern: impl Into<String>,
        factory: Factory,
        on_conflict: OnConflict,
    ) -> Result<()> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(Error::MissingPattern);
        }

        match self.variants.get(&pattern) {
            Some(existing)
                if on_conflict == OnConflict::Fail && !std::ptr::fn_addr_eq(*existing, factory) =>
            {
                Err(Error::DuplicateType(pattern))
            }
            _ => {
                self.variants.insert(pattern, factory);
                Ok(())
            }
        }
    }

    /// Registers every descriptor and returns how many were registered.
    ///
    /// Stops at the first failure; descriptors before it stay registered.
    pub fn register_all<I>(&mut self, descriptors: I, on_conflict: OnConflict) -> Result<usize>
    where
        I: IntoIterator<Item = VariantDescriptor>,
    {
        let mut count = 0;
        for descriptor in descriptors {
            self.register(descriptor.pattern, descriptor.factory, on_conflict)?;
            count += 1;
        }
        Ok(count)
    }

    /// Finds the factory for a type id: the exact id first, then its wildcard form.
    pub fn resolve(&self, type_id: &str) -> Option<Factory> {
        self.variants.get(type_id).copied().or_else(|| {
            wildcard_id(type_id).and_then(|wildcard| self.variants.get(&wildcard).copied())
        })
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(_: &Sentence) -> Result<MessageBody> {
        Ok(MessageBody::Unknown)
    }

    fn failing(sentence: &Sentence) -> Result<MessageBody> {
        Err(Error::InvalidField {
            index: 0,
            value: sentence.type_id.clone(),
        })
    }

    fn build(factory: Factory, type_id: &str) -> Result<MessageBody> {
        factory(&Sentence::new(type_id, Vec::<String>::new()))
    }

    #[test]
    fn test_exact_wins_over_wildcard() {
        let mut registry = TypeRegistry::new();
        registry.register("--ABC", unknown, OnConflict::Fail).unwrap();
        registry.register("GPABC", failing, OnConflict::Fail).unwrap();

        let exact = registry.resolve("GPABC").unwrap();
        assert!(build(exact, "GPABC").is_err());

        let wildcard = registry.resolve("GNABC").unwrap();
        assert_eq!(build(wildcard, "GNABC"), Ok(MessageBody::Unknown));

        assert!(registry.resolve("GPABD").is_none());
        assert!(registry.resolve("ABC").is_none());
    }

    #[test]
    fn test_conflict_policy() {
        let mut registry = TypeRegistry::new();
        registry.register("--ABC", unknown, OnConflict::Fail).unwrap();

        // same factory again is fine
        assert_eq!(registry.register("--ABC", unknown, OnConflict::Fail), Ok(()));

        assert_eq!(
            registry.register("--ABC", failing, OnConflict::Fail),
            Err(Error::DuplicateType("--ABC".to_string()))
        );
        let kept = registry.resolve("GPABC").unwrap();
        assert!(build(kept, "GPABC").is_ok());

        registry.register("--ABC", failing, OnConflict::Replace).unwrap();
        let replaced = registry.resolve("GPABC").unwrap();
        assert!(build(replaced, "GPABC").is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_all() {
        let mut registry = TypeRegistry::new();
        let count = registry
            .register_all(
                [
                    VariantDescriptor::new("--AAA", unknown),
                    VariantDescriptor::new("--BBB", unknown),
                    VariantDescriptor::new("PXXXX", failing),
                ],
                OnConflict::Fail,
            )
            .unwrap();
        assert_eq!(count, 3);
        assert!(registry.resolve("PXXXX").is_some());

        assert_eq!(
            registry.register_all([VariantDescriptor::new("", unknown)], OnConflict::Replace),
            Err(Error::MissingPattern)
        );
    }

    #[test]
    fn test_register_all_conflict() {
        let mut registry = TypeRegistry::new();
        registry.register("--BBB", unknown, OnConflict::Fail).unwrap();

        let result = registry.register_all(
            [
                VariantDescriptor::new("--AAA", unknown),
                VariantDescriptor::new("--BBB", failing),
                VariantDescriptor::new("--CCC", unknown),
            ],
            OnConflict::Fail,
        );
        assert_eq!(result, Err(Error::DuplicateType("--BBB".to_string())));

        // descriptors before the conflict stay registered, later ones are not
        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("GPAAA").is_some());
        assert!(registry.resolve("GPCCC").is_none());
        let kept = registry.resolve("GPBBB").unwrap();
        assert_eq!(build(kept, "GPBBB"), Ok(MessageBody::Unknown));

        let count = registry
            .register_all(
                [
                    VariantDescriptor::new("--BBB", failing),
                    VariantDescriptor::new("--CCC", unknown),
                ],
                OnConflict::Replace,
            )
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(registry.len(), 3);
        assert!(build(registry.resolve("GPBBB").unwrap(), "GPBBB").is_err());
    }

    #[test]
    fn test_proprietary_ids_have_no_wildcard() {
        let mut registry = TypeRegistry::new();
        registry.register("--RMC", failing, OnConflict::Fail).unwrap();

        assert!(registry.resolve("GPRMC").is_some());
        assert!(registry.resolve("PGRMC").is_none());
    }

    #[test]
    fn test_builtin() {
        let registry = TypeRegistry::with_builtin();
        assert_eq!(registry.len(), builtin_variants().len());

        for type_id in ["GPGGA", "GNRMC", "HEHDT", "SDDBT", "PGRME", "PGRMZ", "GLGSV"] {
            assert!(registry.resolve(type_id).is_some(), "{type_id}");
        }
        assert!(registry.resolve("XXYYY").is_none());
        assert!(registry.resolve("PGRMX").is_none());
    }
}
