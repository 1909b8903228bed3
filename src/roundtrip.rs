//! Round-trip verification.
//!
//! A legacy document survives the mappers when
//!
//! ```text
//! normalize(D) ≡ normalize(write(read(normalize(D))))
//! ```
//!
//! where `≡` is order-insensitive element equivalence. A mismatch means
//! either a normalization rule is missing or a mapper drops something; it
//! is a diagnostic, never raised from the mapping paths themselves.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::base::XmlElement;
use crate::error::{MappingError, Result};
use crate::from_legacy::FromLegacy;
use crate::legacy::{Datastream, LegacyObject};
use crate::normalize::Normalizer;
use crate::to_legacy::ToLegacy;
use crate::vocab::Vocabulary;

/// Runs documents through read, write and normalize.
#[derive(Debug, Clone, Copy)]
pub struct RoundtripValidator<'v> {
    vocab: &'v Vocabulary,
}

impl<'v> RoundtripValidator<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        Self { vocab }
    }
}

impl Default for RoundtripValidator<'static> {
    fn default() -> Self {
        Self::new(Vocabulary::standard())
    }
}

impl RoundtripValidator<'_> {
    /// Verify one datastream document. Mapping failures propagate as they
    /// are; a successful mapping that does not reproduce the document is a
    /// `RoundtripMismatch`.
    pub fn check(&self, document: &XmlElement, object_id: &str) -> Result<()> {
        let normalizer = Normalizer::new(self.vocab);
        let original = normalizer.normalize(document, object_id);
        let datastream = Datastream::from_root(original.local_name()).ok_or_else(|| {
            MappingError::unmappable("unknown", format!("unrecognized root <{}>", original.name))
        })?;

        let fragment = FromLegacy::new(self.vocab).build_fragment(&original, object_id)?;
        let mut written = LegacyObject::new(object_id);
        ToLegacy::new(self.vocab).apply(&fragment, &mut written)?;
        let rewritten = written
            .take(datastream)
            .map(|document| normalizer.normalize(&document, object_id))
            .unwrap_or_else(|| XmlElement::new(datastream.root()));

        match original.describe_difference(&rewritten) {
            None => {
                debug!(object_id, datastream = datastream.name(), "round trip ok");
                Ok(())
            }
            Some(diff) => Err(MappingError::RoundtripMismatch {
                datastream: datastream.name(),
                diff,
            }),
        }
    }

    pub fn verify(&self, document: &XmlElement, object_id: &str) -> bool {
        match self.check(document, object_id) {
            Ok(()) => true,
            Err(error) => {
                warn!(object_id, %error, "round trip failed");
                false
            }
        }
    }

    /// Verify every datastream an object carries.
    pub fn check_object(&self, legacy: &LegacyObject) -> RoundtripReport {
        let results = Datastream::ALL
            .into_iter()
            .filter_map(|datastream| {
                legacy
                    .get(datastream)
                    .map(|document| (datastream, self.check(document, &legacy.pid)))
            })
            .collect();
        RoundtripReport {
            pid: legacy.pid.clone(),
            results,
        }
    }

    /// Verify independent objects in parallel, one report per object in input order.
    pub fn verify_all(&self, objects: &[LegacyObject]) -> Vec<RoundtripReport> {
        objects
            .par_iter()
            .map(|legacy| self.check_object(legacy))
            .collect()
    }
}

/// Outcome of verifying one object.
#[derive(Debug)]
pub struct RoundtripReport {
    pub pid: String,
    pub results: Vec<(Datastream, Result<()>)>,
}

impl RoundtripReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|(_, result)| result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (Datastream, &MappingError)> {
        self.results
            .iter()
            .filter_map(|(datastream, result)| result.as_ref().err().map(|e| (*datastream, e)))
    }
}

/// Verify with the standard vocabulary.
pub fn verify(document: &XmlElement, object_id: &str) -> bool {
    RoundtripValidator::default().verify(document, object_id)
}

/// Batch-verify with the standard vocabulary.
pub fn verify_all(objects: &[LegacyObject]) -> Vec<RoundtripReport> {
    RoundtripValidator::default().verify_all(objects)
}
