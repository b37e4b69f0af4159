mod diff;
mod merge;
mod validate;

pub use diff::{diff, DiffResult, FamilyMetadata, MetadataChange, SamplesByFamily};
pub use merge::{families_by_name, identities_by_family, samples_by_family};
pub use validate::{validate, DuplicateSample, ValidationResult};
