//! Sample gemtext documents
//!
//! Embedded from `samples/` at the crate root so tests do not depend on the working
//! directory.

use crate::gemtext::loader::DocumentLoader;

const SAMPLES: &[(&str, &str)] = &[
    ("capsule", include_str!("../../../samples/capsule.gmi")),
    ("preformatted", include_str!("../../../samples/preformatted.gmi")),
    ("lists", include_str!("../../../samples/lists.gmi")),
];

/// Names of all embedded samples.
pub fn names() -> impl Iterator<Item = &'static str> {
    SAMPLES.iter().map(|(name, _)| *name)
}

/// Source text of a sample. Panics on an unknown name.
pub fn source(name: &str) -> &'static str {
    SAMPLES
        .iter()
        .find(|(sample, _)| *sample == name)
        .map(|(_, source)| *source)
        .unwrap_or_else(|| panic!("unknown sample {name:?}"))
}

pub fn load(name: &str) -> DocumentLoader {
    DocumentLoader::from_string(source(name))
}
