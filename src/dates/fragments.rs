//! Fragment matching across one or several dates.
//!
//! A PIN is split into fixed segment layouts; when every segment is a
//! fragment of some provided date the PIN leaks those dates even though no
//! single template produced it (e.g. the owner's birth day followed by the
//! anniversary day).

use std::collections::{BTreeSet, HashMap, HashSet};

use super::components::{DateComponents, extract_components_by_length};
use crate::types::{DateSource, PinLength};

const FOUR_DIGIT_LAYOUTS: &[&[usize]] = &[&[2, 2]];
const SIX_DIGIT_LAYOUTS: &[&[usize]] = &[&[2, 2, 2], &[2, 4], &[4, 2]];

pub fn layouts_for(length: PinLength) -> &'static [&'static [usize]] {
    match length {
        PinLength::Four => FOUR_DIGIT_LAYOUTS,
        PinLength::Six => SIX_DIGIT_LAYOUTS,
    }
}

/// Fragments of one date, indexed by fragment length.
#[derive(Debug, Clone)]
pub struct FragmentIndex {
    source: DateSource,
    by_length: HashMap<usize, HashSet<String>>,
}

impl FragmentIndex {
    pub fn new(source: DateSource, components: &DateComponents) -> Self {
        let by_length = [2, 4]
            .into_iter()
            .map(|len| {
                let fragments = extract_components_by_length(components, len)
                    .into_iter()
                    .collect();
                (len, fragments)
            })
            .collect();
        Self { source, by_length }
    }

    pub fn source(&self) -> DateSource {
        self.source
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.by_length
            .get(&fragment.len())
            .is_some_and(|set| set.contains(fragment))
    }
}

/// Returns every date source contributing a segment to some layout that
/// fully covers `pin`. Empty when no layout is covered.
pub fn fragment_sources(pin: &str, length: PinLength, indexes: &[FragmentIndex]) -> BTreeSet<DateSource> {
    let mut sources = BTreeSet::new();
    if indexes.is_empty() || pin.len() != length.as_usize() {
        return sources;
    }

    for layout in layouts_for(length) {
        let mut offset = 0;
        let mut layout_sources = BTreeSet::new();
        let mut covered = true;

        for &width in layout.iter() {
            let segment = &pin[offset..offset + width];
            offset += width;

            let matching: Vec<_> = indexes
                .iter()
                .filter(|index| index.contains(segment))
                .map(FragmentIndex::source)
                .collect();
            if matching.is_empty() {
                covered = false;
                break;
            }
            layout_sources.extend(matching);
        }

        if covered {
            sources.append(&mut layout_sources);
        }
    }

    sources
}
