//! Per-organ seed hierarchies.
//!
//! Each organ table lists the fixed anatomical terms that frame an ASCT+B
//! sheet before any row is read. Entries are `(identifier, label, parent)`;
//! a `None` parent attaches the entry to the body root. Parents always
//! precede their children.

/// One fixed anatomical term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTerm {
    /// Prefixed identifier, e.g. `UBERON:0002113`.
    pub id: &'static str,
    /// Preferred label.
    pub label: &'static str,
    /// Prefixed identifier of the partonomy parent, or `None` for body.
    pub parent: Option<&'static str>,
}

/// The fixed hierarchy for one organ.
#[derive(Debug, Clone, Copy)]
pub struct OrganSeed {
    /// Organ name as used by ASCT+B sheet names (lowercase).
    pub organ: &'static str,
    /// Terms, parents first.
    pub terms: &'static [SeedTerm],
}

const fn term(id: &'static str, label: &'static str, parent: Option<&'static str>) -> SeedTerm {
    SeedTerm { id, label, parent }
}

const KIDNEY: &str = "UBERON:0002113";
const LUNG: &str = "UBERON:0002048";
const HEART: &str = "UBERON:0000948";
const INTESTINE: &str = "UBERON:0000160";
const EYE: &str = "UBERON:0000970";

/// All seed tables.
pub static ORGANS: &[OrganSeed] = &[
    OrganSeed {
        organ: "kidney",
        terms: &[
            term(KIDNEY, "kidney", None),
            term("UBERON:0004538", "left kidney", Some(KIDNEY)),
            term("UBERON:0004539", "right kidney", Some(KIDNEY)),
        ],
    },
    OrganSeed {
        organ: "lung",
        terms: &[
            term("UBERON:0001004", "respiratory system", None),
            term(LUNG, "lung", Some("UBERON:0001004")),
            term("UBERON:0002168", "left lung", Some(LUNG)),
            term("UBERON:0002167", "right lung", Some(LUNG)),
        ],
    },
    OrganSeed {
        organ: "heart",
        terms: &[
            term(HEART, "heart", None),
            term("UBERON:0002084", "heart left ventricle", Some(HEART)),
            term("UBERON:0002080", "heart right ventricle", Some(HEART)),
        ],
    },
    OrganSeed {
        organ: "spleen",
        terms: &[term("UBERON:0002106", "spleen", None)],
    },
    OrganSeed {
        organ: "brain",
        terms: &[term("UBERON:0000955", "brain", None)],
    },
    OrganSeed {
        organ: "liver",
        terms: &[term("UBERON:0002107", "liver", None)],
    },
    OrganSeed {
        organ: "thymus",
        terms: &[term("UBERON:0002370", "thymus", None)],
    },
    OrganSeed {
        organ: "skin",
        terms: &[term("UBERON:0002097", "skin of body", None)],
    },
    OrganSeed {
        organ: "pancreas",
        terms: &[term("UBERON:0001264", "pancreas", None)],
    },
    OrganSeed {
        organ: "urinary bladder",
        terms: &[term("UBERON:0001255", "urinary bladder", None)],
    },
    OrganSeed {
        organ: "ureter",
        terms: &[
            term("UBERON:0000056", "ureter", None),
            term("UBERON:0001222", "right ureter", Some("UBERON:0000056")),
            term("UBERON:0001223", "left ureter", Some("UBERON:0000056")),
        ],
    },
    OrganSeed {
        organ: "lymph node",
        terms: &[term("UBERON:0000029", "lymph node", None)],
    },
    OrganSeed {
        organ: "large intestine",
        terms: &[
            term(INTESTINE, "intestine", None),
            term("UBERON:0000059", "large intestine", Some(INTESTINE)),
        ],
    },
    OrganSeed {
        organ: "small intestine",
        terms: &[
            term(INTESTINE, "intestine", None),
            term("UBERON:0002108", "small intestine", Some(INTESTINE)),
        ],
    },
    OrganSeed {
        organ: "eye",
        terms: &[
            term(EYE, "eye", None),
            term("UBERON:0004548", "left eye", Some(EYE)),
            term("UBERON:0004549", "right eye", Some(EYE)),
        ],
    },
];

/// Looks up the seed table for an organ name (case-insensitive).
#[must_use]
pub fn for_organ(organ: &str) -> Option<&'static OrganSeed> {
    let organ = organ.trim();
    ORGANS.iter().find(|s| s.organ.eq_ignore_ascii_case(organ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Identifier;

    #[test]
    fn organ_names_unique() {
        let mut names = std::collections::HashSet::new();
        for seed in ORGANS {
            assert!(names.insert(seed.organ), "Duplicate organ: {}", seed.organ);
        }
    }

    #[test]
    fn identifiers_parse() {
        for seed in ORGANS {
            for t in seed.terms {
                assert!(Identifier::parse(t.id).is_some(), "Bad id {}", t.id);
            }
        }
    }

    #[test]
    fn parents_precede_children() {
        for seed in ORGANS {
            for (i, t) in seed.terms.iter().enumerate() {
                if let Some(parent) = t.parent {
                    assert!(
                        seed.terms[..i].iter().any(|p| p.id == parent),
                        "{}: parent {} of {} not declared earlier",
                        seed.organ,
                        parent,
                        t.id
                    );
                }
            }
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(for_organ(" Kidney ").map(|s| s.organ), Some("kidney"));
        assert!(for_organ("tail").is_none());
    }
}
