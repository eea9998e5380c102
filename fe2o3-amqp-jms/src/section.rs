//! Lazy-section-creation primitives shared by every setter in the facade.
//!
//! A section is created only when a non-default value is assigned to one of
//! its fields; setting a field back to its default on a message that already
//! owns the section clears that field but never deletes the section. These
//! two helpers make that rule auditable at each call site instead of being
//! reimplemented ad hoc per setter.

/// Mutates the section's field if the section already exists; materializes
/// the section first only when `creates_section` is true.
///
/// `creates_section` should be computed from the *incoming* value before this
/// is called (typically `value != default`), so the caller decides once
/// whether the write is allowed to bring the section into existence.
pub(crate) fn with_section_field<S: Default>(
    slot: &mut Option<S>,
    creates_section: bool,
    mutate: impl FnOnce(&mut S),
) {
    match slot {
        Some(section) => mutate(section),
        None => {
            if creates_section {
                let mut section = S::default();
                mutate(&mut section);
                *slot = Some(section);
            }
        }
    }
}

/// Reads a field through its section, or returns `default` if the section is
/// absent. Reads never create a section.
pub(crate) fn section_opt<S, R>(slot: &Option<S>, default: R, read: impl FnOnce(&S) -> R) -> R {
    match slot {
        Some(section) => read(section),
        None => default,
    }
}
