//! Copy-on-write update engine.
//!
//! `produce` hands an editor a private working copy of the base state and
//! freezes the result into a new `Arc`. States keep their large collections
//! behind `Arc` so the shallow clone is cheap; an editor that touches such a
//! collection calls `Arc::make_mut`, which copies it only because the base
//! still holds a reference. Untouched collections stay shared between the old
//! and the new snapshot.

use std::sync::Arc;

/// Apply `editor` to a draft of `base` and return the resulting snapshot.
///
/// - `base` is never mutated.
/// - On error the draft is dropped and the error returned; nothing is produced.
/// - If the draft ends up equal to `base`, `base` itself is returned so callers
///   can detect a no-op with `Arc::ptr_eq`.
pub fn produce<S, E, F>(base: &Arc<S>, editor: F) -> Result<Arc<S>, E>
where
    S: Clone + PartialEq,
    F: FnOnce(&mut S) -> Result<(), E>,
{
    let mut draft = S::clone(base);
    editor(&mut draft)?;

    if draft == **base {
        return Ok(Arc::clone(base));
    }

    Ok(Arc::new(draft))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        title: String,
        tags: Arc<Vec<String>>,
    }

    fn doc() -> Arc<Doc> {
        Arc::new(Doc {
            title: "draft".into(),
            tags: Arc::new(vec!["a".into(), "b".into()]),
        })
    }

    #[test]
    fn base_is_not_mutated() {
        let base = doc();
        let next = produce(&base, |d: &mut Doc| {
            d.title = "final".into();
            Arc::make_mut(&mut d.tags).push("c".into());
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(base.title, "draft");
        assert_eq!(base.tags.len(), 2);
        assert_eq!(next.title, "final");
        assert_eq!(next.tags.len(), 3);
        assert!(!Arc::ptr_eq(&base, &next));
    }

    #[test]
    fn untouched_collections_are_shared() {
        let base = doc();
        let next = produce(&base, |d: &mut Doc| {
            d.title = "renamed".into();
            Ok::<(), ()>(())
        })
        .unwrap();

        assert!(Arc::ptr_eq(&base.tags, &next.tags));
    }

    #[test]
    fn noop_editor_returns_base() {
        let base = doc();
        let next = produce(&base, |_d: &mut Doc| Ok::<(), ()>(())).unwrap();
        assert!(Arc::ptr_eq(&base, &next));
    }

    #[test]
    fn failing_editor_discards_draft() {
        let base = doc();
        let result = produce(&base, |d: &mut Doc| {
            d.title = "half-written".into();
            Err("boom")
        });

        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(base.title, "draft");
    }
}
