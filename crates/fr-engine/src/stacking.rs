//! Stacking order — the smallest z-index that keeps the ring on top.
//!
//! Elements that overlap their siblings with `z-index` create stacking
//! contexts. A ring painted in the scope's container would slide underneath
//! such an element unless it sits one level above it. Only contexts between
//! the target and the container matter: anything above the container orders
//! the container as a whole, ring included.

use fr_color::css::parse_int_prefix;
use tracing::trace;

use crate::ancestry::Ancestry;

/// Compute the ring's z-index.
///
/// - An `explicit` z-index always wins.
/// - Otherwise the ancestry is walked nearest-first (target included). The
///   first entry with a numeric `z-index` yields that value plus one.
/// - The walk stops after examining `container`; if nothing numeric was
///   found by then, the ring gets no z-index.
///
/// Entries without a captured style never contribute.
#[must_use]
pub fn compute_z_index<N: Copy + Eq>(
    ancestry: &Ancestry<N>,
    container: Option<N>,
    explicit: Option<i64>,
) -> Option<i64> {
    if explicit.is_some() {
        return explicit;
    }

    for (depth, entry) in ancestry.iter().enumerate() {
        let z = entry.style.as_ref().and_then(|s| parse_int_prefix(&s.z_index));
        if let Some(z) = z {
            trace!(depth, z, "stacking context found");
            return Some(z.saturating_add(1));
        }
        if Some(entry.node) == container {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::AncestorEntry;
    use crate::document::ComputedStyle;
    use pretty_assertions::assert_eq;

    /// Build an ancestry of plain integer nodes 0, 1, 2, … with the given
    /// z-index strings.
    fn chain(z_indices: &[&str]) -> Ancestry<u32> {
        let entries = z_indices
            .iter()
            .zip(0u32..)
            .map(|(z, node)| AncestorEntry { node, style: Some(ComputedStyle::new().z_index(*z)) })
            .collect();
        Ancestry::from_entries(entries)
    }

    #[test]
    fn first_numeric_ancestor_plus_one() {
        // [auto, auto, 3, container]
        let ancestry = chain(&["auto", "auto", "3", "auto"]);
        assert_eq!(compute_z_index(&ancestry, Some(3), None), Some(4));
    }

    #[test]
    fn walk_stops_at_container() {
        // [auto, container, 5]
        let ancestry = chain(&["auto", "auto", "5"]);
        assert_eq!(compute_z_index(&ancestry, Some(1), None), None);
    }

    #[test]
    fn container_own_z_index_counts() {
        let ancestry = chain(&["auto", "10", "50"]);
        assert_eq!(compute_z_index(&ancestry, Some(1), None), Some(11));
    }

    #[test]
    fn target_z_index_counts() {
        let ancestry = chain(&["2", "auto"]);
        assert_eq!(compute_z_index(&ancestry, Some(1), None), Some(3));
    }

    #[test]
    fn negative_and_zero_are_numeric() {
        assert_eq!(compute_z_index(&chain(&["-1"]), None, None), Some(0));
        assert_eq!(compute_z_index(&chain(&["auto", "0"]), None, None), Some(1));
    }

    #[test]
    fn no_container_walks_whole_chain() {
        let ancestry = chain(&["auto", "auto", "auto", "7"]);
        assert_eq!(compute_z_index(&ancestry, None, None), Some(8));
    }

    #[test]
    fn nothing_numeric_is_none() {
        let ancestry = chain(&["auto", "", "inherit"]);
        assert_eq!(compute_z_index(&ancestry, None, None), None);
        assert_eq!(compute_z_index(&Ancestry::<u32>::default(), None, None), None);
    }

    #[test]
    fn explicit_always_wins() {
        let ancestry = chain(&["auto", "9", "auto"]);
        assert_eq!(compute_z_index(&ancestry, Some(2), Some(100)), Some(100));
        assert_eq!(compute_z_index(&ancestry, Some(0), Some(-5)), Some(-5));
        assert_eq!(compute_z_index(&Ancestry::<u32>::default(), None, Some(1)), Some(1));
    }

    #[test]
    fn unstyled_entries_are_skipped() {
        let entries = vec![
            AncestorEntry { node: 0u32, style: None },
            AncestorEntry { node: 1, style: Some(ComputedStyle::new().z_index("4")) },
        ];
        assert_eq!(compute_z_index(&Ancestry::from_entries(entries), None, None), Some(5));
    }

    #[test]
    fn saturates_at_max() {
        let max = i64::MAX.to_string();
        assert_eq!(compute_z_index(&chain(&[max.as_str()]), None, None), Some(i64::MAX));
    }
}
