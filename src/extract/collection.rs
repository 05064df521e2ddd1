//! Child-shape collection across the member names readers use.

use crate::native::{attr, Children, ShapeContainer};

/// Gather the children of a page or shape.
///
/// Probes `shapes`, `child_shapes` and `sub_shapes` in that order and
/// concatenates whatever each yields. A failing member contributes nothing.
/// Overlapping collections are not deduplicated.
pub fn collect_children<C>(obj: &C) -> Children<'_>
where
    C: ShapeContainer + ?Sized,
{
    let mut children = Vec::new();
    for probe in [obj.shapes(), obj.child_shapes(), obj.sub_shapes()] {
        if let Some(found) = attr(probe) {
            children.extend(found);
        }
    }
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::testing::MockShape;
    use crate::native::NativeShape;

    fn ids(children: &Children<'_>) -> Vec<String> {
        children
            .iter()
            .map(|c| c.id().unwrap().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_merges_candidates_in_declaration_order() {
        let obj = MockShape {
            sub_shapes: Some(vec![MockShape::with_id("c")]),
            shapes: Some(vec![MockShape::with_id("a")]),
            child_shapes: Some(vec![MockShape::with_id("b")]),
            ..Default::default()
        };
        assert_eq!(ids(&collect_children(&obj)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failing_candidate_contributes_nothing() {
        let obj = MockShape {
            shapes: Some(vec![MockShape::with_id("a")]),
            child_shapes: Some(vec![MockShape::with_id("b")]),
            ..Default::default()
        }
        .failing("shapes");
        assert_eq!(ids(&collect_children(&obj)), vec!["b"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let obj = MockShape {
            shapes: Some(vec![MockShape::with_id("a")]),
            sub_shapes: Some(vec![MockShape::with_id("a")]),
            ..Default::default()
        };
        assert_eq!(ids(&collect_children(&obj)), vec!["a", "a"]);
    }

    #[test]
    fn test_no_candidates_yields_empty() {
        let obj = MockShape::default();
        assert!(collect_children(&obj).is_empty());

        let dynamic: &dyn NativeShape = &obj;
        assert!(collect_children(dynamic).is_empty());
    }
}
