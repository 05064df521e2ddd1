//! Connector detection.

use crate::model::{Connection, ShapeId};
use crate::native::{attr, NativeShape, ProbeError, ShapeRef};

use super::diagnostics::{Diagnostics, WarningScope};

/// Derive the connections a shape declares.
///
/// Two independent strategies may each contribute one pair, join-list
/// first:
///
/// - **Join list**: scans the shape's connect entries. The from and to
///   identifiers are overwritten by every entry that resolves the
///   corresponding endpoint, so only the last values survive the scan.
/// - **1-D shape**: when the shape carries a one-dimensional marker, pairs
///   the shapes glued to its begin and end points.
///
/// A reader failure while enumerating either source discards the whole
/// result for this shape and is recorded as a warning.
pub fn extract_connections(shape: &dyn NativeShape, diag: &mut Diagnostics) -> Vec<Connection> {
    match try_extract(shape) {
        Ok(connections) => connections,
        Err(e) => {
            let subject = attr(shape.id())
                .map(|id| id.to_string())
                .unwrap_or_else(|| "<no id>".to_string());
            diag.warn(WarningScope::Connection, subject, e);
            Vec::new()
        }
    }
}

fn try_extract(shape: &dyn NativeShape) -> Result<Vec<Connection>, ProbeError> {
    let mut connections = Vec::new();

    if let Some(connects) = shape.connects()? {
        let mut from_id = None;
        let mut to_id = None;

        // Last entry wins; earlier pairs are not accumulated.
        for connect in &connects {
            if let Some(from_shape) = attr(connect.from_shape()) {
                from_id = attr(from_shape.id());
            }
            if let Some(to_shape) = attr(connect.to_shape()) {
                to_id = attr(to_shape.id());
            }
        }

        if let Some(connection) = pair(from_id, to_id) {
            connections.push(connection);
        }
    }

    if shape.one_d()?.is_some() {
        let begin = attr(shape.begin_shape());
        let end = attr(shape.end_shape());

        if let (Some(begin), Some(end)) = (begin, end) {
            if let Some(connection) = pair(endpoint_id(&begin), endpoint_id(&end)) {
                connections.push(connection);
            }
        }
    }

    Ok(connections)
}

fn endpoint_id(shape: &ShapeRef<'_>) -> Option<ShapeId> {
    attr(shape.id())
}

fn pair(from: Option<ShapeId>, to: Option<ShapeId>) -> Option<Connection> {
    let from = from.filter(ShapeId::is_present)?;
    let to = to.filter(ShapeId::is_present)?;
    Some(Connection::new(from.to_string(), to.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::testing::{MockConnect, MockShape};

    #[test]
    fn test_single_connect_entry() {
        let shape = MockShape {
            connects: Some(vec![MockConnect::between("1", "2")]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let result = extract_connections(&shape, &mut diag);
        assert_eq!(result, vec![Connection::new("1", "2")]);
    }

    #[test]
    fn test_shape_without_connect_members() {
        let shape = MockShape::with_id("9").text("plain");
        let mut diag = Diagnostics::new();
        assert!(extract_connections(&shape, &mut diag).is_empty());
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn test_last_connect_entry_wins() {
        let shape = MockShape {
            connects: Some(vec![
                MockConnect::between("1", "2"),
                MockConnect::between("3", "4"),
            ]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        assert_eq!(
            extract_connections(&shape, &mut diag),
            vec![Connection::new("3", "4")]
        );
    }

    #[test]
    fn test_endpoints_overwrite_independently() {
        let shape = MockShape {
            connects: Some(vec![
                MockConnect::between("1", "2"),
                MockConnect {
                    from: Some(MockShape::with_id("5")),
                    to: None,
                },
            ]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        assert_eq!(
            extract_connections(&shape, &mut diag),
            vec![Connection::new("5", "2")]
        );
    }

    #[test]
    fn test_one_d_shape_uses_begin_and_end() {
        let shape = MockShape {
            one_d: Some(true),
            begin: Some(Box::new(MockShape::with_id("10"))),
            end: Some(Box::new(MockShape::with_id("11"))),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        assert_eq!(
            extract_connections(&shape, &mut diag),
            vec![Connection::new("10", "11")]
        );
    }

    #[test]
    fn test_both_strategies_fire_join_list_first() {
        let shape = MockShape {
            connects: Some(vec![MockConnect::between("1", "2")]),
            one_d: Some(false),
            begin: Some(Box::new(MockShape::with_id("1"))),
            end: Some(Box::new(MockShape::with_id("2"))),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        assert_eq!(
            extract_connections(&shape, &mut diag),
            vec![Connection::new("1", "2"), Connection::new("1", "2")]
        );
    }

    #[test]
    fn test_one_d_without_end_yields_nothing() {
        let shape = MockShape {
            one_d: Some(true),
            begin: Some(Box::new(MockShape::with_id("10"))),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        assert!(extract_connections(&shape, &mut diag).is_empty());
    }

    #[test]
    fn test_failure_discards_all_pairs() {
        let shape = MockShape {
            connects: Some(vec![MockConnect::between("1", "2")]),
            ..MockShape::with_id("7")
        }
        .failing("one_d");
        let mut diag = Diagnostics::new();

        assert!(extract_connections(&shape, &mut diag).is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].scope, WarningScope::Connection);
        assert_eq!(diag.warnings()[0].subject, "7");
    }
}
