//! SVG path data parsing into lyon paths.
//!
//! Glyph strokes are authored as SVG `d` strings on a 400x400 logical canvas,
//! e.g. `"M 110 55 L 200 55 Q 280 55 280 127.5"`. Parsing is delegated to
//! lyon_extra's SVG path parser, which also handles relative commands and
//! implicit repeats.

use lyon::path::{Path, PathEvent};
use lyon_extra::parser::{ParserOptions, PathParser, Source};
use thiserror::Error;

/// Why a path data string could not be turned into a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathDataError {
    #[error("path data contains no segments")]
    Empty,
    #[error("malformed path data: {0}")]
    Syntax(String),
}

/// Parse SVG path data into a lyon [`Path`].
pub fn parse_path_data(data: &str) -> Result<Path, PathDataError> {
    let mut builder = Path::builder();
    PathParser::new()
        .parse(&ParserOptions::DEFAULT, &mut Source::new(data.chars()), &mut builder)
        .map_err(|e| PathDataError::Syntax(format!("{e:?}")))?;
    let path = builder.build();

    let has_segments = path.iter().any(|e| {
        matches!(
            e,
            PathEvent::Line { .. } | PathEvent::Quadratic { .. } | PathEvent::Cubic { .. }
        )
    });
    if !has_segments {
        return Err(PathDataError::Empty);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyon::path::PathEvent;

    fn events(data: &str) -> Vec<PathEvent> {
        parse_path_data(data).unwrap().iter().collect()
    }

    #[test]
    fn parses_line() {
        let evts = events("M 200 60 L 125 280");
        assert_eq!(evts.len(), 3);
        match evts[1] {
            PathEvent::Line { from, to } => {
                assert_eq!((from.x, from.y), (200.0, 60.0));
                assert_eq!((to.x, to.y), (125.0, 280.0));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn parses_quadratic_and_cubic() {
        let evts = events("M 110 55 L 200 55 Q 280 55 280 127.5 C 280 200 250 200 200 200");
        assert!(matches!(evts[2], PathEvent::Quadratic { .. }));
        assert!(matches!(evts[3], PathEvent::Cubic { .. }));
    }

    #[test]
    fn relative_and_implicit_commands() {
        // "m 10 10 20 0" is a move followed by an implicit relative line.
        let evts = events("m 10 10 20 0 v 5 h -5");
        match evts[1] {
            PathEvent::Line { to, .. } => assert_eq!((to.x, to.y), (30.0, 10.0)),
            other => panic!("expected line, got {other:?}"),
        }
        match evts[3] {
            PathEvent::Line { to, .. } => assert_eq!((to.x, to.y), (25.0, 15.0)),
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn multiple_subpaths() {
        let path = parse_path_data("M 0 0 L 10 0 M 0 10 L 10 10").unwrap();
        let begins = path
            .iter()
            .filter(|e| matches!(e, PathEvent::Begin { .. }))
            .count();
        assert_eq!(begins, 2);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_path_data("").err(), Some(PathDataError::Empty));
        assert_eq!(parse_path_data("M 10 10").err(), Some(PathDataError::Empty));
        assert!(matches!(parse_path_data("M 10 x"), Err(PathDataError::Syntax(_))));
        assert!(matches!(parse_path_data("bogus"), Err(PathDataError::Syntax(_))));
    }
}
