use std::fs;
use std::path::Path;

use rrt3d::waypoints::parse_triple;
use rrt3d::Point;

use crate::MapError;

/// One `(x, y, z)` line per centre, rounded to two decimals.
pub fn format_centers(centers: &[Point]) -> String {
    centers
        .iter()
        .map(|c| format!("({:.2}, {:.2}, {:.2})\n", c.x, c.y, c.z))
        .collect()
}

/// Inverse of `format_centers`. Blank lines are skipped.
pub fn parse_centers(s: &str) -> Result<Vec<Point>, MapError> {
    s.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_triple(line).ok_or_else(|| MapError::Parse {
                line: i + 1,
                content: line.to_string(),
            })
        })
        .collect()
}

pub fn load_centers(file: impl AsRef<Path>) -> Result<Vec<Point>, MapError> {
    parse_centers(&fs::read_to_string(file)?)
}

pub fn save_centers(file: impl AsRef<Path>, centers: &[Point]) -> Result<(), MapError> {
    fs::write(file, format_centers(centers))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rrt3d::point;

    use super::*;

    #[test]
    fn two_decimals() {
        let text = format_centers(&[point(1.0, 2.346, 5.999), point(0.0, 0.5, 2.0)]);
        assert_eq!(text, "(1.00, 2.35, 6.00)\n(0.00, 0.50, 2.00)\n");
    }

    #[test]
    fn parses_generated_text() {
        let text = "(1.00, 2.35, 6.00)\n\n(0.00, 0.50, 2.00)\n";
        assert_eq!(
            parse_centers(text).unwrap(),
            vec![point(1.0, 2.35, 6.0), point(0.0, 0.5, 2.0)]
        );
    }

    #[test]
    fn reports_the_bad_line() {
        match parse_centers("(1, 2, 3)\n(4, 5)\n") {
            Err(MapError::Parse { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "(4, 5)");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn file_round_trip() {
        let file = std::env::temp_dir().join(format!("map-gen-{}-centres.txt", std::process::id()));
        let centers = vec![point(1.25, 3.5, 4.75), point(5.5, 0.25, 2.0)];
        save_centers(&file, &centers).unwrap();
        let loaded = load_centers(&file).unwrap();
        fs::remove_file(&file).unwrap();
        assert_eq!(loaded, centers);
    }
}
