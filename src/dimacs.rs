//! DIMACS `.col` graph format parser (spec §6.2).
//!
//! Grammar, line by line:
//! ```text
//! c <anything>              comment, ignored
//! p edge <n> <m>            problem line, vertex/edge counts
//! e <u> <v>                 edge, 1-indexed
//! ```
//! Blank lines are ignored. `p` must appear before any `e` line. Edges
//! are stored 0-indexed for [`crate::graph::Graph`].

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, not_line_ending, space0, space1};
use nom::combinator::map_res;
use nom::sequence::{preceded, tuple};
use nom::IResult;

use crate::error::ColoringError;
use crate::graph::Graph;

enum Line {
    Comment,
    Problem { n: usize, m: usize },
    Edge { u: usize, v: usize },
    Blank,
}

fn uint(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}

fn comment_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = tag("c")(input)?;
    let (input, _) = not_line_ending(input)?;
    Ok((input, Line::Comment))
}

fn problem_line(input: &str) -> IResult<&str, Line> {
    let (input, (_, _, _, n, _, m)) =
        tuple((tag("p"), space1, tag("edge"), preceded(space1, uint), space1, uint))(input)?;
    Ok((input, Line::Problem { n, m }))
}

fn edge_line(input: &str) -> IResult<&str, Line> {
    let (input, (_, u, _, v)) =
        tuple((tag("e"), preceded(space1, uint), space1, uint))(input)?;
    Ok((input, Line::Edge { u, v }))
}

fn blank_line(input: &str) -> IResult<&str, Line> {
    let (input, _) = space0(input)?;
    Ok((input, Line::Blank))
}

fn line(input: &str) -> IResult<&str, Line> {
    alt((comment_line, problem_line, edge_line, blank_line))(input)
}

/// Parses the full contents of a DIMACS `.col` file into a [`Graph`].
///
/// Fails with [`ColoringError::InvalidInput`] if the `p edge` line is
/// missing, malformed, declares `n == 0`, or an edge references a
/// vertex outside `1..=n`.
pub fn parse_dimacs(contents: &str) -> Result<Graph, ColoringError> {
    let mut n: Option<usize> = None;
    let mut adj: Vec<Vec<usize>> = Vec::new();

    for (lineno, raw) in contents.lines().enumerate() {
        let trimmed = raw.trim_end();
        let (_, parsed) = line(trimmed).map_err(|e| {
            ColoringError::InvalidInput(format!("line {}: could not parse {:?}: {e}", lineno + 1, raw))
        })?;
        match parsed {
            Line::Comment | Line::Blank => {}
            Line::Problem { n: declared_n, .. } => {
                if declared_n == 0 {
                    return Err(ColoringError::InvalidInput(
                        "DIMACS 'p edge' line declares n = 0".into(),
                    ));
                }
                n = Some(declared_n);
                adj = vec![Vec::new(); declared_n];
            }
            Line::Edge { u, v } => {
                let n = n.ok_or_else(|| {
                    ColoringError::InvalidInput(format!(
                        "line {}: edge appears before the 'p edge' line",
                        lineno + 1
                    ))
                })?;
                if u == 0 || v == 0 || u > n || v > n {
                    return Err(ColoringError::InvalidInput(format!(
                        "line {}: edge ({u}, {v}) out of range for n = {n} (DIMACS vertices are 1-indexed)",
                        lineno + 1
                    )));
                }
                let (u, v) = (u - 1, v - 1);
                if u == v {
                    return Err(ColoringError::InvalidInput(format!(
                        "line {}: self-loop at vertex {u}",
                        lineno + 1
                    )));
                }
                adj[u].push(v);
                adj[v].push(u);
            }
        }
    }

    if n.is_none() {
        return Err(ColoringError::InvalidInput(
            "DIMACS file has no 'p edge' line".into(),
        ));
    }
    Graph::from_adjacency_lists(adj)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triangle() {
        let text = "c a triangle\np edge 3 3\ne 1 2\ne 2 3\ne 1 3\n";
        let g = parse_dimacs(text).unwrap();
        assert_eq!(g.n(), 3);
        assert_eq!(g.m(), 3);
    }

    #[test]
    fn ignores_blank_lines_and_trailing_whitespace() {
        let text = "p edge 2 1\n\ne 1 2  \n\n";
        let g = parse_dimacs(text).unwrap();
        assert_eq!(g.n(), 2);
        assert_eq!(g.m(), 1);
    }

    #[test]
    fn rejects_missing_problem_line() {
        let err = parse_dimacs("e 1 2\n").unwrap_err();
        assert!(matches!(err, ColoringError::InvalidInput(_)));
    }

    #[test]
    fn rejects_out_of_range_edge() {
        let err = parse_dimacs("p edge 2 1\ne 1 3\n").unwrap_err();
        assert!(matches!(err, ColoringError::InvalidInput(_)));
    }

    #[test]
    fn rejects_zero_vertex_count() {
        let err = parse_dimacs("p edge 0 0\n").unwrap_err();
        assert!(matches!(err, ColoringError::InvalidInput(_)));
    }
}
