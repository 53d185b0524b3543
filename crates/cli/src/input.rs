//! Vertex input formats accepted by `submit`.

use anyhow::{bail, Context, Result};
use polyset::prelude::Point;
use std::fs;
use std::path::Path;

/// Parse `"x,y x,y ..."`; pairs may also be separated by `;`.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    text.split(|c: char| c.is_whitespace() || c == ';')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let Some((x, y)) = pair.split_once(',') else {
                bail!("expected x,y but got {pair:?}");
            };
            let x = x.trim().parse::<f64>().with_context(|| format!("bad x in {pair:?}"))?;
            let y = y.trim().parse::<f64>().with_context(|| format!("bad y in {pair:?}"))?;
            Ok(Point::new(x, y))
        })
        .collect()
}

/// Read a JSON array of `{"x": .., "y": ..}` objects.
pub fn read_points_json(path: &Path) -> Result<Vec<Point>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}
