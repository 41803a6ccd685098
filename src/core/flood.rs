//! Connectivity analysis - one flood fill, parameterized by membership
//!
//! Both consumers share this primitive: fusion walks same-color occupancy
//! across piece boundaries, and fragment re-splitting walks cells tagged
//! with one piece id. The traversal is an explicit stack with a visited
//! bitmap over the grid, exploring 4-neighbors in up, down, left, right
//! order.

/// A connected set of cells with its bounding-box origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Absolute cells, in visit order
    pub cells: Vec<(i8, i8)>,
    pub min_x: i8,
    pub min_y: i8,
}

impl Region {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells translated to the bounding-box origin
    pub fn relative_cells(&self) -> Vec<(i8, i8)> {
        self.cells
            .iter()
            .map(|&(x, y)| (x - self.min_x, y - self.min_y))
            .collect()
    }
}

/// Flood-fill from `start` over a `width` x `height` grid, collecting every
/// cell reachable through 4-adjacency for which `member` holds. Returns an
/// empty region when the start cell itself is not a member.
pub fn flood_fill<F>(width: u8, height: u8, start: (i8, i8), member: F) -> Region
where
    F: Fn(i8, i8) -> bool,
{
    let w = width as i8;
    let h = height as i8;
    let mut region = Region {
        cells: Vec::new(),
        min_x: start.0,
        min_y: start.1,
    };

    let (sx, sy) = start;
    if sx < 0 || sx >= w || sy < 0 || sy >= h || !member(sx, sy) {
        return region;
    }

    let mut visited = vec![false; width as usize * height as usize];
    let mut stack = vec![start];
    visited[sy as usize * width as usize + sx as usize] = true;

    while let Some((x, y)) = stack.pop() {
        region.cells.push((x, y));
        region.min_x = region.min_x.min(x);
        region.min_y = region.min_y.min(y);

        // up, down, left, right
        for (nx, ny) in [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)] {
            if nx < 0 || nx >= w || ny < 0 || ny >= h {
                continue;
            }
            let idx = ny as usize * width as usize + nx as usize;
            if !visited[idx] && member(nx, ny) {
                visited[idx] = true;
                stack.push((nx, ny));
            }
        }
    }

    region
}
