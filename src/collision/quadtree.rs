//! Quadtree broadphase index over obstacle bounding rectangles
//!
//! Answers "which obstacles could possibly touch this region" with a
//! superset of the true overlaps; the narrow-phase refines the answer.
//! Entries are indices into the caller's obstacle list.

use crate::geometry::Rect;

/// Entries a node holds before splitting into quadrants.
const MAX_ENTRIES: usize = 10;
/// Maximum subdivision depth.
const MAX_LEVELS: usize = 4;

// Quadrant order: 0 = top-right, 1 = top-left, 2 = bottom-left,
// 3 = bottom-right.
#[derive(Debug, Clone)]
struct Entry {
    index: usize,
    bounds: Rect,
}

#[derive(Debug)]
pub struct QuadTree {
    bounds: Rect,
    level: usize,
    entries: Vec<Entry>,
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    pub fn new(bounds: Rect) -> Self {
        Self::with_level(bounds, 0)
    }

    fn with_level(bounds: Rect, level: usize) -> Self {
        Self {
            bounds,
            level,
            entries: Vec::new(),
            children: None,
        }
    }

    /// Quadrant of `self.bounds` that fully contains `rect`, if any. Rects
    /// straddling the midlines stay in this node.
    fn quadrant(&self, rect: &Rect) -> Option<usize> {
        let v_mid = self.bounds.x() + self.bounds.width() / 2.0;
        let h_mid = self.bounds.y() + self.bounds.height() / 2.0;

        let in_top = rect.top() < h_mid && rect.bottom() < h_mid;
        let in_bottom = rect.top() > h_mid;
        let in_left = rect.left() < v_mid && rect.right() < v_mid;
        let in_right = rect.left() > v_mid;

        match (in_top, in_bottom, in_left, in_right) {
            (true, _, _, true) => Some(0),
            (true, _, true, _) => Some(1),
            (_, true, true, _) => Some(2),
            (_, true, _, true) => Some(3),
            _ => None,
        }
    }

    fn split(&mut self) {
        let half_w = self.bounds.width() / 2.0;
        let half_h = self.bounds.height() / 2.0;
        let x = self.bounds.x();
        let y = self.bounds.y();
        let level = self.level + 1;

        self.children = Some(Box::new([
            QuadTree::with_level(Rect::new(x + half_w, y, half_w, half_h), level),
            QuadTree::with_level(Rect::new(x, y, half_w, half_h), level),
            QuadTree::with_level(Rect::new(x, y + half_h, half_w, half_h), level),
            QuadTree::with_level(Rect::new(x + half_w, y + half_h, half_w, half_h), level),
        ]));
    }

    /// Insert an obstacle index keyed by its bounding rect.
    pub fn insert(&mut self, index: usize, bounds: Rect) {
        if self.children.is_some() {
            if let Some(q) = self.quadrant(&bounds) {
                if let Some(children) = self.children.as_mut() {
                    return children[q].insert(index, bounds);
                }
            }
        }

        self.entries.push(Entry { index, bounds });

        if self.entries.len() > MAX_ENTRIES && self.level < MAX_LEVELS {
            if self.children.is_none() {
                self.split();
            }

            // redistribute entries that now fit a single quadrant
            let entries = std::mem::take(&mut self.entries);
            for entry in entries {
                match self.quadrant(&entry.bounds) {
                    Some(q) => match self.children.as_mut() {
                        Some(children) => children[q].insert(entry.index, entry.bounds),
                        None => self.entries.push(entry),
                    },
                    None => self.entries.push(entry),
                }
            }
        }
    }

    /// All obstacle indices whose bounds could overlap `region`. May contain
    /// non-overlapping candidates, never misses a true overlap.
    pub fn retrieve(&self, region: &Rect) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect(region, &mut out);
        out
    }

    fn collect(&self, region: &Rect, out: &mut Vec<usize>) {
        out.extend(self.entries.iter().map(|e| e.index));

        if let Some(children) = self.children.as_ref() {
            match self.quadrant(region) {
                Some(q) => children[q].collect(region, out),
                None => {
                    for child in children.iter() {
                        child.collect(region, out);
                    }
                }
            }
        }
    }
}
