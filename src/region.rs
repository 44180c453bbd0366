/*
 * Pixel clip region kept as a list of pairwise-disjoint rectangles.
 *
 * This mirrors what GDI does with `ExtSelectClipRgn` so portable backends and
 * tests can observe clip state without a device context. The representation is
 * not canonical: two regions covering the same pixels may hold different rect
 * lists, so compare them through `covers_same_pixels` rather than `==`.
 */
use crate::geometry::{Point, Rect};

/// How a new clip rect is combined with the current clip region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombineMode {
    Replace,
    Intersect,
    Union,
    Exclude,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    rects: Vec<Rect>,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        if !rect.is_empty() {
            region.rects.push(rect);
        }
        region
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn area(&self) -> i64 {
        self.rects.iter().map(Rect::area).sum()
    }

    /// Bounding box of the region; empty when the region is empty.
    pub fn bounds(&self) -> Rect {
        self.rects
            .iter()
            .fold(Rect::default(), |acc, r| acc.union(r))
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.rects.iter().any(|r| r.contains_point(p))
    }

    /// Applies `rect` to the region with the given combine mode.
    pub fn combine(&mut self, rect: Rect, mode: CombineMode) {
        match mode {
            CombineMode::Replace => *self = Region::from_rect(rect),
            CombineMode::Intersect => self.intersect_rect(rect),
            CombineMode::Union => self.union_rect(rect),
            CombineMode::Exclude => self.subtract_rect(rect),
        }
    }

    pub fn intersect_rect(&mut self, rect: Rect) {
        self.rects = self
            .rects
            .iter()
            .map(|r| r.intersect(&rect))
            .filter(|r| !r.is_empty())
            .collect();
    }

    pub fn subtract_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        self.rects = self
            .rects
            .iter()
            .flat_map(|r| subtract(*r, rect))
            .collect();
    }

    pub fn union_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        // Only the parts of `rect` not already covered are added, which keeps
        // the list disjoint.
        let mut pieces = vec![rect];
        for existing in &self.rects {
            pieces = pieces
                .into_iter()
                .flat_map(|p| subtract(p, *existing))
                .collect();
            if pieces.is_empty() {
                return;
            }
        }
        self.rects.extend(pieces);
    }

    /// True when both regions cover exactly the same set of pixels.
    pub fn covers_same_pixels(&self, other: &Region) -> bool {
        if self.area() != other.area() {
            return false;
        }
        // Both lists are disjoint, so summing per-rect overlaps is exact.
        let covered: i64 = other
            .rects
            .iter()
            .map(|r| {
                let mut part = self.clone();
                part.intersect_rect(*r);
                part.area()
            })
            .sum();
        covered == self.area()
    }
}

/// `a` minus `b`, as at most four disjoint bands.
fn subtract(a: Rect, b: Rect) -> Vec<Rect> {
    let overlap = a.intersect(&b);
    if overlap.is_empty() {
        return vec![a];
    }
    let mut out = Vec::with_capacity(4);
    if overlap.y > a.y {
        out.push(Rect::from_ltrb(a.x, a.y, a.right(), overlap.y));
    }
    if overlap.bottom() < a.bottom() {
        out.push(Rect::from_ltrb(a.x, overlap.bottom(), a.right(), a.bottom()));
    }
    if overlap.x > a.x {
        out.push(Rect::from_ltrb(a.x, overlap.y, overlap.x, overlap.bottom()));
    }
    if overlap.right() < a.right() {
        out.push(Rect::from_ltrb(
            overlap.right(),
            overlap.y,
            a.right(),
            overlap.bottom(),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_then_intersect_yields_intersection() {
        let mut region = Region::from_rect(Rect::new(0, 0, 100, 100));
        region.combine(Rect::new(10, 10, 50, 50), CombineMode::Replace);
        region.combine(Rect::new(30, 0, 50, 40), CombineMode::Intersect);
        assert_eq!(region.rects(), &[Rect::from_ltrb(30, 10, 60, 40)]);

        // Repeating the same intersection changes nothing.
        region.combine(Rect::new(30, 0, 50, 40), CombineMode::Intersect);
        assert_eq!(region.rects(), &[Rect::from_ltrb(30, 10, 60, 40)]);
    }

    #[test]
    fn union_of_overlapping_rects_counts_overlap_once() {
        let mut region = Region::from_rect(Rect::new(0, 0, 10, 10));
        region.combine(Rect::new(5, 5, 10, 10), CombineMode::Union);
        assert_eq!(region.area(), 100 + 100 - 25);
        assert_eq!(region.bounds(), Rect::from_ltrb(0, 0, 15, 15));
        assert!(region.contains_point(Point::new(12, 12)));
        assert!(!region.contains_point(Point::new(12, 2)));
    }

    #[test]
    fn exclude_punches_a_hole() {
        let mut region = Region::from_rect(Rect::new(0, 0, 30, 30));
        region.combine(Rect::new(10, 10, 10, 10), CombineMode::Exclude);
        assert_eq!(region.area(), 900 - 100);
        assert!(!region.contains_point(Point::new(15, 15)));
        assert!(region.contains_point(Point::new(5, 15)));
        assert!(region.contains_point(Point::new(25, 15)));
        assert_eq!(region.bounds(), Rect::new(0, 0, 30, 30));
    }

    #[test]
    fn intersect_with_disjoint_rect_empties_region() {
        let mut region = Region::from_rect(Rect::new(0, 0, 10, 10));
        region.combine(Rect::new(50, 50, 5, 5), CombineMode::Intersect);
        assert!(region.is_empty());
        assert!(region.bounds().is_empty());
    }

    #[test]
    fn covers_same_pixels_ignores_rect_decomposition() {
        let mut a = Region::from_rect(Rect::new(0, 0, 10, 10));
        a.combine(Rect::new(10, 0, 10, 10), CombineMode::Union);
        let b = Region::from_rect(Rect::new(0, 0, 20, 10));
        assert_ne!(a, b);
        assert!(a.covers_same_pixels(&b));
        assert!(!a.covers_same_pixels(&Region::from_rect(Rect::new(0, 0, 20, 11))));
    }
}
