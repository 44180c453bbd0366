/*
 * Pixel (`Rect`, `Point`, `Vector2d`, `Size`) and logical DIP (`RectF`, `PointF`,
 * `Vector2dF`, `SizeF`) geometry, plus the conversions between the two spaces.
 *
 * Logical geometry is multiplied by the scale factor (pixels per DIP) and then
 * snapped outwards with `to_enclosing_rect`, so a converted rect always covers
 * every pixel the logical rect touches.
 */
use std::ops::{Add, AddAssign, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add<Vector2d> for Point {
    type Output = Point;
    fn add(self, rhs: Vector2d) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector2d {
    pub x: i32,
    pub y: i32,
}

impl Vector2d {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector2d {
    type Output = Vector2d;
    fn add(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Axis-aligned pixel rectangle. `right()`/`bottom()` are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Returns the overlap of both rects, or an empty rect at the origin.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect::from_ltrb(left, top, right, bottom)
    }

    /// Smallest rect covering both. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::from_ltrb(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    pub fn offset(&self, v: Vector2d) -> Rect {
        Rect::new(self.x + v.x, self.y + v.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2dF {
    pub x: f32,
    pub y: f32,
}

impl Vector2dF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector2dF {
    type Output = Vector2dF;
    fn add(self, rhs: Vector2dF) -> Vector2dF {
        Vector2dF::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2dF {
    fn add_assign(&mut self, rhs: Vector2dF) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2dF {
    type Output = Vector2dF;
    fn sub(self, rhs: Vector2dF) -> Vector2dF {
        Vector2dF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2dF {
    type Output = Vector2dF;
    fn neg(self) -> Vector2dF {
        Vector2dF::new(-self.x, -self.y)
    }
}

impl From<Vector2d> for Vector2dF {
    fn from(v: Vector2d) -> Self {
        Vector2dF::new(v.x as f32, v.y as f32)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeF {
    pub width: f32,
    pub height: f32,
}

impl SizeF {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn offset(&self, v: Vector2dF) -> RectF {
        RectF::new(self.x + v.x, self.y + v.y, self.width, self.height)
    }
}

impl From<Rect> for RectF {
    fn from(r: Rect) -> Self {
        RectF::new(r.x as f32, r.y as f32, r.width as f32, r.height as f32)
    }
}

pub fn scale_rect(rect: RectF, scale: f32) -> RectF {
    RectF::new(
        rect.x * scale,
        rect.y * scale,
        rect.width * scale,
        rect.height * scale,
    )
}

pub fn scale_vector2d(v: Vector2dF, scale: f32) -> Vector2dF {
    Vector2dF::new(v.x * scale, v.y * scale)
}

pub fn scale_size(size: SizeF, scale: f32) -> SizeF {
    SizeF::new(size.width * scale, size.height * scale)
}

// Float noise from scaling (e.g. 10.0 * 1.1) must not grow a rect by a pixel.
const SNAP_EPSILON: f32 = 1e-3;

fn snap_floor(v: f32) -> i32 {
    (v + SNAP_EPSILON).floor() as i32
}

fn snap_ceil(v: f32) -> i32 {
    (v - SNAP_EPSILON).ceil() as i32
}

/// Smallest pixel rect fully containing `rect`.
pub fn to_enclosing_rect(rect: RectF) -> Rect {
    let left = snap_floor(rect.x);
    let top = snap_floor(rect.y);
    let right = snap_ceil(rect.right()).max(left);
    let bottom = snap_ceil(rect.bottom()).max(top);
    Rect::from_ltrb(left, top, right, bottom)
}

pub fn to_floored_vector2d(v: Vector2dF) -> Vector2d {
    Vector2d::new(snap_floor(v.x), snap_floor(v.y))
}

pub fn to_rounded_size(size: SizeF) -> Size {
    Size::new(size.width.round() as i32, size.height.round() as i32)
}

/// Converts a logical rect into pixel space.
pub fn to_pixel_rect(rect: RectF, scale: f32) -> Rect {
    to_enclosing_rect(scale_rect(rect, scale))
}

/// Converts a pixel rect back into logical space.
pub fn to_logical_rect(rect: Rect, scale: f32) -> RectF {
    scale_rect(RectF::from(rect), 1.0 / scale)
}
