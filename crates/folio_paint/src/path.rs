//! Path building and representation

use smallvec::SmallVec;

/// Segments used to approximate one cubic when measuring length.
const CUBIC_LENGTH_STEPS: usize = 16;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    Close,
}

impl PathCommand {
    /// The point this command ends on, if it moves the pen.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::CubicTo { end, .. } => Some(end),
            PathCommand::Close => None,
        }
    }
}

/// A 2D path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every explicit endpoint in command order.
    pub fn end_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().filter_map(PathCommand::end_point)
    }

    /// Approximate arc length. Cubics are flattened into short chords.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut start = Point::ZERO;
        let mut current = Point::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    start = p;
                    current = p;
                }
                PathCommand::LineTo(p) => {
                    total += current.distance(p);
                    current = p;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    let mut prev = current;
                    for i in 1..=CUBIC_LENGTH_STEPS {
                        let t = i as f32 / CUBIC_LENGTH_STEPS as f32;
                        let p = cubic_point(current, control1, control2, end, t);
                        total += prev.distance(p);
                        prev = p;
                    }
                    current = end;
                }
                PathCommand::Close => {
                    total += current.distance(start);
                    current = start;
                }
            }
        }
        total
    }
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}

/// Builder for constructing paths
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            path: Path::new(),
            current: Point::ZERO,
        }
    }

    /// The pen position after the last command.
    pub fn current(&self) -> Point {
        self.current
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        let end = Point::new(x, y);
        self.path.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end,
        });
        self.current = end;
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polyline_length_is_sum_of_segments() {
        let p = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(3.0, 4.0)
            .line_to(3.0, 10.0)
            .build();
        assert!((p.length() - 11.0).abs() < 1e-5);
    }

    #[test]
    fn straight_cubic_measures_like_a_line() {
        let p = PathBuilder::new()
            .move_to(0.0, 0.0)
            .cubic_to(10.0, 0.0, 20.0, 0.0, 30.0, 0.0)
            .build();
        assert!((p.length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn close_adds_return_segment() {
        let p = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .close()
            .build();
        assert!((p.length() - 20.0).abs() < 1e-5);
        assert_eq!(p.end_points().count(), 2);
    }
}
