use enumflags2::{bitflags, BitFlags};

pub type Point = (f64, f64);

/// Axis-aligned clip window in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub min: Point,
    pub max: Point,
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq)]
enum OutCode {
    Left = 0b0001,
    Right = 0b0010,
    Bottom = 0b0100,
    Top = 0b1000,
}

const INSIDE: BitFlags<OutCode> = BitFlags::EMPTY;

impl ClipRect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.out_code(point).is_empty()
    }

    fn out_code(&self, point: Point) -> BitFlags<OutCode> {
        let mut code = INSIDE;
        if point.0 < self.min.0 {
            code |= OutCode::Left;
        } else if point.0 > self.max.0 {
            code |= OutCode::Right;
        }
        if point.1 < self.min.1 {
            code |= OutCode::Bottom;
        } else if point.1 > self.max.1 {
            code |= OutCode::Top;
        }
        code
    }

    // Cohen-Sutherland
    // https://en.wikipedia.org/wiki/Cohen%E2%80%93Sutherland_algorithm
    /// Clips a segment to the window, `None` if no part of it is visible.
    pub fn clip_segment(&self, mut line: (Point, Point)) -> Option<(Point, Point)> {
        let mut code_a = self.out_code(line.0);
        let mut code_b = self.out_code(line.1);

        loop {
            if (code_a | code_b).is_empty() {
                return Some(line);
            }
            if !(code_a & code_b).is_empty() {
                // Both ends share an outside zone
                return None;
            }

            let is_code_out_a = !code_a.is_empty();
            let code_out = if is_code_out_a { code_a } else { code_b };

            let ((x0, y0), (x1, y1)) = line;
            let ClipRect {
                min: (xmin, ymin),
                max: (xmax, ymax),
            } = *self;

            // The outcode bit being tested guarantees a non-zero denominator
            let point = if code_out.contains(OutCode::Top) {
                (x0 + (x1 - x0) * (ymax - y0) / (y1 - y0), ymax)
            } else if code_out.contains(OutCode::Bottom) {
                (x0 + (x1 - x0) * (ymin - y0) / (y1 - y0), ymin)
            } else if code_out.contains(OutCode::Right) {
                (xmax, y0 + (y1 - y0) * (xmax - x0) / (x1 - x0))
            } else {
                (xmin, y0 + (y1 - y0) * (xmin - x0) / (x1 - x0))
            };
            if point.0.is_nan() || point.1.is_nan() {
                return None;
            }

            if is_code_out_a {
                line.0 = point;
                code_a = self.out_code(point);
            } else {
                line.1 = point;
                code_b = self.out_code(point);
            }
        }
    }

    /// Clips a polyline, splitting it into the runs that stay visible.
    ///
    /// Points with a NaN or infinite coordinate break the line the same way
    /// leaving the window does.
    pub fn clip_polyline(&self, points: impl IntoIterator<Item = Point>) -> Vec<Vec<Point>> {
        let mut runs = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut last: Option<Point> = None;

        for point in points {
            if !point.0.is_finite() || !point.1.is_finite() {
                flush(&mut runs, &mut current);
                last = None;
                continue;
            }

            match last {
                None => {
                    if self.contains(point) {
                        current.push(point);
                    }
                }
                Some(prev) => match self.clip_segment((prev, point)) {
                    Some((a, b)) => {
                        if current.last() != Some(&a) {
                            flush(&mut runs, &mut current);
                            current.push(a);
                        }
                        current.push(b);
                        // Clipped at the far end, the line leaves the window here
                        if b != point {
                            flush(&mut runs, &mut current);
                        }
                    }
                    None => flush(&mut runs, &mut current),
                },
            }
            last = Some(point);
        }

        flush(&mut runs, &mut current);
        runs
    }
}

fn flush(runs: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    match current.len() {
        0 => {}
        1 => current.clear(),
        _ => runs.push(std::mem::take(current)),
    }
}
