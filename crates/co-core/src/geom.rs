use core::ops::{Add, Mul};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    /// Nearest pixel index, rounding halfway cases away from zero.
    pub fn round_to_pixel(self) -> (isize, isize) {
        (self.x.round() as isize, self.y.round() as isize)
    }
}

impl Vec2d {
    /// Unit vector at `angle` radians, measured from +x towards +y.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }
}

impl Add<Vec2d> for Point2d {
    type Output = Point2d;

    fn add(self, rhs: Vec2d) -> Self::Output {
        Point2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
