use crate::{
    geom::{Kind, Orientation, Point},
    num::{constant, Float},
    Error,
};

/// An angle, stored as its cosine and sine.
///
/// Keeping the trigonometric pair instead of a radian value means that rotations by
/// angles built from rational points stay exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Angle<F> {
    pub cosine: F,
    pub sine: F,
}

impl<F: Float> Angle<F> {
    pub fn new(cosine: F, sine: F) -> Self {
        Angle { cosine, sine }
    }

    /// The angle at `vertex` from the ray through `first` to the ray through `second`.
    ///
    /// Degenerate rays give the zero angle.
    pub fn from_sides(vertex: &Point<F>, first: &Point<F>, second: &Point<F>) -> Self {
        let zero = constant::<F>(0);
        let squared_lengths =
            vertex.squared_distance_to(first) * vertex.squared_distance_to(second);
        if squared_lengths == zero {
            return Angle::new(constant(1), zero);
        }
        let lengths = squared_lengths.sqrt();
        let (to_first, to_second) = (first - vertex, second - vertex);
        Angle::new(
            to_first.dot(&to_second) / &lengths,
            to_first.cross(&to_second) / lengths,
        )
    }

    pub fn kind(&self) -> Kind {
        Kind::from_sign(self.cosine.cmp(&constant(0)))
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_sign(self.sine.cmp(&constant(0)))
    }

    pub fn validate(&self) -> Result<(), Error> {
        let square = |x: &F| x.clone() * x;
        if square(&self.cosine) + square(&self.sine) != constant(1) {
            return Err(Error::invalid(
                "Angle",
                "Pythagorean trigonometric identity is unmet.",
            ));
        }
        Ok(())
    }
}

impl<F: Float> std::ops::Add for &Angle<F> {
    type Output = Angle<F>;

    fn add(self, other: Self) -> Angle<F> {
        Angle::new(
            self.cosine.clone() * &other.cosine - self.sine.clone() * &other.sine,
            self.cosine.clone() * &other.sine + self.sine.clone() * &other.cosine,
        )
    }
}

impl<F: Float> std::ops::Sub for &Angle<F> {
    type Output = Angle<F>;

    fn sub(self, other: Self) -> Angle<F> {
        Angle::new(
            self.cosine.clone() * &other.cosine + self.sine.clone() * &other.sine,
            self.sine.clone() * &other.cosine - self.cosine.clone() * &other.sine,
        )
    }
}

impl<F: Float> std::ops::Neg for &Angle<F> {
    type Output = Angle<F>;

    fn neg(self) -> Angle<F> {
        Angle::new(self.cosine.clone(), -self.sine.clone())
    }
}
