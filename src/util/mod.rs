pub mod graph;
pub mod map2d;

pub use map2d::Map2d;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vec2 {
    pub x: i64,
    pub y: i64,
}

impl Vec2 {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    pub fn l1_norm(self) -> i64 {
        self.x.abs() + self.y.abs()
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<i64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Grid directions, clockwise from up. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    pub const fn to_vec2(self) -> Vec2 {
        match self {
            Dir::Up => Vec2::new(0, -1),
            Dir::Right => Vec2::new(1, 0),
            Dir::Down => Vec2::new(0, 1),
            Dir::Left => Vec2::new(-1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    pub const fn rotate_left(self) -> Self {
        match self {
            Dir::Up => Dir::Left,
            Dir::Right => Dir::Up,
            Dir::Down => Dir::Right,
            Dir::Left => Dir::Down,
        }
    }

    pub const fn rotate_right(self) -> Self {
        match self {
            Dir::Up => Dir::Right,
            Dir::Right => Dir::Down,
            Dir::Down => Dir::Left,
            Dir::Left => Dir::Up,
        }
    }
}

impl std::ops::Add<Dir> for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Dir) -> Vec2 {
        self + rhs.to_vec2()
    }
}

pub fn gcd(a: i64, b: i64) -> i64 {if b == 0 {a.abs()} else {gcd(b, a % b)}}
pub fn lcm(a: i64, b: i64) -> i64 {a / gcd(a, b) * b}

pub fn lcm_iter(iter: impl IntoIterator<Item = i64>) -> Option<i64> {
    iter.into_iter().reduce(lcm)
}

/// Number of ways to choose `k` items from `n`, ignoring order.
pub fn binomial_coefficient(n: i64, k: i64) -> i64 {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Every unordered pair `(items[i], items[j])` with `i < j`.
pub fn pairs<T>(items: &[T]) -> impl Iterator<Item = (&T, &T)> {
    items.iter().enumerate().flat_map(move |(i, a)| items[i + 1..].iter().map(move |b| (a, b)))
}
