use anyhow::{bail, ensure};

use super::Vec2;

/// A rectangular, row-major grid of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Map2d<Tile> {
    pub size: Vec2,
    pub data: Vec<Tile>,
}

impl<Tile> Map2d<Tile> {
    pub fn new_default(size: Vec2, default: Tile) -> Self
    where
        Tile: Clone,
    {
        let data = vec![default; (size.x * size.y) as usize];
        Self { size, data }
    }

    /// Parses one tile per character. Rows must all have the same width and
    /// `f` must accept every character.
    pub fn parse_grid(s: &str, f: impl Fn(char) -> Option<Tile>) -> anyhow::Result<Self> {
        let mut width = None;
        let mut data = Vec::with_capacity(s.len());
        let mut height = 0;
        for (y, line) in s.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let len = line.chars().count();
            match width {
                None => width = Some(len),
                Some(w) => ensure!(w == len, "row {} has width {}, expected {}", y, len, w),
            }
            for (x, c) in line.chars().enumerate() {
                match f(c) {
                    Some(tile) => data.push(tile),
                    None => bail!("unexpected character {:?} at ({}, {})", c, x, y),
                }
            }
            height += 1;
        }
        let Some(width) = width else { bail!("empty grid") };

        Ok(Self { size: Vec2::new(width as i64, height), data })
    }

    pub fn index_of(&self, pos: Vec2) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.size.x || pos.y >= self.size.y {
            None
        } else {
            Some((pos.x + pos.y * self.size.x) as usize)
        }
    }

    pub fn pos_of(&self, index: usize) -> Vec2 {
        Vec2::new(index as i64 % self.size.x, index as i64 / self.size.x)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.index_of(pos).is_some()
    }

    pub fn get(&self, pos: Vec2) -> Option<Tile>
    where
        Tile: Copy,
    {
        self.index_of(pos).map(|i| self.data[i])
    }

    pub fn get_mut(&mut self, pos: Vec2) -> Option<&mut Tile> {
        self.index_of(pos).map(move |i| &mut self.data[i])
    }

    /// Panics if `y` is out of bounds.
    pub fn get_row(&self, y: i64) -> &[Tile] {
        let start = (y * self.size.x) as usize;
        &self.data[start..start + self.size.x as usize]
    }

    pub fn find(&self, predicate: impl Fn(&Tile) -> bool) -> Option<Vec2> {
        self.data.iter().position(predicate).map(|i| self.pos_of(i))
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.data.len()).map(|i| self.pos_of(i))
    }
}
