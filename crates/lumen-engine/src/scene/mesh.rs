use glam::Vec3;

use crate::paint::Color;

/// Line geometry a node draws, in node-local space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Mesh {
    /// Unit cube centred on the origin, drawn as its 12 edges.
    WireCube { color: Color },
    /// Unit X, Y and Z axes from the origin in red, green and blue.
    Axes,
}

/// One line segment: start, end, colour.
pub type Segment = (Vec3, Vec3, Color);

impl Mesh {
    pub fn segments(&self) -> Vec<Segment> {
        match *self {
            Mesh::WireCube { color } => cube_edges()
                .into_iter()
                .map(|(a, b)| (a, b, color))
                .collect(),
            Mesh::Axes => vec![
                (Vec3::ZERO, Vec3::X, Color::from_straight(1.0, 0.0, 0.0, 1.0)),
                (Vec3::ZERO, Vec3::Y, Color::from_straight(0.0, 1.0, 0.0, 1.0)),
                (Vec3::ZERO, Vec3::Z, Color::from_straight(0.0, 0.0, 1.0, 1.0)),
            ],
        }
    }
}

fn corner(i: usize) -> Vec3 {
    let axis = |bit: usize| if i & (1 << bit) == 0 { -0.5 } else { 0.5 };
    Vec3::new(axis(0), axis(1), axis(2))
}

// Corners are indexed by their sign bits; an edge joins corners one bit apart.
fn cube_edges() -> Vec<(Vec3, Vec3)> {
    let mut edges = Vec::with_capacity(12);
    for i in 0..8 {
        for bit in 0..3 {
            let j = i | (1 << bit);
            if j != i {
                edges.push((corner(i), corner(j)));
            }
        }
    }
    edges
}
