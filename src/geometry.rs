//! Shape tessellation, shared by the scene loop (morph fields take a
//! shape's vertices as their base) and the draw backends (wireframes use
//! the edge list, solids the triangle list).

use std::collections::{BTreeSet, HashMap};

use glam::Vec3;

use crate::core::Shape;

/// Torus knot winding, fixed at the (2, 3) trefoil.
const KNOT_P: f32 = 2.0;
const KNOT_Q: f32 = 3.0;

/// Indexed mesh with both edge and triangle index lists. Edges are the
/// unique undirected edges of the triangles.
#[derive(Debug, Clone)]
pub struct ShapeMesh {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<[u32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

pub fn tessellate(shape: Shape) -> ShapeMesh {
    match shape {
        Shape::TorusKnot {
            radius,
            tube,
            tubular_segments,
            radial_segments,
        } => torus_knot(radius, tube, tubular_segments.max(3), radial_segments.max(3)),
        Shape::Icosahedron {
            radius,
            subdivisions,
        } => icosahedron(radius, subdivisions),
        Shape::Sphere {
            radius,
            sectors,
            stacks,
        } => uv_sphere(radius, sectors.max(3), stacks.max(2)),
    }
}

fn knot_point(u: f32, radius: f32) -> Vec3 {
    let qu = KNOT_Q / KNOT_P * u;
    let ring = radius * (2.0 + qu.cos()) * 0.5;
    Vec3::new(ring * u.cos(), ring * u.sin(), radius * qu.sin() * 0.5)
}

/// Tube swept along the trefoil curve. The frame at each ring comes from
/// a forward difference along the curve, which is stable here because the
/// curve never doubles back on itself.
fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32) -> ShapeMesh {
    let ring_len = radial + 1;
    let mut vertices = Vec::with_capacity(((tubular + 1) * ring_len) as usize);

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * KNOT_P * std::f32::consts::TAU;
        let p1 = knot_point(u, radius);
        let p2 = knot_point(u + 0.01, radius);

        let tangent = p2 - p1;
        let binormal = tangent.cross(p2 + p1).normalize();
        let normal = binormal.cross(tangent).normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * std::f32::consts::TAU;
            vertices.push(p1 + (-tube * v.cos()) * normal + (tube * v.sin()) * binormal);
        }
    }

    let mut triangles = Vec::with_capacity((tubular * radial * 2) as usize);
    for i in 1..=tubular {
        for j in 1..=radial {
            let a = ring_len * (i - 1) + (j - 1);
            let b = ring_len * i + (j - 1);
            let c = ring_len * i + j;
            let d = ring_len * (i - 1) + j;
            triangles.push([a, b, d]);
            triangles.push([b, c, d]);
        }
    }

    finish(vertices, triangles)
}

fn icosahedron(radius: f32, subdivisions: u32) -> ShapeMesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut vertices: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z))
    .collect();

    let mut triangles: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    // Each pass splits every triangle in four, reusing edge midpoints so
    // neighboring triangles stay stitched.
    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(triangles.len() * 4);

        for [a, b, c] in triangles {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }

        triangles = next;
    }

    for v in &mut vertices {
        *v = v.normalize() * radius;
    }

    finish(vertices, triangles)
}

fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&index) = cache.get(&key) {
        return index;
    }
    let index = vertices.len() as u32;
    let mid = (vertices[a as usize] + vertices[b as usize]) * 0.5;
    vertices.push(mid);
    cache.insert(key, index);
    index
}

fn uv_sphere(radius: f32, sectors: u32, stacks: u32) -> ShapeMesh {
    let cols = sectors + 1;
    let mut vertices = Vec::with_capacity((cols * (stacks + 1)) as usize);

    for iy in 0..=stacks {
        let theta = iy as f32 / stacks as f32 * std::f32::consts::PI;
        for ix in 0..=sectors {
            let phi = ix as f32 / sectors as f32 * std::f32::consts::TAU;
            vertices.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.cos(),
                radius * theta.sin() * phi.sin(),
            ));
        }
    }

    let mut triangles = Vec::new();
    for iy in 0..stacks {
        for ix in 0..sectors {
            let tl = iy * cols + ix;
            let tr = tl + 1;
            let bl = (iy + 1) * cols + ix;
            let br = bl + 1;
            // Pole rows collapse one triangle of each quad.
            if iy + 1 != stacks {
                triangles.push([tl, bl, br]);
            }
            if iy != 0 {
                triangles.push([tl, br, tr]);
            }
        }
    }

    finish(vertices, triangles)
}

fn finish(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> ShapeMesh {
    let mut unique = BTreeSet::new();
    for [a, b, c] in &triangles {
        for (lo, hi) in [(a, b), (b, c), (c, a)] {
            unique.insert((*lo.min(hi), *lo.max(hi)));
        }
    }
    let edges = unique.into_iter().map(|(a, b)| [a, b]).collect();

    ShapeMesh {
        vertices,
        edges,
        triangles,
    }
}
