/// An unordered point cloud stored as structure-of-arrays.
///
/// Normals and colors are optional per-point attributes. When present they are
/// expected to be index-aligned with the positions, but a reader may hand back
/// a cloud whose normal count differs from its point count; use
/// [`PointCloud::has_paired_normals`] before relying on the pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
    pub normals: Option<Normals>,
    pub colors: Option<Colors>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normals {
    pub nx: Vec<f32>,
    pub ny: Vec<f32>,
    pub nz: Vec<f32>,
}

impl Normals {
    pub fn from_vectors(vectors: &[[f32; 3]]) -> Self {
        Self {
            nx: vectors.iter().map(|n| n[0]).collect(),
            ny: vectors.iter().map(|n| n[1]).collect(),
            nz: vectors.iter().map(|n| n[2]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.nx.len(), self.ny.len());
        debug_assert_eq!(self.nx.len(), self.nz.len());
        self.nx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nx.is_empty()
    }

    pub fn get(&self, i: usize) -> [f32; 3] {
        [self.nx[i], self.ny[i], self.nz[i]]
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            nx: indices.iter().map(|&idx| self.nx[idx]).collect(),
            ny: indices.iter().map(|&idx| self.ny[idx]).collect(),
            nz: indices.iter().map(|&idx| self.nz[idx]).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Colors {
    pub r: Vec<u8>,
    pub g: Vec<u8>,
    pub b: Vec<u8>,
}

impl Colors {
    pub fn from_rgb(rgb: &[[u8; 3]]) -> Self {
        Self {
            r: rgb.iter().map(|c| c[0]).collect(),
            g: rgb.iter().map(|c| c[1]).collect(),
            b: rgb.iter().map(|c| c[2]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn get(&self, i: usize) -> [u8; 3] {
        [self.r[i], self.g[i], self.b[i]]
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            r: indices.iter().map(|&idx| self.r[idx]).collect(),
            g: indices.iter().map(|&idx| self.g[idx]).collect(),
            b: indices.iter().map(|&idx| self.b[idx]).collect(),
        }
    }
}

impl PointCloud {
    pub fn new() -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            z: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    pub fn from_xyz(x: Vec<f32>, y: Vec<f32>, z: Vec<f32>) -> Self {
        assert_eq!(x.len(), y.len(), "x and y must have same length");
        assert_eq!(x.len(), z.len(), "x and z must have same length");

        Self {
            x,
            y,
            z,
            normals: None,
            colors: None,
        }
    }

    pub fn from_points(points: &[[f32; 3]]) -> Self {
        Self::from_xyz(
            points.iter().map(|p| p[0]).collect(),
            points.iter().map(|p| p[1]).collect(),
            points.iter().map(|p| p[2]).collect(),
        )
    }

    /// Attaches per-point normals, builder style.
    pub fn with_normals(mut self, normals: Normals) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.x.len(), self.y.len());
        debug_assert_eq!(self.x.len(), self.z.len());
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn point(&self, i: usize) -> [f32; 3] {
        [self.x[i], self.y[i], self.z[i]]
    }

    pub fn iter_points(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .zip(&self.z)
            .map(|((x, y), z)| [*x, *y, *z])
    }

    /// Positions copied into a contiguous array, for hot loops.
    pub fn to_points(&self) -> Vec<[f32; 3]> {
        self.iter_points().collect()
    }

    /// True when normals are present and there is exactly one per point.
    pub fn has_paired_normals(&self) -> bool {
        self.normals
            .as_ref()
            .is_some_and(|n| n.len() == self.len())
    }

    /// A copy of the cloud with normals dropped.
    pub fn without_normals(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.clone(),
            normals: None,
            colors: self.colors.clone(),
        }
    }

    /// Builds a new cloud from the points at `indices`, in that order.
    ///
    /// Normals and colors travel with their points.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds, or if an attribute is shorter
    /// than the position arrays.
    pub fn select(&self, indices: &[usize]) -> Self {
        let mut x = Vec::with_capacity(indices.len());
        let mut y = Vec::with_capacity(indices.len());
        let mut z = Vec::with_capacity(indices.len());

        for &idx in indices {
            assert!(idx < self.len(), "index out of bounds in select");
            x.push(self.x[idx]);
            y.push(self.y[idx]);
            z.push(self.z[idx]);
        }

        Self {
            x,
            y,
            z,
            normals: self.normals.as_ref().map(|n| n.select(indices)),
            colors: self.colors.as_ref().map(|c| c.select(indices)),
        }
    }

    /// Keeps the points for which `keep` returns true, preserving order.
    pub fn retain_points<F>(&self, mut keep: F) -> Self
    where
        F: FnMut([f32; 3]) -> bool,
    {
        let kept: Vec<usize> = self
            .iter_points()
            .enumerate()
            .filter_map(|(i, p)| keep(p).then_some(i))
            .collect();
        self.select(&kept)
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}
