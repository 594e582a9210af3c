/// In-memory asset source for tests
///
/// Serves a small mesh for every known mesh name and a 2x2 RGBA image for
/// every image name unless it was marked missing.

use rustc_hash::FxHashSet;
use crate::device::{TextureFormat, Vertex};
use crate::error::{Error, Result};
use crate::render::geometry::MeshData;
use super::model::{AssetSource, ImageData};

pub struct TestAssets {
    missing: FxHashSet<String>,
    pub mesh_loads: Vec<String>,
    pub image_loads: Vec<String>,
}

impl TestAssets {
    pub fn new() -> Self {
        Self {
            missing: FxHashSet::default(),
            mesh_loads: Vec::new(),
            image_loads: Vec::new(),
        }
    }

    /// Make every later load of `name` fail
    pub fn mark_missing(&mut self, name: &str) {
        self.missing.insert(name.to_string());
    }

    /// Box spanning (0, 0, 0) to (4, 2, 2)
    pub fn box_mesh() -> MeshData {
        let corners = [
            [0.0, 0.0, 0.0], [4.0, 0.0, 0.0], [4.0, 2.0, 0.0], [0.0, 2.0, 0.0],
            [0.0, 0.0, 2.0], [4.0, 0.0, 2.0], [4.0, 2.0, 2.0], [0.0, 2.0, 2.0],
        ];
        let vertices = corners
            .iter()
            .map(|p| Vertex::new(*p, [0.0, 0.0, 1.0], [0.0, 0.0], [1.0, 0.0, 0.0]))
            .collect();
        let indices = vec![
            0, 1, 2, 0, 2, 3, 4, 6, 5, 4, 7, 6,
            0, 4, 5, 0, 5, 1, 3, 2, 6, 3, 6, 7,
            0, 3, 7, 0, 7, 4, 1, 5, 6, 1, 6, 2,
        ];
        MeshData::new(vertices, indices)
    }
}

impl Default for TestAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSource for TestAssets {
    fn load_mesh(&mut self, name: &str) -> Result<MeshData> {
        self.mesh_loads.push(name.to_string());
        if self.missing.contains(name) {
            return Err(Error::AssetNotFound(name.to_string()));
        }
        Ok(Self::box_mesh())
    }

    fn load_image(&mut self, name: &str) -> Result<ImageData> {
        self.image_loads.push(name.to_string());
        if self.missing.contains(name) {
            return Err(Error::AssetNotFound(name.to_string()));
        }
        Ok(ImageData {
            width: 2,
            height: 2,
            format: TextureFormat::R8G8B8A8_UNORM,
            texels: vec![255; 16],
        })
    }
}
