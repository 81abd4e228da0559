//! Visual scenegraph
//!
//! The rendering collaborator consumes this data every frame: a node arena
//! (position, scale, geometry, material) plus a first-person camera. The
//! simulation owns node lifetimes through the entity registry and copies
//! physics positions into node transforms once per tick - synchronization is
//! strictly one-way, body to node.

use std::collections::BTreeMap;

use glam::{Mat4, Vec3};

use crate::consts::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, EYE_HEIGHT};
use crate::{look_direction, yaw_forward, yaw_right};

/// Stable handle to a scene node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Geometric primitive of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    Plane { width: f32, depth: f32 },
}

/// Flat material description; `back_side` marks inverted-hull outline shells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Packed 0xRRGGBB color
    pub color: u32,
    /// 0 = invisible, 1 = opaque (particles fade this)
    pub opacity: f32,
    pub back_side: bool,
}

impl Material {
    pub fn solid(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            back_side: false,
        }
    }

    /// Outline shell material (rendered back-side, slightly scaled up)
    pub fn outline(color: u32) -> Self {
        Self {
            color,
            opacity: 1.0,
            back_side: true,
        }
    }
}

/// A single visual node
#[derive(Debug, Clone)]
pub struct Node {
    pub position: Vec3,
    pub scale: Vec3,
    pub geometry: Geometry,
    pub material: Material,
}

impl Node {
    pub fn new(position: Vec3, geometry: Geometry, material: Material) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
            geometry,
            material,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }
}

/// First-person camera handed to the renderer
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Yaw in radians; 0 looks down -Z
    pub yaw: f32,
    /// Pitch in radians, positive looks up
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 10.0),
            yaw: 0.0,
            pitch: 0.0,
            fov: CAMERA_FOV_DEG.to_radians(),
            aspect: 16.0 / 9.0,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Full aim direction including pitch
    pub fn forward(&self) -> Vec3 {
        look_direction(self.yaw, self.pitch)
    }

    /// Horizontal forward (movement stays parallel to the floor)
    pub fn ground_forward(&self) -> Vec3 {
        yaw_forward(self.yaw)
    }

    /// Horizontal right
    pub fn ground_right(&self) -> Vec3 {
        yaw_right(self.yaw)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }
}

/// Scenegraph: node arena keyed by stable id, plus the camera
#[derive(Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    next_id: u32,
    pub camera: Camera,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            next_id: 0,
            camera: Camera::default(),
        }
    }

    /// Insert a node and return its stable id
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node. Removing an id that is already gone is a no-op.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in id order (renderer draw order)
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }
}
