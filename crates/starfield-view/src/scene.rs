//! Render engine boundary.
//!
//! The viewer never draws anything itself. It creates opaque meshes through
//! [`SceneBackend`], pushes transforms and visibility into them every frame,
//! and asks the backend to ray-cast for picking. [`SceneBindings`] maps the
//! handles back to bodies.

use glam::{Quat, Vec3};
use rustc_hash::FxHashMap;
use starfield_universe::{BodyId, Color, Universe};
use tracing::debug;

use crate::camera::Ray;
use crate::error::FrameError;

/// Orbit lines are drawn fainter than the body they belong to.
pub const ORBIT_LINE_OPACITY: f32 = 0.3;

/// Opaque reference to a renderer object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// Geometry requested from the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeshShape {
    /// Pickable sphere.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Circle in the local XZ plane, never pickable.
    OrbitLine {
        /// Circle radius.
        radius: f32,
    },
}

/// One ray-cast intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Object that was hit.
    pub handle: MeshHandle,
    /// Distance from the ray origin.
    pub distance: f32,
}

/// Capabilities the viewer needs from a renderer.
pub trait SceneBackend {
    /// Create an object and return its handle. Objects start hidden.
    fn create_mesh(&mut self, shape: MeshShape, color: Color) -> MeshHandle;
    /// Show or hide an object.
    fn set_visible(&mut self, handle: MeshHandle, visible: bool);
    /// Set object opacity in `[0, 1]`.
    fn set_opacity(&mut self, handle: MeshHandle, opacity: f32);
    /// Place an object in world space.
    fn set_transform(&mut self, handle: MeshHandle, position: Vec3, rotation: Quat);
    /// Current world position of an object.
    fn world_position(&self, handle: MeshHandle) -> Option<Vec3>;
    /// Intersect visible pickable objects, nearest first.
    fn cast_ray(&self, ray: &Ray) -> Vec<RayHit>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BodyHandles {
    mesh: MeshHandle,
    orbit_line: Option<MeshHandle>,
}

/// Two-way map between bodies and the renderer objects created for them.
#[derive(Clone, Debug, Default)]
pub struct SceneBindings {
    by_handle: FxHashMap<MeshHandle, BodyId>,
    by_body: FxHashMap<BodyId, BodyHandles>,
}

impl SceneBindings {
    /// Create one sphere per body and one orbit line per planet and moon.
    pub fn bind(universe: &Universe, scene: &mut dyn SceneBackend) -> Self {
        let mut bindings = Self::default();
        for id in universe.body_ids() {
            let Some(body) = universe.body(id) else {
                continue;
            };
            let mesh = scene.create_mesh(
                MeshShape::Sphere {
                    radius: body.radius(),
                },
                body.color(),
            );
            let orbit_line = body.orbit().map(|orbit| {
                scene.create_mesh(
                    MeshShape::OrbitLine {
                        radius: orbit.radius,
                    },
                    Color::WHITE,
                )
            });
            bindings.by_handle.insert(mesh, id);
            bindings.by_body.insert(id, BodyHandles { mesh, orbit_line });
        }
        debug!(meshes = bindings.by_handle.len(), "scene bound");
        bindings
    }

    /// Body a pickable mesh belongs to.
    pub fn body_for(&self, handle: MeshHandle) -> Option<BodyId> {
        self.by_handle.get(&handle).copied()
    }

    /// Sphere mesh of a body.
    pub fn mesh_for(&self, id: BodyId) -> Option<MeshHandle> {
        self.by_body.get(&id).map(|h| h.mesh)
    }

    /// Orbit line of a planet or moon.
    pub fn orbit_line_for(&self, id: BodyId) -> Option<MeshHandle> {
        self.by_body.get(&id).and_then(|h| h.orbit_line)
    }

    /// Number of bound bodies.
    pub fn len(&self) -> usize {
        self.by_body.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.by_body.is_empty()
    }

    /// Push positions, orbit orientations, and culling output to the scene.
    pub fn sync(&self, universe: &Universe, scene: &mut dyn SceneBackend) -> Result<(), FrameError> {
        for id in universe.body_ids() {
            let handles = self
                .by_body
                .get(&id)
                .copied()
                .ok_or(FrameError::UnboundBody(id))?;
            let (Some(body), Some(position)) = (universe.body(id), universe.body_position(id))
            else {
                return Err(FrameError::UnboundBody(id));
            };
            let visibility = body.visibility();
            scene.set_transform(handles.mesh, position, Quat::IDENTITY);
            scene.set_visible(handles.mesh, visibility.visible);
            scene.set_opacity(handles.mesh, visibility.opacity);

            if let (Some(line), Some(orbit)) = (handles.orbit_line, body.orbit()) {
                let center = id
                    .parent()
                    .and_then(|parent| universe.body_position(parent))
                    .unwrap_or(position);
                scene.set_transform(line, center, orbit.orientation());
                scene.set_visible(line, body.orbit_line_visible());
                scene.set_opacity(line, visibility.opacity * ORBIT_LINE_OPACITY);
            }
        }
        Ok(())
    }
}

/// Renderer state of one object in [`InMemoryScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Requested geometry.
    pub shape: MeshShape,
    /// Requested color.
    pub color: Color,
    /// World position.
    pub position: Vec3,
    /// World rotation.
    pub rotation: Quat,
    /// Drawn this frame.
    pub visible: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Scene backend without a GPU. Stores object state and ray-casts against
/// visible spheres analytically. Used by the headless driver and tests.
#[derive(Clone, Debug, Default)]
pub struct InMemoryScene {
    objects: Vec<SceneObject>,
}

impl InMemoryScene {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// State of an object.
    pub fn object(&self, handle: MeshHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0 as usize)
    }

    /// Number of created objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no objects were created.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects currently visible.
    pub fn visible_count(&self) -> usize {
        self.objects.iter().filter(|o| o.visible).count()
    }

    fn object_mut(&mut self, handle: MeshHandle) -> Option<&mut SceneObject> {
        self.objects.get_mut(handle.0 as usize)
    }
}

/// Nearest non-negative ray parameter where the ray meets the sphere.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    // Origin inside the sphere.
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

impl SceneBackend for InMemoryScene {
    fn create_mesh(&mut self, shape: MeshShape, color: Color) -> MeshHandle {
        let handle = MeshHandle(self.objects.len() as u32);
        self.objects.push(SceneObject {
            shape,
            color,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            visible: false,
            opacity: 1.0,
        });
        handle
    }

    fn set_visible(&mut self, handle: MeshHandle, visible: bool) {
        if let Some(object) = self.object_mut(handle) {
            object.visible = visible;
        }
    }

    fn set_opacity(&mut self, handle: MeshHandle, opacity: f32) {
        if let Some(object) = self.object_mut(handle) {
            object.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn set_transform(&mut self, handle: MeshHandle, position: Vec3, rotation: Quat) {
        if let Some(object) = self.object_mut(handle) {
            object.position = position;
            object.rotation = rotation;
        }
    }

    fn world_position(&self, handle: MeshHandle) -> Option<Vec3> {
        self.object(handle).map(|o| o.position)
    }

    fn cast_ray(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.visible)
            .filter_map(|(index, o)| match o.shape {
                MeshShape::Sphere { radius } => {
                    ray_sphere(ray, o.position, radius).map(|distance| RayHit {
                        handle: MeshHandle(index as u32),
                        distance,
                    })
                }
                MeshShape::OrbitLine { .. } => None,
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_universe::{Orbit, Planet, PlanetArchetype, Star, StarSystem, Visibility};

    fn universe() -> Universe {
        let planet = Planet {
            name: "Alpha b".into(),
            radius: 0.5,
            color: Color::WHITE,
            archetype: PlanetArchetype::Rocky,
            orbit: Orbit {
                radius: 3.0,
                tilt: 0.0,
                node: 0.0,
                phase: 0.0,
                speed: 0.01,
            },
            moons: Vec::new(),
            visibility: Visibility::new(true, 0.8),
            orbit_line_visible: true,
        };
        let star = Star {
            name: "Alpha".into(),
            radius: 1.0,
            temperature: 5800.0,
            position: Vec3::new(0.0, 0.0, -10.0),
            color: Color::WHITE,
            light_active: false,
            visibility: Visibility::new(true, 1.0),
        };
        Universe::new(vec![StarSystem {
            star,
            planets: vec![planet],
        }])
    }

    #[test]
    fn test_bind_creates_mesh_and_orbit_line() {
        let universe = universe();
        let mut scene = InMemoryScene::new();
        let bindings = SceneBindings::bind(&universe, &mut scene);
        assert_eq!(bindings.len(), 2);
        // star sphere, planet sphere, planet orbit line
        assert_eq!(scene.len(), 3);
        let star = BodyId::Star { system: 0 };
        assert!(bindings.orbit_line_for(star).is_none());
        let planet = BodyId::Planet { system: 0, planet: 0 };
        let mesh = bindings.mesh_for(planet).unwrap();
        assert_eq!(bindings.body_for(mesh), Some(planet));
        assert!(bindings.orbit_line_for(planet).is_some());
    }

    #[test]
    fn test_sync_pushes_state() {
        let universe = universe();
        let mut scene = InMemoryScene::new();
        let bindings = SceneBindings::bind(&universe, &mut scene);
        bindings.sync(&universe, &mut scene).unwrap();

        let planet = BodyId::Planet { system: 0, planet: 0 };
        let mesh = scene.object(bindings.mesh_for(planet).unwrap()).unwrap();
        assert!(mesh.visible);
        assert!((mesh.position - Vec3::new(3.0, 0.0, -10.0)).length() < 1e-5);
        let line = scene.object(bindings.orbit_line_for(planet).unwrap()).unwrap();
        assert_eq!(line.position, Vec3::new(0.0, 0.0, -10.0));
        assert!((line.opacity - 0.8 * ORBIT_LINE_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn test_sync_reports_unbound_body() {
        let universe = universe();
        let bindings = SceneBindings::default();
        let mut scene = InMemoryScene::new();
        assert_eq!(
            bindings.sync(&universe, &mut scene),
            Err(FrameError::UnboundBody(BodyId::Star { system: 0 }))
        );
    }

    #[test]
    fn test_cast_ray_sorted_and_skips_hidden() {
        let mut scene = InMemoryScene::new();
        let far = scene.create_mesh(MeshShape::Sphere { radius: 1.0 }, Color::WHITE);
        let near = scene.create_mesh(MeshShape::Sphere { radius: 1.0 }, Color::WHITE);
        let hidden = scene.create_mesh(MeshShape::Sphere { radius: 1.0 }, Color::WHITE);
        scene.set_transform(far, Vec3::new(0.0, 0.0, -20.0), Quat::IDENTITY);
        scene.set_transform(near, Vec3::new(0.0, 0.0, -5.0), Quat::IDENTITY);
        scene.set_transform(hidden, Vec3::new(0.0, 0.0, -2.0), Quat::IDENTITY);
        scene.set_visible(far, true);
        scene.set_visible(near, true);

        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        };
        let hits = scene.cast_ray(&ray);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].handle, near);
        assert!((hits[0].distance - 4.0).abs() < 1e-5);
        assert_eq!(hits[1].handle, far);
    }

    #[test]
    fn test_orbit_lines_not_pickable() {
        let mut scene = InMemoryScene::new();
        let line = scene.create_mesh(MeshShape::OrbitLine { radius: 5.0 }, Color::WHITE);
        scene.set_visible(line, true);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            direction: Vec3::NEG_Z,
        };
        assert!(scene.cast_ray(&ray).is_empty());
    }

    #[test]
    fn test_ray_from_inside_sphere_hits() {
        let ray = Ray {
            origin: Vec3::ZERO,
            direction: Vec3::X,
        };
        assert_eq!(ray_sphere(&ray, Vec3::ZERO, 2.0), Some(2.0));
        assert_eq!(ray_sphere(&ray, Vec3::new(-5.0, 0.0, 0.0), 1.0), None);
    }
}
