//! Demo scene: a small solar system with a few props around it.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};
use std::sync::Arc;

use anyhow::Result;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use nodal_resources::{Material, Mesh};
use nodal_scene::{Camera, MeshNode, Node, NodeId, SceneGraph};
use tracing::info;

/// Orbit distance, planet scale and orbital speed of each planet.
const PLANETS: [(f32, f32, f32); 3] = [(8.0, 0.6, 0.9), (14.0, 1.0, 0.5), (22.0, 1.4, 0.25)];

/// A built scene and the handles the frame loop needs.
pub struct DemoScene {
    pub graph: SceneGraph,
    pub root: NodeId,
    pub camera: NodeId,
}

struct Assets {
    sphere: Arc<Mesh>,
    cube: Arc<Mesh>,
    quad: Arc<Mesh>,
    torus: Arc<Mesh>,
    knot: Arc<Mesh>,
    sun: Arc<Material>,
    rock: Arc<Material>,
    ocean: Arc<Material>,
    grass: Arc<Material>,
    metal: Arc<Material>,
}

impl Assets {
    fn load() -> Result<Self> {
        let color = |r, g, b| Vec4::new(r, g, b, 1.0);

        Ok(Self {
            sphere: Arc::new(Mesh::sphere(Vec3::ONE, Vec3::ZERO, 24, 24)?),
            cube: Arc::new(Mesh::cube(Vec3::splat(2.0), Vec3::ZERO)),
            quad: Arc::new(Mesh::quad(Vec2::splat(80.0), Vec3::ZERO)),
            torus: Arc::new(Mesh::torus(32, 2.0, 0.6)?),
            knot: Arc::new(Mesh::knot(128, 16, 3.0)?),
            sun: Arc::new(Material::new().with_emissive(color(1.0, 0.8, 0.3))),
            rock: Arc::new(Material::new().with_diffuse(color(0.55, 0.5, 0.45))),
            ocean: Arc::new(
                Material::new()
                    .with_diffuse(color(0.2, 0.4, 0.9))
                    .with_specular(Vec4::ONE, 64.0),
            ),
            grass: Arc::new(Material::new().with_diffuse(color(0.3, 0.6, 0.25))),
            metal: Arc::new(
                Material::new()
                    .with_diffuse(color(0.7, 0.7, 0.75))
                    .with_specular(Vec4::ONE, 120.0),
            ),
        })
    }
}

fn mesh_node(name: &str, mesh: &Arc<Mesh>, material: &Arc<Material>) -> Node {
    Node::mesh(
        name,
        MeshNode::new(Some(Arc::clone(mesh)), Some(Arc::clone(material))),
    )
}

fn placed(mut node: Node, scale: f32, rotation: Quat, position: Vec3) -> Node {
    node.set_matrix(Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        rotation,
        position,
    ));
    node
}

/// Build the demo scene.
pub fn build(aspect: f32) -> Result<DemoScene> {
    let assets = Assets::load()?;
    let mut graph = SceneGraph::new();

    let root = graph.insert(Node::new("root"));

    let mut camera_node = Node::camera("camera", Camera::new(FRAC_PI_3, aspect, 1.0, 500.0));
    camera_node.look_at(Vec3::new(0.0, 18.0, 45.0), Vec3::ZERO);
    let camera = graph.insert(camera_node);
    graph.add_child(root, camera)?;

    let system = graph.insert(Node::new("system"));
    graph.add_child(root, system)?;

    let sun = graph.insert(
        placed(
            mesh_node("sun", &assets.sphere, &assets.sun),
            3.0,
            Quat::IDENTITY,
            Vec3::ZERO,
        )
        .with_rotation(Vec3::Y, 0.2),
    );
    graph.add_child(system, sun)?;

    for (i, &(distance, scale, speed)) in PLANETS.iter().enumerate() {
        let orbit = graph.insert(Node::new(format!("orbit{i}")).with_rotation(Vec3::Y, speed));
        graph.add_child(system, orbit)?;

        let planet = graph.insert(
            placed(
                mesh_node(&format!("planet{i}"), &assets.sphere, &assets.ocean),
                scale,
                Quat::IDENTITY,
                Vec3::new(distance, 0.0, 0.0),
            )
            .with_rotation(Vec3::Y, 1.0)
            .with_radius(scale),
        );
        graph.add_child(orbit, planet)?;

        let moon = graph.insert(
            placed(
                mesh_node(&format!("moon{i}"), &assets.sphere, &assets.rock),
                0.3,
                Quat::IDENTITY,
                Vec3::new(2.5, 0.0, 0.0),
            )
            .with_radius(0.3 * scale),
        );
        graph.add_child(planet, moon)?;
    }

    let torus = graph.insert(
        mesh_node("torus", &assets.torus, &assets.metal)
            .with_position(Vec3::new(-14.0, 4.0, 10.0))
            .with_rotation(Vec3::X, 0.8),
    );
    graph.add_child(root, torus)?;

    let knot = graph.insert(
        mesh_node("knot", &assets.knot, &assets.metal)
            .with_position(Vec3::new(14.0, 4.0, 10.0))
            .with_rotation(Vec3::new(1.0, 1.0, 0.0), 0.6),
    );
    graph.add_child(root, knot)?;

    let ground = graph.insert(placed(
        mesh_node("ground", &assets.quad, &assets.grass),
        1.0,
        Quat::from_rotation_x(-FRAC_PI_2),
        Vec3::new(0.0, -4.0, 0.0),
    ));
    graph.add_child(root, ground)?;

    let crate_box = graph.insert(
        mesh_node("crate", &assets.cube, &assets.rock)
            .with_position(Vec3::new(0.0, -3.0, 16.0))
            .with_velocity(Vec3::new(0.0, 0.0, -0.25)),
    );
    graph.add_child(root, crate_box)?;

    info!(
        "Demo scene built: {} nodes, sphere {} vertices, knot {} triangles",
        graph.len(),
        assets.sphere.vertex_count(),
        assets.knot.index_count() / 3
    );

    Ok(DemoScene {
        graph,
        root,
        camera,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodal_scene::RecordingTarget;

    #[test]
    fn test_demo_scene_renders_every_mesh() {
        let demo = build(16.0 / 9.0).unwrap();
        // root, camera, system, sun, 3 x (orbit, planet, moon), torus, knot, ground, crate
        assert_eq!(demo.graph.len(), 17);
        assert_eq!(demo.graph.find_node(demo.root, "camera"), Some(demo.camera));

        let mut target = RecordingTarget::new();
        demo.graph.activate_camera(demo.camera, &mut target).unwrap();
        assert_eq!(demo.graph.render(demo.root, &mut target).unwrap(), 11);
    }

    #[test]
    fn test_moons_follow_planets() {
        let mut demo = build(1.0).unwrap();
        for _ in 0..30 {
            demo.graph.update(demo.root, 0.1).unwrap();
        }

        for i in 0..PLANETS.len() {
            let planet = demo.graph.find_node(demo.root, &format!("planet{i}")).unwrap();
            let moon = demo.graph.find_node(demo.root, &format!("moon{i}")).unwrap();
            let planet_pos = demo.graph.world_matrix(planet).unwrap().w_axis.truncate();
            let moon_pos = demo.graph.world_matrix(moon).unwrap().w_axis.truncate();

            let distance = planet_pos.distance(moon_pos);
            assert!((distance - 2.5 * PLANETS[i].1).abs() < 1e-3);
        }
    }
}
