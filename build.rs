/// Build script for obj_scene
///
/// The GLSL sources are embedded with `include_str!`, so a rebuild is
/// needed whenever they change.
fn main() {
    println!("cargo:rerun-if-changed=src/renderer/shaders/mesh.vert");
    println!("cargo:rerun-if-changed=src/renderer/shaders/mesh.frag");
}
