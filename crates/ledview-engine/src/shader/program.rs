use super::stage::{CompiledStage, InterfaceVar, Slot, UniformVar};
use super::{ShaderError, StageKind};

/// A vertex input exposed by a linked program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttributeLocation {
    pub name: String,
    /// `@location(n)` of the input.
    pub location: u32,
    /// Scalar/vector component count (1..=4).
    pub components: u32,
}

/// A uniform block exposed by a linked program.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub name: String,
    pub group: u32,
    pub binding: u32,
}

/// Entry point + WGSL text of one linked stage.
#[derive(Debug, Clone)]
pub struct StageModule {
    pub entry_point: String,
    pub source: String,
}

/// A linked vertex/fragment pair with its reflected interface.
///
/// This is device-independent; a `RenderContext` turns it into a pipeline.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    vertex: StageModule,
    fragment: StageModule,
    attributes: Vec<AttributeLocation>,
    uniforms: Vec<UniformLocation>,
}

impl ShaderProgram {
    pub fn vertex(&self) -> &StageModule {
        &self.vertex
    }

    pub fn fragment(&self) -> &StageModule {
        &self.fragment
    }

    pub fn attributes(&self) -> &[AttributeLocation] {
        &self.attributes
    }

    pub fn uniforms(&self) -> &[UniformLocation] {
        &self.uniforms
    }

    /// Looks up a vertex input by name.
    pub fn locate_attribute(&self, name: &str) -> Option<&AttributeLocation> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Looks up a uniform block by name.
    ///
    /// `None` is a valid answer: a program without a projection uniform draws
    /// positions as clip coordinates and the caller skips the upload.
    pub fn locate_uniform(&self, name: &str) -> Option<&UniformLocation> {
        self.uniforms.iter().find(|u| u.name == name)
    }

    /// Like [`locate_attribute`](Self::locate_attribute), but the attribute
    /// must exist with exactly `components` components.
    pub fn require_attribute(
        &self,
        name: &str,
        components: u32,
    ) -> Result<&AttributeLocation, ShaderError> {
        let attr = self
            .locate_attribute(name)
            .ok_or_else(|| ShaderError::link(format!("vertex stage has no attribute `{name}`")))?;

        if attr.components != components {
            return Err(ShaderError::link(format!(
                "attribute `{name}` has {} components, expected {components}",
                attr.components
            )));
        }
        Ok(attr)
    }
}

/// Links a vertex and a fragment stage into a program.
///
/// Checks performed:
/// - stage kinds are vertex then fragment
/// - the vertex stage writes `@builtin(position)`
/// - every fragment `@location` input is written by the vertex stage with the
///   same type
/// - uniforms declared by both stages agree on their group/binding
///
/// Both stages are consumed; on failure they are dropped before the error is
/// returned.
pub fn link_program(
    vertex: CompiledStage,
    fragment: CompiledStage,
) -> Result<ShaderProgram, ShaderError> {
    let mut problems = Vec::new();

    if vertex.kind != StageKind::Vertex {
        problems.push(format!("first stage is a {} stage, expected vertex", vertex.kind));
    }
    if fragment.kind != StageKind::Fragment {
        problems.push(format!("second stage is a {} stage, expected fragment", fragment.kind));
    }
    if !problems.is_empty() {
        return Err(ShaderError::link(problems.join("\n")));
    }

    if !vertex.outputs.iter().any(|o| o.slot == Slot::Position) {
        problems.push("vertex stage does not write @builtin(position)".to_owned());
    }

    for input in &fragment.inputs {
        let Slot::Location(location) = input.slot else { continue };
        match find_location(&vertex.outputs, location) {
            None => problems.push(format!(
                "fragment input `{}` at @location({location}) is not written by the vertex stage",
                input.name
            )),
            Some(output) if output.ty != input.ty => problems.push(format!(
                "@location({location}) type mismatch: vertex writes {:?}, fragment reads {:?}",
                output.ty, input.ty
            )),
            Some(_) => {}
        }
    }

    let uniforms = merge_uniforms(&vertex.uniforms, &fragment.uniforms, &mut problems);

    if !problems.is_empty() {
        return Err(ShaderError::link(problems.join("\n")));
    }

    let attributes = vertex
        .inputs
        .iter()
        .filter_map(|input| match input.slot {
            Slot::Location(location) => Some(AttributeLocation {
                name: input.name.clone(),
                location,
                components: input.components(),
            }),
            _ => None,
        })
        .collect();

    Ok(ShaderProgram {
        vertex: StageModule { entry_point: vertex.entry_point, source: vertex.source },
        fragment: StageModule { entry_point: fragment.entry_point, source: fragment.source },
        attributes,
        uniforms,
    })
}

fn find_location(vars: &[InterfaceVar], location: u32) -> Option<&InterfaceVar> {
    vars.iter().find(|v| v.slot == Slot::Location(location))
}

fn merge_uniforms(
    vertex: &[UniformVar],
    fragment: &[UniformVar],
    problems: &mut Vec<String>,
) -> Vec<UniformLocation> {
    let mut merged: Vec<UniformLocation> = Vec::with_capacity(vertex.len() + fragment.len());

    for var in vertex.iter().chain(fragment) {
        let clash = merged.iter().find(|u| {
            (u.group, u.binding) == (var.group, var.binding) || u.name == var.name
        });
        match clash {
            None => merged.push(UniformLocation {
                name: var.name.clone(),
                group: var.group,
                binding: var.binding,
            }),
            Some(u) if u.name == var.name && (u.group, u.binding) == (var.group, var.binding) => {}
            Some(u) => problems.push(format!(
                "uniform `{}` (group {}, binding {}) conflicts with `{}` (group {}, binding {})",
                var.name, var.group, var.binding, u.name, u.group, u.binding
            )),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{compile_stage, POINTS_FRAGMENT_WGSL, POINTS_VERTEX_WGSL};

    fn vs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Vertex, src).unwrap()
    }

    fn fs(src: &str) -> CompiledStage {
        compile_stage(StageKind::Fragment, src).unwrap()
    }

    fn builtin() -> ShaderProgram {
        link_program(vs(POINTS_VERTEX_WGSL), fs(POINTS_FRAGMENT_WGSL)).unwrap()
    }

    const BARE_VS: &str = r#"
        struct Out {
            @builtin(position) pos: vec4<f32>,
            @location(0) color: vec4<f32>,
        };

        @vertex
        fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec4<f32>) -> Out {
            var out: Out;
            out.pos = vec4<f32>(position, 1.0);
            out.color = color;
            return out;
        }
    "#;

    // ── locate ────────────────────────────────────────────────────────────

    #[test]
    fn locate_attribute_returns_location_and_components() {
        let program = builtin();
        let position = program.locate_attribute("position").unwrap();
        assert_eq!((position.location, position.components), (0, 3));
        let color = program.locate_attribute("color").unwrap();
        assert_eq!((color.location, color.components), (1, 4));
    }

    #[test]
    fn builtin_inputs_are_not_attributes() {
        let program = builtin();
        assert_eq!(program.attributes().len(), 2);
        assert!(program.locate_attribute("vertex_index").is_none());
    }

    #[test]
    fn locate_uniform_finds_frame_block() {
        let program = builtin();
        let frame = program.locate_uniform("frame").unwrap();
        assert_eq!((frame.group, frame.binding), (0, 0));
    }

    #[test]
    fn missing_uniform_is_none_not_an_error() {
        let program = link_program(vs(BARE_VS), fs(POINTS_FRAGMENT_WGSL)).unwrap();
        assert!(program.locate_uniform("frame").is_none());
        assert!(program.uniforms().is_empty());
    }

    #[test]
    fn require_attribute_checks_component_count() {
        let program = builtin();
        assert!(program.require_attribute("position", 3).is_ok());
        let err = program.require_attribute("position", 4).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(program.require_attribute("normal", 3).is_err());
    }

    // ── link failures ─────────────────────────────────────────────────────

    #[test]
    fn swapped_stages_fail_to_link() {
        let err = link_program(fs(POINTS_FRAGMENT_WGSL), vs(POINTS_VERTEX_WGSL)).unwrap_err();
        assert!(err.diagnostic().contains("expected vertex"));
    }

    #[test]
    fn unmatched_fragment_input_fails_to_link() {
        let frag = r#"
            @fragment
            fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> {
                return tint;
            }
        "#;
        let err = link_program(vs(POINTS_VERTEX_WGSL), fs(frag)).unwrap_err();
        assert!(err.diagnostic().contains("@location(3)"));
    }

    #[test]
    fn type_mismatch_fails_to_link() {
        let frag = r#"
            @fragment
            fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(color, 1.0);
            }
        "#;
        let err = link_program(vs(POINTS_VERTEX_WGSL), fs(frag)).unwrap_err();
        assert!(err.diagnostic().contains("type mismatch"));
    }

    #[test]
    fn conflicting_uniform_bindings_fail_to_link() {
        let frag = r#"
            struct Tint { value: vec4<f32> };
            @group(0) @binding(0) var<uniform> tint: Tint;

            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color * tint.value;
            }
        "#;
        let err = link_program(vs(POINTS_VERTEX_WGSL), fs(frag)).unwrap_err();
        assert!(err.diagnostic().contains("conflicts"));
    }

    #[test]
    fn shared_uniform_is_merged_once() {
        let frag = r#"
            struct Frame {
                mvp: mat4x4<f32>,
                viewport: vec2<f32>,
                point_size: f32,
                _pad: f32,
            };
            @group(0) @binding(0) var<uniform> frame: Frame;

            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color * (frame.point_size / frame.point_size);
            }
        "#;
        let program = link_program(vs(POINTS_VERTEX_WGSL), fs(frag)).unwrap();
        assert_eq!(program.uniforms().len(), 1);
    }
}
