use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::ShaderError;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    fn naga_stage(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Where an entry-point input or output is bound.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Slot {
    Location(u32),
    Position,
    OtherBuiltIn,
}

impl Slot {
    fn from_binding(binding: &naga::Binding) -> Self {
        match binding {
            naga::Binding::Location { location, .. } => Self::Location(*location),
            naga::Binding::BuiltIn(naga::BuiltIn::Position { .. }) => Self::Position,
            naga::Binding::BuiltIn(_) => Self::OtherBuiltIn,
        }
    }
}

/// One reflected entry-point input or output.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct InterfaceVar {
    pub name: String,
    pub slot: Slot,
    pub ty: naga::TypeInner,
}

impl InterfaceVar {
    /// Component count of a scalar or vector; zero for anything else.
    pub fn components(&self) -> u32 {
        match &self.ty {
            naga::TypeInner::Scalar(_) => 1,
            naga::TypeInner::Vector { size, .. } => *size as u32,
            _ => 0,
        }
    }
}

/// A reflected `var<uniform>` declaration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct UniformVar {
    pub name: String,
    pub group: u32,
    pub binding: u32,
}

/// A successfully compiled, validated shader stage.
///
/// Holds the WGSL text (handed to the device at pipeline creation) together
/// with the reflected interface the linker checks. Consumed by
/// [`link_program`](super::link_program).
#[derive(Debug, Clone)]
pub struct CompiledStage {
    pub(crate) kind: StageKind,
    pub(crate) entry_point: String,
    pub(crate) source: String,
    pub(crate) inputs: Vec<InterfaceVar>,
    pub(crate) outputs: Vec<InterfaceVar>,
    pub(crate) uniforms: Vec<UniformVar>,
}

impl CompiledStage {
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

/// Parses and validates a WGSL stage.
///
/// The source must contain an entry point of the requested kind; if it
/// declares several, the first one wins.
pub fn compile_stage(kind: StageKind, source: &str) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| ShaderError::compile(kind, e.emit_to_string(source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::compile(kind, error_chain(&e)))?;

    let mut candidates = module
        .entry_points
        .iter()
        .filter(|ep| ep.stage == kind.naga_stage());

    let Some(entry) = candidates.next() else {
        return Err(ShaderError::compile(kind, format!("no @{kind} entry point found")));
    };
    if candidates.next().is_some() {
        log::debug!("{kind} source declares several entry points; using `{}`", entry.name);
    }

    let mut inputs = Vec::new();
    for arg in &entry.function.arguments {
        flatten_interface(&module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut outputs = Vec::new();
    if let Some(result) = &entry.function.result {
        flatten_interface(&module, None, result.ty, result.binding.as_ref(), &mut outputs);
    }

    let uniforms = module
        .global_variables
        .iter()
        .filter(|(_, var)| matches!(var.space, naga::AddressSpace::Uniform))
        .filter_map(|(_, var)| {
            let binding = var.binding.as_ref()?;
            Some(UniformVar {
                name: var.name.clone()?,
                group: binding.group,
                binding: binding.binding,
            })
        })
        .collect();

    Ok(CompiledStage {
        kind,
        entry_point: entry.name.clone(),
        source: source.to_owned(),
        inputs,
        outputs,
        uniforms,
    })
}

/// Collects bound interface variables, descending into struct members.
fn flatten_interface(
    module: &naga::Module,
    name: Option<&str>,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<InterfaceVar>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(binding) => out.push(InterfaceVar {
            name: name.unwrap_or_default().to_owned(),
            slot: Slot::from_binding(binding),
            ty: inner.clone(),
        }),
        None => {
            if let naga::TypeInner::Struct { members, .. } = inner {
                for member in members {
                    flatten_interface(
                        module,
                        member.name.as_deref(),
                        member.ty,
                        member.binding.as_ref(),
                        out,
                    );
                }
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}
