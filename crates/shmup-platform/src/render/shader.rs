//! Shader program loading and the slot table.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs::{FileSystem, FsError};
use crate::gl::{self, Gl};

pub const DEFAULT_VERTEX_SHADER: &str = "data/shaders/v_simple.glsl";
pub const DEFAULT_FRAGMENT_SHADER: &str = "data/shaders/f_simple.glsl";

/// Role of a shader variable the draw routine feeds.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderSlot {
    ModelViewProjection,
    Vertex,
    Normal,
    TexCoord,
    BaseMap,
    LightPosition,
    LightAmbient,
    LightDiffuse,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SlotKind {
    Uniform,
    Attribute,
}

impl ShaderSlot {
    pub const COUNT: usize = 8;

    pub const ALL: [ShaderSlot; Self::COUNT] = [
        ShaderSlot::ModelViewProjection,
        ShaderSlot::Vertex,
        ShaderSlot::Normal,
        ShaderSlot::TexCoord,
        ShaderSlot::BaseMap,
        ShaderSlot::LightPosition,
        ShaderSlot::LightAmbient,
        ShaderSlot::LightDiffuse,
    ];

    /// Name the shader sources declare for this role.
    pub fn name(self) -> &'static str {
        match self {
            ShaderSlot::ModelViewProjection => "modelViewProjectionMatrix",
            ShaderSlot::Vertex => "a_vertex",
            ShaderSlot::Normal => "a_normal",
            ShaderSlot::TexCoord => "a_texcoord0",
            ShaderSlot::BaseMap => "s_baseMap",
            ShaderSlot::LightPosition => "lightPosition",
            ShaderSlot::LightAmbient => "lightColorAmbient",
            ShaderSlot::LightDiffuse => "lightColorDiffuse",
        }
    }

    pub fn kind(self) -> SlotKind {
        match self {
            ShaderSlot::Vertex | ShaderSlot::Normal | ShaderSlot::TexCoord => SlotKind::Attribute,
            _ => SlotKind::Uniform,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Resolved location of one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotBinding<U> {
    /// The program does not define the name (GL's -1).
    Unbound,
    Attribute(u32),
    Uniform(U),
}

/// Slot → location mapping for one linked program. Every slot starts
/// [`SlotBinding::Unbound`].
#[derive(Debug, Clone)]
pub struct SlotTable<U> {
    bindings: [SlotBinding<U>; ShaderSlot::COUNT],
}

impl<U> Default for SlotTable<U> {
    fn default() -> Self {
        Self {
            bindings: std::array::from_fn(|_| SlotBinding::Unbound),
        }
    }
}

impl<U> SlotTable<U> {
    pub fn get(&self, slot: ShaderSlot) -> &SlotBinding<U> {
        &self.bindings[slot.index()]
    }

    pub fn set(&mut self, slot: ShaderSlot, binding: SlotBinding<U>) {
        self.bindings[slot.index()] = binding;
    }

    /// Uniform location, or `None` for unbound (and attribute) slots.
    pub fn uniform(&self, slot: ShaderSlot) -> Option<&U> {
        match self.get(slot) {
            SlotBinding::Uniform(loc) => Some(loc),
            _ => None,
        }
    }

    /// Attribute index, or `None` for unbound (and uniform) slots.
    pub fn attribute(&self, slot: ShaderSlot) -> Option<u32> {
        match self.get(slot) {
            SlotBinding::Attribute(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_bound(&self, slot: ShaderSlot) -> bool {
        !matches!(self.get(slot), SlotBinding::Unbound)
    }

    pub fn bound_count(&self) -> usize {
        ShaderSlot::ALL.iter().filter(|s| self.is_bound(**s)).count()
    }
}

/// Source paths of the two stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: PathBuf::from(DEFAULT_VERTEX_SHADER),
            fragment: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_enum(self) -> u32 {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Vertex => "vertex",
            Stage::Fragment => "fragment",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("could not read {stage} shader source")]
    Source {
        stage: Stage,
        #[source]
        source: FsError,
    },

    #[error("{stage} shader '{}' is not valid UTF-8", path.display())]
    Encoding { stage: Stage, path: PathBuf },

    #[error("could not create {stage} shader object: {message}")]
    CreateShader { stage: Stage, message: String },

    #[error("error compiling {stage} shader '{}':\n{log}", path.display())]
    Compile {
        stage: Stage,
        path: PathBuf,
        log: String,
    },

    #[error("could not create program object: {0}")]
    CreateProgram(String),

    #[error("error linking program:\n{0}")]
    Link(String),
}

/// A linked program plus its slot table, or the failed state.
///
/// The failed state holds no program (the zero handle) and an all-unbound
/// table; the draw routine checks [`is_linked`](Self::is_linked) before using
/// anything else.
pub struct ShaderProgram<G: Gl> {
    program: Option<G::Program>,
    slots: SlotTable<G::UniformLocation>,
}

impl<G: Gl> ShaderProgram<G> {
    pub fn failed() -> Self {
        Self {
            program: None,
            slots: SlotTable::default(),
        }
    }

    /// Compiles and links both stages, then resolves the slot table.
    ///
    /// Never fails: errors are logged and produce [`failed`](Self::failed).
    pub fn load(gl: &G, fs: &FileSystem, paths: &ShaderPaths) -> Self {
        log::info!(
            "loading shader program '{}' + '{}'",
            paths.vertex.display(),
            paths.fragment.display()
        );

        let program = match link_program(gl, fs, paths) {
            Ok(program) => program,
            Err(e) => {
                log::error!("failed to load shader program: {e}");
                return Self::failed();
            }
        };

        let slots = resolve_slots(gl, program);
        log::info!(
            "shader program {program:?} linked, {}/{} slots bound",
            slots.bound_count(),
            ShaderSlot::COUNT
        );

        Self {
            program: Some(program),
            slots,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    pub fn handle(&self) -> Option<G::Program> {
        self.program
    }

    pub fn slots(&self) -> &SlotTable<G::UniformLocation> {
        &self.slots
    }

    pub fn uniform(&self, slot: ShaderSlot) -> Option<&G::UniformLocation> {
        self.slots.uniform(slot)
    }

    pub fn attribute(&self, slot: ShaderSlot) -> Option<u32> {
        self.slots.attribute(slot)
    }

    /// Deletes the program object and returns to the failed state.
    pub fn destroy(&mut self, gl: &G) {
        if let Some(program) = self.program.take() {
            gl.delete_program(program);
            log::debug!("deleted shader program {program:?}");
        }
        self.slots = SlotTable::default();
    }
}

fn link_program<G: Gl>(
    gl: &G,
    fs: &FileSystem,
    paths: &ShaderPaths,
) -> Result<G::Program, ShaderError> {
    // Both stages are required: a vertex failure stops before the fragment
    // stage is touched.
    let vertex = compile_stage(gl, fs, &paths.vertex, Stage::Vertex)?;
    let fragment = match compile_stage(gl, fs, &paths.fragment, Stage::Fragment) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(message) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(ShaderError::CreateProgram(message));
        }
    };

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    let link_log = (!gl.get_program_link_status(program)).then(|| gl.get_program_info_log(program));

    // The program keeps what it needs; the stage objects are released either way.
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if let Some(log) = link_log {
        gl.delete_program(program);
        return Err(ShaderError::Link(log));
    }

    Ok(program)
}

fn compile_stage<G: Gl>(
    gl: &G,
    fs: &FileSystem,
    path: &Path,
    stage: Stage,
) -> Result<G::Shader, ShaderError> {
    let file = fs
        .load(path)
        .map_err(|source| ShaderError::Source { stage, source })?;

    let source = std::str::from_utf8(file.loaded_bytes().unwrap_or_default()).map_err(|_| {
        ShaderError::Encoding {
            stage,
            path: path.to_path_buf(),
        }
    })?;

    let shader = gl
        .create_shader(stage.gl_enum())
        .map_err(|message| ShaderError::CreateShader { stage, message })?;

    gl.shader_source(shader, source);
    file.close();

    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ShaderError::Compile {
            stage,
            path: path.to_path_buf(),
            log,
        });
    }

    Ok(shader)
}

fn resolve_slots<G: Gl>(gl: &G, program: G::Program) -> SlotTable<G::UniformLocation> {
    let mut slots = SlotTable::default();

    for slot in ShaderSlot::ALL {
        let binding = match slot.kind() {
            SlotKind::Uniform => gl
                .get_uniform_location(program, slot.name())
                .map_or(SlotBinding::Unbound, SlotBinding::Uniform),
            SlotKind::Attribute => gl
                .get_attrib_location(program, slot.name())
                .map_or(SlotBinding::Unbound, SlotBinding::Attribute),
        };

        if matches!(binding, SlotBinding::Unbound) {
            log::debug!("shader slot {slot:?} ('{}') not found in program", slot.name());
        }
        slots.set(slot, binding);
    }

    slots
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::gl::recording::{Call, RecordingGl};

    fn load(gl: &RecordingGl, dir: &crate::fs::testing::ScratchDir) -> ShaderProgram<RecordingGl> {
        ShaderProgram::load(gl, &FileSystem::new(dir.path()), &ShaderPaths::default())
    }

    fn assert_all_unbound(program: &ShaderProgram<RecordingGl>) {
        for slot in ShaderSlot::ALL {
            assert_eq!(program.slots().get(slot), &SlotBinding::Unbound, "{slot:?}");
        }
    }

    // ── slot table ────────────────────────────────────────────────────────

    #[test]
    fn default_table_is_all_unbound() {
        let table: SlotTable<u32> = SlotTable::default();
        assert_eq!(table.bound_count(), 0);
        assert!(ShaderSlot::ALL.iter().all(|s| table.uniform(*s).is_none()));
    }

    #[test]
    fn slot_kinds_cover_three_attributes_and_five_uniforms() {
        let attributes = ShaderSlot::ALL
            .iter()
            .filter(|s| s.kind() == SlotKind::Attribute)
            .count();
        assert_eq!(attributes, 3);
        assert_eq!(ShaderSlot::ALL.len() - attributes, 5);
    }

    #[test]
    fn uniform_and_attribute_accessors_respect_kind() {
        let mut table: SlotTable<u32> = SlotTable::default();
        table.set(ShaderSlot::Vertex, SlotBinding::Attribute(2));
        table.set(ShaderSlot::BaseMap, SlotBinding::Uniform(7));

        assert_eq!(table.attribute(ShaderSlot::Vertex), Some(2));
        assert_eq!(table.uniform(ShaderSlot::Vertex), None);
        assert_eq!(table.uniform(ShaderSlot::BaseMap), Some(&7));
        assert_eq!(table.attribute(ShaderSlot::BaseMap), None);
        assert_eq!(table.bound_count(), 2);
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn shipped_shaders_link_and_bind_every_slot() {
        let dir = shader_dir();
        let gl = RecordingGl::new();
        let program = load(&gl, &dir);

        assert!(program.is_linked());
        assert_ne!(program.handle(), Some(0));
        for slot in ShaderSlot::ALL {
            assert!(program.slots().is_bound(slot), "{slot:?} unbound");
        }
    }

    #[test]
    fn successful_link_releases_both_stage_objects() {
        let dir = shader_dir();
        let gl = RecordingGl::new();
        let program = load(&gl, &dir);

        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram { .. })), 0);
        assert!(program.is_linked());
    }

    #[test]
    fn missing_vertex_source_yields_failed_program() {
        let dir = crate::fs::testing::ScratchDir::new("no-vertex");
        dir.write(DEFAULT_FRAGMENT_SHADER, FRAGMENT_SRC.as_bytes());

        let gl = RecordingGl::new();
        let program = load(&gl, &dir);

        assert!(!program.is_linked());
        assert_all_unbound(&program);
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn missing_fragment_source_releases_vertex_shader() {
        let dir = crate::fs::testing::ScratchDir::new("no-fragment");
        dir.write(DEFAULT_VERTEX_SHADER, VERTEX_SRC.as_bytes());

        let gl = RecordingGl::new();
        let program = load(&gl, &dir);

        assert!(!program.is_linked());
        assert_all_unbound(&program);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader { .. })), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram { .. })), 0);
    }

    #[test]
    fn vertex_compile_failure_deletes_shader_and_creates_no_program() {
        let dir = shader_dir_with("#version 300 es\n@@broken@@", FRAGMENT_SRC);
        let gl = RecordingGl::new().rejecting("@@broken@@");
        let program = load(&gl, &dir);

        assert!(!program.is_linked());
        assert_all_unbound(&program);

        let calls = gl.calls();
        let Some(Call::CreateShader { shader, stage }) = calls.first().cloned() else {
            panic!("expected a shader to be created first, got {calls:?}");
        };
        assert_eq!(stage, crate::gl::VERTEX_SHADER);
        assert!(calls.contains(&Call::DeleteShader { shader }));
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram { .. })), 0);
        // Fragment stage never attempted.
        assert_eq!(gl.count(|c| matches!(c, Call::CreateShader { .. })), 1);
    }

    #[test]
    fn fragment_compile_failure_deletes_both_shaders() {
        let dir = shader_dir_with(VERTEX_SRC, "@@broken@@");
        let gl = RecordingGl::new().rejecting("@@broken@@");
        let program = load(&gl, &dir);

        assert!(!program.is_linked());
        assert_eq!(gl.count(|c| matches!(c, Call::CreateShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader { .. })), 2);
        assert_eq!(gl.count(|c| matches!(c, Call::CreateProgram { .. })), 0);
    }

    #[test]
    fn link_failure_deletes_program_and_shaders() {
        let dir = shader_dir();
        let gl = RecordingGl::new().failing_link();
        let program = load(&gl, &dir);

        assert!(!program.is_linked());
        assert_all_unbound(&program);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteProgram { .. })), 1);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteShader { .. })), 2);
    }

    #[test]
    fn names_missing_from_program_resolve_unbound() {
        let vertex = "in vec3 a_vertex; uniform mat4 modelViewProjectionMatrix;";
        let fragment = "uniform sampler2D s_baseMap;";
        let dir = shader_dir_with(vertex, fragment);
        let gl = RecordingGl::new();
        let program = load(&gl, &dir);

        assert!(program.is_linked());
        assert!(program.slots().is_bound(ShaderSlot::Vertex));
        assert!(program.slots().is_bound(ShaderSlot::ModelViewProjection));
        assert!(program.slots().is_bound(ShaderSlot::BaseMap));
        for slot in [
            ShaderSlot::Normal,
            ShaderSlot::TexCoord,
            ShaderSlot::LightPosition,
            ShaderSlot::LightAmbient,
            ShaderSlot::LightDiffuse,
        ] {
            assert_eq!(program.slots().get(slot), &SlotBinding::Unbound, "{slot:?}");
        }
    }

    #[test]
    fn non_utf8_source_fails_before_touching_gl() {
        let dir = crate::fs::testing::ScratchDir::new("bad-utf8");
        dir.write(DEFAULT_VERTEX_SHADER, &[0xff, 0xfe, 0x00]);
        dir.write(DEFAULT_FRAGMENT_SHADER, FRAGMENT_SRC.as_bytes());

        let gl = RecordingGl::new();
        let program = load(&gl, &dir);
        assert!(!program.is_linked());
        assert!(gl.calls().is_empty());
    }

    #[test]
    fn destroy_deletes_program_once() {
        let dir = shader_dir();
        let gl = RecordingGl::new();
        let mut program = load(&gl, &dir);
        let handle = program.handle().unwrap();

        program.destroy(&gl);
        program.destroy(&gl);

        assert!(!program.is_linked());
        assert_eq!(
            gl.count(|c| *c == Call::DeleteProgram { program: handle }),
            1
        );
        assert_all_unbound(&program);
    }
}
