//! In-memory `Gl` that records calls, for tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::Gl;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader { stage: u32, shader: u32 },
    ShaderSource { shader: u32 },
    CompileShader { shader: u32 },
    DeleteShader { shader: u32 },
    CreateProgram { program: u32 },
    AttachShader { program: u32, shader: u32 },
    LinkProgram { program: u32 },
    DeleteProgram { program: u32 },
    UseProgram { program: Option<u32> },
    Uniform1i { location: Option<u32>, x: i32 },
    Uniform3f { location: Option<u32>, v: Vec<f32> },
    UniformMatrix4 { location: Option<u32>, transpose: bool, m: Vec<f32> },
    EnableAttrib { index: u32 },
    DisableAttrib { index: u32 },
    AttribPointer { index: u32, size: i32, data_type: u32, normalized: bool, stride: i32, offset: i32 },
    CreateTexture { texture: u32 },
    DeleteTexture { texture: u32 },
    ActiveTexture { unit: u32 },
    BindTexture { target: u32, texture: Option<u32> },
    TexParameter { parameter: u32, value: i32 },
    TexImage2d { internal_format: i32, width: i32, height: i32, format: u32, len: Option<usize> },
    CreateBuffer { buffer: u32 },
    DeleteBuffer { buffer: u32 },
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, len: usize, usage: u32 },
    Enable { capability: u32 },
    Disable { capability: u32 },
    CullFace { mode: u32 },
    Clear { mask: u32 },
    ClearColor,
    Viewport { width: i32, height: i32 },
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
}

/// Records every state-changing call in order.
///
/// Names resolve to locations when they occur in the source of a shader
/// attached to the program, which is close enough to a real linker for the
/// slot-table tests.
#[derive(Default)]
pub(crate) struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    sources: RefCell<HashMap<u32, String>>,
    attached: RefCell<HashMap<u32, Vec<u32>>>,
    uniform_names: RefCell<Vec<String>>,
    attrib_names: RefCell<Vec<String>>,
    reject_marker: Option<String>,
    fail_link: bool,
    fail_textures: bool,
    fail_buffers: bool,
}

impl RecordingGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Compilation fails for any source containing `marker`.
    pub(crate) fn rejecting(mut self, marker: &str) -> Self {
        self.reject_marker = Some(marker.to_string());
        self
    }

    pub(crate) fn failing_link(mut self) -> Self {
        self.fail_link = true;
        self
    }

    pub(crate) fn failing_textures(mut self) -> Self {
        self.fail_textures = true;
        self
    }

    pub(crate) fn failing_buffers(mut self) -> Self {
        self.fail_buffers = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub(crate) fn draw_calls(&self) -> Vec<Call> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::DrawElements { .. }))
            .cloned()
            .collect()
    }

    fn push(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn handle(&self) -> u32 {
        let next = self.next_handle.get() + 1;
        self.next_handle.set(next);
        next
    }

    fn program_mentions(&self, program: u32, name: &str) -> bool {
        let attached = self.attached.borrow();
        let sources = self.sources.borrow();
        attached
            .get(&program)
            .into_iter()
            .flatten()
            .filter_map(|s| sources.get(s))
            .any(|src| src.contains(name))
    }

    fn location_of(names: &RefCell<Vec<String>>, name: &str) -> u32 {
        let mut names = names.borrow_mut();
        let index = match names.iter().position(|n| n == name) {
            Some(i) => i,
            None => {
                names.push(name.to_string());
                names.len() - 1
            }
        };
        index as u32
    }
}

impl Gl for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Texture = u32;
    type Buffer = u32;
    type UniformLocation = u32;

    fn create_shader(&self, stage: u32) -> Result<u32, String> {
        let shader = self.handle();
        self.push(Call::CreateShader { stage, shader });
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.sources.borrow_mut().insert(shader, source.to_string());
        self.push(Call::ShaderSource { shader });
    }

    fn compile_shader(&self, shader: u32) {
        self.push(Call::CompileShader { shader });
    }

    fn get_shader_compile_status(&self, shader: u32) -> bool {
        match (&self.reject_marker, self.sources.borrow().get(&shader)) {
            (Some(marker), Some(src)) => !src.contains(marker.as_str()),
            (_, Some(_)) => true,
            (_, None) => false,
        }
    }

    fn get_shader_info_log(&self, shader: u32) -> String {
        format!("ERROR: 0:1: shader {shader}: syntax error")
    }

    fn delete_shader(&self, shader: u32) {
        self.push(Call::DeleteShader { shader });
    }

    fn create_program(&self) -> Result<u32, String> {
        let program = self.handle();
        self.push(Call::CreateProgram { program });
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached.borrow_mut().entry(program).or_default().push(shader);
        self.push(Call::AttachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        self.push(Call::LinkProgram { program });
    }

    fn get_program_link_status(&self, _program: u32) -> bool {
        !self.fail_link
    }

    fn get_program_info_log(&self, program: u32) -> String {
        format!("program {program}: link failed")
    }

    fn delete_program(&self, program: u32) {
        self.push(Call::DeleteProgram { program });
    }

    fn use_program(&self, program: Option<u32>) {
        self.push(Call::UseProgram { program });
    }

    fn get_uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.program_mentions(program, name)
            .then(|| Self::location_of(&self.uniform_names, name))
    }

    fn get_attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.program_mentions(program, name)
            .then(|| Self::location_of(&self.attrib_names, name))
    }

    fn uniform_1_i32(&self, location: Option<&u32>, x: i32) {
        self.push(Call::Uniform1i { location: location.copied(), x });
    }

    fn uniform_3_f32_slice(&self, location: Option<&u32>, v: &[f32]) {
        self.push(Call::Uniform3f { location: location.copied(), v: v.to_vec() });
    }

    fn uniform_matrix_4_f32_slice(&self, location: Option<&u32>, transpose: bool, v: &[f32]) {
        self.push(Call::UniformMatrix4 {
            location: location.copied(),
            transpose,
            m: v.to_vec(),
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.push(Call::EnableAttrib { index });
    }

    fn disable_vertex_attrib_array(&self, index: u32) {
        self.push(Call::DisableAttrib { index });
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.push(Call::AttribPointer { index, size, data_type, normalized, stride, offset });
    }

    fn create_texture(&self) -> Result<u32, String> {
        if self.fail_textures {
            return Err("out of texture names".to_string());
        }
        let texture = self.handle();
        self.push(Call::CreateTexture { texture });
        Ok(texture)
    }

    fn delete_texture(&self, texture: u32) {
        self.push(Call::DeleteTexture { texture });
    }

    fn active_texture(&self, unit: u32) {
        self.push(Call::ActiveTexture { unit });
    }

    fn bind_texture(&self, target: u32, texture: Option<u32>) {
        self.push(Call::BindTexture { target, texture });
    }

    fn tex_parameter_i32(&self, _target: u32, parameter: u32, value: i32) {
        self.push(Call::TexParameter { parameter, value });
    }

    fn tex_image_2d(
        &self,
        _target: u32,
        _level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        _border: i32,
        format: u32,
        _ty: u32,
        pixels: Option<&[u8]>,
    ) {
        self.push(Call::TexImage2d {
            internal_format,
            width,
            height,
            format,
            len: pixels.map(<[u8]>::len),
        });
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffers {
            return Err("out of buffer names".to_string());
        }
        let buffer = self.handle();
        self.push(Call::CreateBuffer { buffer });
        Ok(buffer)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.push(Call::DeleteBuffer { buffer });
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.push(Call::BindBuffer { target, buffer });
    }

    fn buffer_data_u8_slice(&self, target: u32, data: &[u8], usage: u32) {
        self.push(Call::BufferData { target, len: data.len(), usage });
    }

    fn enable(&self, capability: u32) {
        self.push(Call::Enable { capability });
    }

    fn disable(&self, capability: u32) {
        self.push(Call::Disable { capability });
    }

    fn cull_face(&self, mode: u32) {
        self.push(Call::CullFace { mode });
    }

    fn clear(&self, mask: u32) {
        self.push(Call::Clear { mask });
    }

    fn clear_color(&self, _r: f32, _g: f32, _b: f32, _a: f32) {
        self.push(Call::ClearColor);
    }

    fn viewport(&self, _x: i32, _y: i32, width: i32, height: i32) {
        self.push(Call::Viewport { width, height });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.push(Call::DrawElements { mode, count, element_type, offset });
    }
}
